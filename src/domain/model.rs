use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 參加者：以 `id`（通常是 email）識別，`name` 僅供顯示
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// 前一輪的分配：giver id -> recipient id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorAssignments {
    entries: HashMap<String, String>,
}

impl PriorAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, giver_id: impl Into<String>, recipient_id: impl Into<String>) {
        self.entries.insert(giver_id.into(), recipient_id.into());
    }

    pub fn get(&self, giver_id: &str) -> Option<&str> {
        self.entries.get(giver_id).map(String::as_str)
    }

    /// Whether `giver_id -> recipient_id` was already used in a prior round.
    pub fn forbids(&self, giver_id: &str, recipient_id: &str) -> bool {
        self.get(giver_id) == Some(recipient_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<G: Into<String>, R: Into<String>> FromIterator<(G, R)> for PriorAssignments {
    fn from_iter<I: IntoIterator<Item = (G, R)>>(iter: I) -> Self {
        let mut prior = Self::new();
        for (giver, recipient) in iter {
            prior.insert(giver, recipient);
        }
        prior
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: Participant,
    pub recipient: Participant,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.id)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.giver, self.recipient)
    }
}

/// 一次執行所載入的輸入
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub participants: Vec<Participant>,
    pub prior: PriorAssignments,
}

/// 分配演算法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Single shuffle, first legal candidate per giver, no backtracking.
    #[default]
    Greedy,
    /// Augmenting-path matching; succeeds whenever a valid assignment exists.
    Matching,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct AssignmentSet {
    pub pairings: Vec<Pairing>,
    pub attempts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_assignments_lookup() {
        let prior: PriorAssignments = [("a@x", "b@x"), ("b@x", "c@x")].into_iter().collect();

        assert_eq!(prior.len(), 2);
        assert_eq!(prior.get("a@x"), Some("b@x"));
        assert_eq!(prior.get("z@x"), None);
        assert!(prior.forbids("b@x", "c@x"));
        assert!(!prior.forbids("b@x", "a@x"));
    }

    #[test]
    fn test_pairing_display() {
        let pairing = Pairing {
            giver: Participant::new("a@x", "Alice"),
            recipient: Participant::new("b@x", "Bob"),
        };
        assert_eq!(pairing.to_string(), "Alice <a@x> -> Bob <b@x>");
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let prior: PriorAssignments = [("a@x", "b@x"), ("a@x", "c@x")].into_iter().collect();

        assert_eq!(prior.len(), 1);
        assert_eq!(prior.get("a@x"), Some("c@x"));
    }
}
