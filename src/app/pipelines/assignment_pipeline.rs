use crate::adapters::csv_records::{encode_assignments, parse_history, parse_participants};
use crate::core::assigner::{AssignError, Assigner, RandomShuffler};
use crate::core::{AssignmentSet, ConfigProvider, Pipeline, PriorAssignments, Roster, Storage};
use crate::utils::error::{Result, SantaError};

pub struct AssignmentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> AssignmentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn load_history(&self) -> Result<PriorAssignments> {
        let path = self.config.history_path();

        match self.storage.read_file(path).await {
            Ok(data) => parse_history(path, &data),
            // 第一次舉辦時沒有歷史檔
            Err(SantaError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No history file at '{}', starting without prior assignments", path);
                Ok(PriorAssignments::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AssignmentPipeline<S, C> {
    async fn extract(&self) -> Result<Roster> {
        let path = self.config.participants_path();
        tracing::debug!("Reading participants from: {}", path);

        let data = self.storage.read_file(path).await?;
        let participants = parse_participants(path, &data)?;
        let prior = self.load_history().await?;

        Ok(Roster {
            participants,
            prior,
        })
    }

    async fn transform(&self, roster: Roster) -> Result<AssignmentSet> {
        let shuffler = match self.config.seed() {
            Some(seed) => {
                tracing::debug!("Using fixed shuffle seed {}", seed);
                RandomShuffler::seeded(seed)
            }
            None => RandomShuffler::from_entropy(),
        };
        let mut assigner = Assigner::new(shuffler).with_strategy(self.config.strategy());
        let max_attempts = self.config.max_attempts().max(1);

        let mut attempt = 1;
        loop {
            match assigner.generate(&roster.participants, &roster.prior) {
                Ok(pairings) => {
                    return Ok(AssignmentSet {
                        pairings,
                        attempts: attempt,
                    });
                }
                Err(err @ AssignError::Stranded { .. }) if attempt < max_attempts => {
                    tracing::warn!(
                        "🔁 Attempt {}/{} failed: {}; reshuffling",
                        attempt,
                        max_attempts,
                        err
                    );
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!("Giving up after {} attempt(s)", attempt);
                    return Err(err.into());
                }
            }
        }
    }

    async fn load(&self, result: AssignmentSet) -> Result<String> {
        let path = self.config.output_path();
        let data = encode_assignments(&result.pairings, self.config.output_format())?;

        tracing::debug!("Writing {} bytes to {}", data.len(), path);
        self.storage.write_file(path, &data).await?;

        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::AssignmentEngine;
    use crate::core::{OutputFormat, Strategy};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SantaError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        strategy: Strategy,
        max_attempts: usize,
        seed: Option<u64>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                strategy: Strategy::Greedy,
                max_attempts: 1,
                seed: Some(7),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn participants_path(&self) -> &str {
            "current_employee.csv"
        }

        fn history_path(&self) -> &str {
            "previous_employee.csv"
        }

        fn output_path(&self) -> &str {
            "employee.csv"
        }

        fn output_format(&self) -> OutputFormat {
            OutputFormat::Csv
        }

        fn strategy(&self) -> Strategy {
            self.strategy
        }

        fn max_attempts(&self) -> usize {
            self.max_attempts
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }
    }

    const FOUR_PEOPLE: &str = "Employee_Name,Employee_EmailID\n\
Alice,alice@acme.com\n\
Bob,bob@acme.com\n\
Carol,carol@acme.com\n\
Dave,dave@acme.com\n";

    const TWO_PEOPLE: &str = "Employee_Name,Employee_EmailID\n\
Alice,alice@acme.com\n\
Bob,bob@acme.com\n";

    const SWAPPED_HISTORY: &str = "Employee_EmailID,Secret_Child_EmailID\n\
alice@acme.com,bob@acme.com\n\
bob@acme.com,alice@acme.com\n";

    #[tokio::test]
    async fn test_extract_without_history_file() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", FOUR_PEOPLE).await;
        let pipeline = AssignmentPipeline::new(storage, MockConfig::new());

        let roster = pipeline.extract().await.unwrap();

        assert_eq!(roster.participants.len(), 4);
        assert_eq!(roster.participants[0].name, "Alice");
        assert!(roster.prior.is_empty());
    }

    #[tokio::test]
    async fn test_empty_history_file_runs_like_first_round() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", FOUR_PEOPLE).await;
        storage.put_file("previous_employee.csv", "").await;
        let mut config = MockConfig::new();
        config.strategy = Strategy::Matching;
        let engine = AssignmentEngine::new(AssignmentPipeline::new(storage.clone(), config));

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.prior_assignments, 0);
        assert_eq!(summary.participants, 4);
        assert!(storage.get_file("employee.csv").await.is_some());
    }

    #[tokio::test]
    async fn test_extract_reads_history() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", TWO_PEOPLE).await;
        storage.put_file("previous_employee.csv", SWAPPED_HISTORY).await;
        let pipeline = AssignmentPipeline::new(storage, MockConfig::new());

        let roster = pipeline.extract().await.unwrap();

        assert_eq!(roster.prior.len(), 2);
        assert_eq!(roster.prior.get("alice@acme.com"), Some("bob@acme.com"));
    }

    #[tokio::test]
    async fn test_extract_missing_participants_is_error() {
        let pipeline = AssignmentPipeline::new(MockStorage::new(), MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, SantaError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_gives_up_after_max_attempts() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", TWO_PEOPLE).await;
        storage.put_file("previous_employee.csv", SWAPPED_HISTORY).await;
        let mut config = MockConfig::new();
        config.max_attempts = 3;
        let pipeline = AssignmentPipeline::new(storage, config);

        let roster = pipeline.extract().await.unwrap();
        let err = pipeline.transform(roster).await.unwrap_err();

        assert!(matches!(
            err,
            SantaError::AssignmentError(AssignError::Stranded { .. })
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_transform_retries_until_success() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", FOUR_PEOPLE).await;
        let mut config = MockConfig::new();
        config.max_attempts = 25;
        let pipeline = AssignmentPipeline::new(storage, config);

        let roster = pipeline.extract().await.unwrap();
        let result = pipeline.transform(roster).await.unwrap();

        assert_eq!(result.pairings.len(), 4);
        assert!((1..=25).contains(&result.attempts));
    }

    #[tokio::test]
    async fn test_matching_strategy_succeeds_first_attempt() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", FOUR_PEOPLE).await;
        let mut config = MockConfig::new();
        config.strategy = Strategy::Matching;
        let pipeline = AssignmentPipeline::new(storage, config);

        let roster = pipeline.extract().await.unwrap();
        let result = pipeline.transform(roster).await.unwrap();

        assert_eq!(result.attempts, 1);
    }

    #[tokio::test]
    async fn test_engine_writes_complete_assignment() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", FOUR_PEOPLE).await;
        let mut config = MockConfig::new();
        config.strategy = Strategy::Matching;
        let engine = AssignmentEngine::new(AssignmentPipeline::new(storage.clone(), config));

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.output_path, "employee.csv");
        assert_eq!(summary.participants, 4);

        let written = storage.get_file("employee.csv").await.unwrap();
        let prior = parse_history("employee.csv", &written).unwrap();
        assert_eq!(prior.len(), 4);

        let recipients: HashSet<&str> = ["alice", "bob", "carol", "dave"]
            .iter()
            .filter_map(|name| prior.get(&format!("{}@acme.com", name)))
            .collect();
        assert_eq!(recipients.len(), 4);
    }

    #[tokio::test]
    async fn test_engine_writes_nothing_on_failure() {
        let storage = MockStorage::new();
        storage.put_file("current_employee.csv", TWO_PEOPLE).await;
        storage.put_file("previous_employee.csv", SWAPPED_HISTORY).await;
        let engine = AssignmentEngine::new(AssignmentPipeline::new(
            storage.clone(),
            MockConfig::new(),
        ));

        assert!(engine.run().await.is_err());
        assert!(storage.get_file("employee.csv").await.is_none());
    }
}
