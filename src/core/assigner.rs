use crate::domain::model::{Pairing, Participant, PriorAssignments, Strategy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("no valid recipient left for {giver_name} <{giver_id}>")]
    Stranded { giver_id: String, giver_name: String },

    #[error("participant list is empty")]
    EmptyRoster,
}

impl AssignError {
    fn stranded(giver: &Participant) -> Self {
        AssignError::Stranded {
            giver_id: giver.id.clone(),
            giver_name: giver.name.clone(),
        }
    }
}

/// 候選池的洗牌來源，測試時可注入固定順序
pub trait PoolShuffler {
    /// Permute `pool` (indices into the participant list) in place.
    fn shuffle_pool(&mut self, pool: &mut [usize]);
}

impl<S: PoolShuffler + ?Sized> PoolShuffler for &mut S {
    fn shuffle_pool(&mut self, pool: &mut [usize]) {
        (**self).shuffle_pool(pool);
    }
}

/// Uniform Fisher-Yates shuffle backed by any `rand::Rng`.
#[derive(Debug, Clone)]
pub struct RandomShuffler<R> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PoolShuffler for RandomShuffler<R> {
    fn shuffle_pool(&mut self, pool: &mut [usize]) {
        pool.shuffle(&mut self.rng);
    }
}

pub struct Assigner<S: PoolShuffler> {
    shuffler: S,
    strategy: Strategy,
}

impl<S: PoolShuffler> Assigner<S> {
    pub fn new(shuffler: S) -> Self {
        Self {
            shuffler,
            strategy: Strategy::Greedy,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Pair every participant (as giver, in input order) with a recipient.
    ///
    /// The candidate pool is shuffled exactly once per call. With
    /// [`Strategy::Greedy`] a giver whose remaining candidates are all illegal
    /// fails the whole call, even if a different earlier choice would have
    /// left a legal one.
    pub fn generate(
        &mut self,
        participants: &[Participant],
        prior: &PriorAssignments,
    ) -> Result<Vec<Pairing>, AssignError> {
        if participants.is_empty() {
            return Err(AssignError::EmptyRoster);
        }

        let mut pool: Vec<usize> = (0..participants.len()).collect();
        self.shuffler.shuffle_pool(&mut pool);

        match self.strategy {
            Strategy::Greedy => assign_greedy(participants, prior, &pool),
            Strategy::Matching => assign_matching(participants, prior, &pool),
        }
    }
}

/// One greedy attempt with a fresh shuffle drawn from `rng`.
pub fn generate<R: Rng>(
    participants: &[Participant],
    prior: &PriorAssignments,
    rng: &mut R,
) -> Result<Vec<Pairing>, AssignError> {
    Assigner::new(RandomShuffler::new(rng)).generate(participants, prior)
}

fn is_allowed(giver: &Participant, candidate: &Participant, prior: &PriorAssignments) -> bool {
    giver.id != candidate.id && !prior.forbids(&giver.id, &candidate.id)
}

fn assign_greedy(
    participants: &[Participant],
    prior: &PriorAssignments,
    pool: &[usize],
) -> Result<Vec<Pairing>, AssignError> {
    // taken[slot] 取代從 pool 中刪除，保留洗牌後的順序
    let mut taken = vec![false; pool.len()];
    let mut first_free = 0;
    let mut pairings = Vec::with_capacity(participants.len());

    for giver in participants {
        while first_free < pool.len() && taken[first_free] {
            first_free += 1;
        }

        let slot = (first_free..pool.len())
            .find(|&slot| !taken[slot] && is_allowed(giver, &participants[pool[slot]], prior))
            .ok_or_else(|| AssignError::stranded(giver))?;

        taken[slot] = true;
        pairings.push(Pairing {
            giver: giver.clone(),
            recipient: participants[pool[slot]].clone(),
        });
    }

    Ok(pairings)
}

struct Matcher<'a> {
    participants: &'a [Participant],
    prior: &'a PriorAssignments,
    pool: &'a [usize],
    // recipient index -> giver index
    owner: Vec<Option<usize>>,
}

impl Matcher<'_> {
    fn allowed(&self, giver: usize, recipient: usize) -> bool {
        is_allowed(
            &self.participants[giver],
            &self.participants[recipient],
            self.prior,
        )
    }

    fn augment(&mut self, giver: usize, visited: &mut [bool]) -> bool {
        let pool = self.pool;

        // 先拿仍空著的候選，避免不必要的深層遞迴
        for &recipient in pool {
            if self.owner[recipient].is_none() && !visited[recipient] && self.allowed(giver, recipient)
            {
                visited[recipient] = true;
                self.owner[recipient] = Some(giver);
                return true;
            }
        }

        for &recipient in pool {
            if visited[recipient] || !self.allowed(giver, recipient) {
                continue;
            }
            visited[recipient] = true;

            let free = match self.owner[recipient] {
                None => true,
                Some(current) => self.augment(current, visited),
            };
            if free {
                self.owner[recipient] = Some(giver);
                return true;
            }
        }
        false
    }
}

fn assign_matching(
    participants: &[Participant],
    prior: &PriorAssignments,
    pool: &[usize],
) -> Result<Vec<Pairing>, AssignError> {
    let n = participants.len();
    let mut matcher = Matcher {
        participants,
        prior,
        pool,
        owner: vec![None; n],
    };

    for giver in 0..n {
        let mut visited = vec![false; n];
        // 無法擴增的 giver 之後也不可能被配對
        if !matcher.augment(giver, &mut visited) {
            return Err(AssignError::stranded(&participants[giver]));
        }
    }

    let mut recipient_of = vec![0; n];
    for (recipient, giver) in matcher.owner.iter().enumerate() {
        if let Some(giver) = giver {
            recipient_of[*giver] = recipient;
        }
    }

    Ok(participants
        .iter()
        .zip(recipient_of)
        .map(|(giver, recipient)| Pairing {
            giver: giver.clone(),
            recipient: participants[recipient].clone(),
        })
        .collect())
}
