use crate::core::{AssignmentSet, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

/// Outcome of a full extract → assign → load run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub participants: usize,
    pub prior_assignments: usize,
    pub attempts: usize,
}

pub struct AssignmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AssignmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and assign without writing anything.
    pub async fn preview(&self) -> Result<AssignmentSet> {
        let roster = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} participants, {} prior assignments",
            roster.participants.len(),
            roster.prior.len()
        );
        self.pipeline.transform(roster).await
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("🎁 Starting secret santa assignment");

        // Extract
        tracing::info!("📥 Loading participants and history...");
        let roster = self.pipeline.extract().await?;
        let participants = roster.participants.len();
        let prior_assignments = roster.prior.len();
        tracing::info!(
            "Loaded {} participants, {} prior assignments ({:?})",
            participants,
            prior_assignments,
            started.elapsed()
        );

        // Transform
        tracing::info!("🎲 Generating assignments...");
        let result = self.pipeline.transform(roster).await?;
        let attempts = result.attempts;
        tracing::info!(
            "Generated {} pairings in {} attempt(s) ({:?})",
            result.pairings.len(),
            attempts,
            started.elapsed()
        );

        // Load：只有完整成功的分配才會寫出
        tracing::info!("💾 Writing assignments...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(RunSummary {
            output_path,
            participants,
            prior_assignments,
            attempts,
        })
    }
}
