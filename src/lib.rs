pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::app::pipelines::assignment_pipeline::AssignmentPipeline;
pub use crate::config::Settings;
pub use crate::core::assigner::{AssignError, Assigner, PoolShuffler, RandomShuffler};
pub use crate::core::engine::{AssignmentEngine, RunSummary};
pub use crate::domain::model::{Pairing, Participant, PriorAssignments, Strategy};
pub use crate::utils::error::{Result, SantaError};
