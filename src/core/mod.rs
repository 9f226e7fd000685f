pub mod assigner;
pub mod engine;

pub use crate::domain::model::{
    AssignmentSet, OutputFormat, Pairing, Participant, PriorAssignments, Roster, Strategy,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
