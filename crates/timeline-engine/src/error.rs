//! Error types for timeline-engine operations.

use thiserror::Error;

use crate::model::SprintId;
use crate::sink::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("Not enough time in the project to add another sprint")]
    InsufficientTime,

    #[error("Default sprint end date does not fall after its start date")]
    SprintDatesOverlap,

    #[error("Sprint {0} not found in project")]
    SprintNotFound(SprintId),

    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
