use thiserror::Error;

use crate::domain::SubmissionStatus;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DesignError {
    #[error("Design not found: {0}")]
    NotFound(String),
    #[error("Design validation error: {0}")]
    ValidationError(String),
    #[error("Submission already reviewed: {0:?}")]
    AlreadyReviewed(SubmissionStatus),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
