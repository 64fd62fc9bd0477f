use thiserror::Error;

use crate::error::ValidationErrors;
use crate::resume::ResumeId;

use super::repository::RepositoryError;

/// Failure of a resume use case.
///
/// This is where validation outcomes become ordinary errors: a caller of
/// the service gets `Err` with a descriptive message rather than an
/// outcome to inspect.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("resume is invalid: {}", .0.messages().join("; "))]
    Invalid(ValidationErrors),

    #[error("resume {0} not found")]
    NotFound(ResumeId),

    #[error("update must be a JSON object, got {0}")]
    InvalidPatch(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// The validation issues behind an [`ServiceError::Invalid`].
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
