use thiserror::Error;

use crate::domain::{DomainError, ValidationError};

/// Errors a batch operation can report back to the user.
/// Neither kind is fatal; the session keeps going after either.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot calculate: {0}")]
    Domain(#[from] DomainError),
}
