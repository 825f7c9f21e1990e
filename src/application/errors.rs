//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Generation(#[from] crate::core::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Target {0} is out of date")]
    OutOfDate(std::path::PathBuf),
}

/// Validation errors for pipeline requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid marker: {0}")]
    InvalidMarker(String),
}
