//! Error types for batch processing

use thiserror::Error;

/// Errors that can occur while loading input or persisting batch state
#[derive(Error, Debug)]
pub enum BatchError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(String),

    /// Batch input did not have a usable shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Checkpoint could not be stored or located
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BatchError {
    fn from(e: serde_json::Error) -> Self {
        BatchError::Json(e.to_string())
    }
}
