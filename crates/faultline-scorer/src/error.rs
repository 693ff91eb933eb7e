//! Error types for consistency scoring

use thiserror::Error;

/// Errors that can occur while evaluating one dimension
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorerError {
    /// Completion service transport or provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Completion call exceeded the configured timeout
    #[error("LLM call timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
