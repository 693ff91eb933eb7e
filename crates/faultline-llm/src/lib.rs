//! Faultline LLM Provider Layer
//!
//! Implementations of the [`CompletionClient`] trait from `faultline-domain`.
//!
//! # Providers
//!
//! - `MockCompletionClient`: Deterministic mock for testing and offline runs
//!
//! # Examples
//!
//! ```
//! use faultline_llm::MockCompletionClient;
//! use faultline_domain::CompletionClient;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let client = MockCompletionClient::new("Hello from LLM!");
//! let result = rt.block_on(client.complete("test prompt", 100, 0.7)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod mock;

use thiserror::Error;

pub use faultline_domain::CompletionClient;
pub use mock::{MockCompletionClient, RecordedCall};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}
