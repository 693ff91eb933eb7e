//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and
//! infrastructure. Implementations live in other crates.

use crate::{BatchReport, CheckpointKey};
use async_trait::async_trait;

/// Remote text-completion service
///
/// Implemented by the infrastructure layer (faultline-llm)
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Error type for transport or provider failures
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Complete `prompt`, bounded by `max_output_tokens`, sampled at `temperature`
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error>;
}

/// Durable storage for partial batch reports
///
/// Implemented by the infrastructure layer (faultline-batch)
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Error type for persistence failures
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Persist `report` under `key`, replacing any previous value
    async fn save(&self, key: &CheckpointKey, report: &BatchReport) -> Result<(), Self::Error>;

    /// Load the report stored under `key`, if any
    async fn load(&self, key: &CheckpointKey) -> Result<Option<BatchReport>, Self::Error>;
}
