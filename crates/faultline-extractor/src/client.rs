//! Timeout-bounded access to the completion service

use crate::error::ExtractorError;
use faultline_domain::CompletionClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Shared completion client with a per-call timeout
pub(crate) struct Completer<C> {
    client: Arc<C>,
    timeout: Duration,
}

impl<C> Clone for Completer<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            timeout: self.timeout,
        }
    }
}

impl<C: CompletionClient> Completer<C> {
    pub(crate) fn new(client: Arc<C>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Issue one completion call, mapping transport failures and expiry to errors
    pub(crate) async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, ExtractorError> {
        timeout(
            self.timeout,
            self.client.complete(prompt, max_output_tokens, temperature),
        )
        .await
        .map_err(|_| ExtractorError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}
