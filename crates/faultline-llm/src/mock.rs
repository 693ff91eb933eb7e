//! Deterministic completion client

use crate::LlmError;
use async_trait::async_trait;
use faultline_domain::CompletionClient;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(LlmError),
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    reply: Reply,
}

/// One call received by a [`MockCompletionClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Prompt text
    pub prompt: String,

    /// Requested output budget
    pub max_output_tokens: u32,

    /// Requested sampling temperature
    pub temperature: f32,
}

/// Mock completion client for deterministic testing
///
/// Replies are chosen by substring match against the prompt. Rules added
/// later take precedence over earlier ones; a prompt matching no rule gets
/// the default response. Clones share rules and the call log.
///
/// # Examples
///
/// ```
/// use faultline_llm::{LlmError, MockCompletionClient};
/// use faultline_domain::CompletionClient;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let client = MockCompletionClient::default();
/// client.add_response("entities", r#"{"alarm": ["UDM down"]}"#);
/// client.add_error("relations", LlmError::RateLimitExceeded);
///
/// let reply = rt.block_on(client.complete("extract entities", 100, 0.7)).unwrap();
/// assert_eq!(reply, r#"{"alarm": ["UDM down"]}"#);
/// assert!(rt.block_on(client.complete("extract relations", 100, 0.7)).is_err());
/// assert_eq!(client.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    default_response: String,
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    latency: Option<Duration>,
}

impl MockCompletionClient {
    /// Create a client with a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: None,
        }
    }

    /// Delay every reply by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Reply with `response` to prompts containing `needle`
    pub fn add_response(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.push_rule(needle.into(), Reply::Text(response.into()));
    }

    /// Fail prompts containing `needle` with `error`
    pub fn add_error(&self, needle: impl Into<String>, error: LlmError) {
        self.push_rule(needle.into(), Reply::Fail(error));
    }

    /// Remove every rule, keeping the default response
    pub fn clear_rules(&self) {
        lock(&self.rules).clear();
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Calls received, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    fn push_rule(&self, needle: String, reply: Reply) {
        lock(&self.rules).push(Rule { needle, reply });
    }

    fn reply_for(&self, prompt: &str) -> Reply {
        lock(&self.rules)
            .iter()
            .rev()
            .find(|rule| prompt.contains(&rule.needle))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| Reply::Text(self.default_response.clone()))
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    type Error = LlmError;

    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error> {
        lock(&self.calls).push(RecordedCall {
            prompt: prompt.to_string(),
            max_output_tokens,
            temperature,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.reply_for(prompt) {
            Reply::Text(text) => Ok(text),
            Reply::Fail(error) => {
                debug!("Mock completion failing: {}", error);
                Err(error)
            }
        }
    }
}

// A panicking test must not poison the mock for the tests sharing it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
