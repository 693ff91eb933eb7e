//! Entity extraction stage

use crate::client::Completer;
use crate::config::ExtractorConfig;
use crate::parser::{parse_entity_map, ParseOutcome};
use crate::prompt::entity_prompt;
use faultline_domain::{CompletionClient, EntityMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns report text into category-scoped entity names with one completion call
pub struct EntityExtractionStage<C> {
    completer: Completer<C>,
    max_tokens: u32,
    temperature: f32,
}

impl<C: CompletionClient> EntityExtractionStage<C> {
    /// Create the stage over a shared client
    pub fn new(client: Arc<C>, config: &ExtractorConfig) -> Self {
        Self {
            completer: Completer::new(client, config.call_timeout()),
            max_tokens: config.entity_max_tokens,
            temperature: config.extraction_temperature,
        }
    }

    /// Extract entities from `text`
    ///
    /// Never fails: a transport error, a timeout or an unparseable payload
    /// all yield an empty map.
    pub async fn extract(&self, text: &str) -> EntityMap {
        let prompt = entity_prompt(text);
        let response = match self
            .completer
            .complete(&prompt, self.max_tokens, self.temperature)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Entity extraction failed, continuing with no entities: {}", e);
                return EntityMap::new();
            }
        };

        match parse_entity_map(&response) {
            ParseOutcome::Parsed(entities) => {
                debug!("Extracted {} entities", entities.total());
                entities
            }
            ParseOutcome::Failed(reason) => {
                warn!("Entity payload could not be parsed, continuing with no entities: {}", reason);
                EntityMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ENTITY_TASK;
    use faultline_domain::EntityCategory;
    use faultline_llm::{LlmError, MockCompletionClient};

    fn stage(client: &MockCompletionClient) -> EntityExtractionStage<MockCompletionClient> {
        EntityExtractionStage::new(Arc::new(client.clone()), &ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_extracts_fenced_payload() {
        let client = MockCompletionClient::new(
            "```json\n{\"network_element\": [\"UDM\"], \"person\": [\"engineer\"]}\n```",
        );

        let entities = stage(&client).extract("UDM failed").await;

        assert_eq!(entities.get(EntityCategory::NetworkElement), ["UDM"]);
        assert_eq!(entities.total(), 2);

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.starts_with(ENTITY_TASK));
        assert_eq!(calls[0].max_output_tokens, 2000);
        assert_eq!(calls[0].temperature, 0.7);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_empty() {
        let client = MockCompletionClient::new("I could not find any entities.");
        let entities = stage(&client).extract("text").await;
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_empty() {
        let client = MockCompletionClient::default();
        client.add_error(ENTITY_TASK, LlmError::RateLimitExceeded);

        let entities = stage(&client).extract("text").await;
        assert!(entities.is_empty());
        assert_eq!(client.call_count(), 1);
    }
}
