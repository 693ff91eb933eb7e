//! Relation extraction stage

use crate::client::Completer;
use crate::config::ExtractorConfig;
use crate::parser::{parse_relations, ParseOutcome};
use crate::prompt::relation_prompt;
use faultline_domain::{CompletionClient, EntityMap, RelationTriple};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns report text plus its entities into typed triples with one completion call
///
/// Triples are returned as the service produced them. Whether `source` and
/// `target` name known entities is not checked.
pub struct RelationExtractionStage<C> {
    completer: Completer<C>,
    max_tokens: u32,
    temperature: f32,
}

impl<C: CompletionClient> RelationExtractionStage<C> {
    /// Create the stage over a shared client
    pub fn new(client: Arc<C>, config: &ExtractorConfig) -> Self {
        Self {
            completer: Completer::new(client, config.call_timeout()),
            max_tokens: config.relation_max_tokens,
            temperature: config.extraction_temperature,
        }
    }

    /// Extract relations from `text` among `entities`
    ///
    /// A transport error, a timeout or a payload that is not a JSON array
    /// yields an empty list.
    pub async fn extract(&self, text: &str, entities: &EntityMap) -> Vec<RelationTriple> {
        let prompt = relation_prompt(text, &entities.names());
        let response = match self
            .completer
            .complete(&prompt, self.max_tokens, self.temperature)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Relation extraction failed, continuing with no relations: {}", e);
                return Vec::new();
            }
        };

        match parse_relations(&response) {
            ParseOutcome::Parsed(relations) => {
                debug!("Extracted {} relations", relations.len());
                relations
            }
            ParseOutcome::Failed(reason) => {
                warn!("Relation payload could not be parsed, continuing with no relations: {}", reason);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RELATION_TASK;
    use faultline_domain::{EntityCategory, RelationType};
    use faultline_llm::{LlmError, MockCompletionClient};

    fn stage(client: &MockCompletionClient) -> RelationExtractionStage<MockCompletionClient> {
        RelationExtractionStage::new(Arc::new(client.clone()), &ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_prompt_carries_flattened_entities() {
        let client = MockCompletionClient::new(
            r#"[{"source": "DB outage", "target": "UDM", "relation_type": "AFFECTS"}]"#,
        );
        let entities: EntityMap = vec![
            (EntityCategory::Cause, vec!["DB outage".to_string()]),
            (EntityCategory::NetworkElement, vec!["UDM".to_string()]),
        ]
        .into_iter()
        .collect();

        let relations = stage(&client).extract("report", &entities).await;

        assert_eq!(
            relations,
            vec![RelationTriple::new("DB outage", "UDM", RelationType::Affects)]
        );

        let prompt = &client.calls()[0].prompt;
        assert!(prompt.starts_with(RELATION_TASK));
        let udm = prompt.find("- UDM\n").unwrap();
        let cause = prompt.find("- DB outage\n").unwrap();
        assert!(udm < cause, "entities follow canonical category order");
    }

    #[tokio::test]
    async fn test_object_payload_is_empty() {
        let client = MockCompletionClient::new(r#"{"relations": "none"}"#);
        let relations = stage(&client).extract("report", &EntityMap::new()).await;
        assert!(relations.is_empty());
    }

    #[tokio::test]
    async fn test_untrusted_endpoints_are_kept() {
        let client = MockCompletionClient::new(
            r#"[{"source": "someone else", "target": "UDM", "relation_type": "MONITORS"}]"#,
        );
        let relations = stage(&client).extract("report", &EntityMap::new()).await;
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].source, "someone else");
    }

    #[tokio::test]
    async fn test_transport_error_is_empty() {
        let client = MockCompletionClient::default();
        client.add_error(RELATION_TASK, LlmError::Communication("connection reset".to_string()));

        let relations = stage(&client).extract("report", &EntityMap::new()).await;
        assert!(relations.is_empty());
    }
}
