//! Description generation stage
//!
//! Every complete triple gets two completion calls: one canonical sentence
//! and one JSON array of paraphrases. Neither call can fail the stage. A
//! failed canonical call falls back to a plain sentence built from the
//! triple, and a failed or unparseable paraphrase call leaves the variants
//! empty.

use crate::client::Completer;
use crate::config::ExtractorConfig;
use crate::parser::{parse_variations, sanitize, ParseOutcome};
use crate::prompt::{description_prompt, variation_prompt};
use faultline_domain::{CompletionClient, RelationDescription, RelationTriple};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Descriptions for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionOutput {
    /// One entry per complete triple, in input order
    pub descriptions: Vec<RelationDescription>,

    /// Deduplicated union of every generated sentence
    pub sentences: BTreeSet<String>,
}

/// Generates natural-language sentences for extracted triples
pub struct DescriptionGenerationStage<C> {
    completer: Completer<C>,
    description_max_tokens: u32,
    description_temperature: f32,
    variation_max_tokens: u32,
    variation_temperature: f32,
}

impl<C: CompletionClient> DescriptionGenerationStage<C> {
    /// Create the stage over a shared client
    pub fn new(client: Arc<C>, config: &ExtractorConfig) -> Self {
        Self {
            completer: Completer::new(client, config.call_timeout()),
            description_max_tokens: config.description_max_tokens,
            description_temperature: config.description_temperature,
            variation_max_tokens: config.variation_max_tokens,
            variation_temperature: config.variation_temperature,
        }
    }

    /// Describe every complete triple in `relations`, using `context` as grounding
    pub async fn describe(&self, relations: &[RelationTriple], context: &str) -> DescriptionOutput {
        let mut descriptions = Vec::new();

        for relation in relations {
            if !relation.is_complete() {
                debug!("Skipping incomplete relation {}", relation);
                continue;
            }

            let detailed = self.canonical(relation, context).await;
            let variations = self.variations(relation, context).await;
            descriptions.push(RelationDescription::new(relation.clone(), detailed, variations));
        }

        let sentences = aggregate_sentences(&descriptions);
        debug!(
            "Described {} of {} relations ({} distinct sentences)",
            descriptions.len(),
            relations.len(),
            sentences.len()
        );

        DescriptionOutput {
            descriptions,
            sentences,
        }
    }

    async fn canonical(&self, relation: &RelationTriple, context: &str) -> String {
        let prompt = description_prompt(relation, context);
        let response = self
            .completer
            .complete(&prompt, self.description_max_tokens, self.description_temperature)
            .await;

        match response.map(|text| sanitize(&text)) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                warn!("Empty description for {}, using fallback sentence", relation);
                fallback_sentence(relation)
            }
            Err(e) => {
                warn!("Description call failed for {}, using fallback sentence: {}", relation, e);
                fallback_sentence(relation)
            }
        }
    }

    async fn variations(&self, relation: &RelationTriple, context: &str) -> Vec<String> {
        let prompt = variation_prompt(relation, context);
        let response = match self
            .completer
            .complete(&prompt, self.variation_max_tokens, self.variation_temperature)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Variation call failed for {}: {}", relation, e);
                return Vec::new();
            }
        };

        match parse_variations(&response) {
            ParseOutcome::Parsed(variations) => variations,
            ParseOutcome::Failed(reason) => {
                warn!("Variation payload for {} could not be parsed: {}", relation, reason);
                Vec::new()
            }
        }
    }
}

/// Plain sentence stating a complete triple: `"<source> <verb> <target>."`
pub fn fallback_sentence(relation: &RelationTriple) -> String {
    let verb = relation
        .relation_type
        .map(|r| r.verb())
        .unwrap_or("relates to");
    format!("{} {} {}.", relation.source, verb, relation.target)
}

/// Pool every description's sentences into one deduplicated set
pub fn aggregate_sentences(descriptions: &[RelationDescription]) -> BTreeSet<String> {
    descriptions
        .iter()
        .flat_map(|d| d.all_descriptions.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{DESCRIPTION_TASK, VARIATION_TASK};
    use faultline_domain::RelationType;
    use faultline_llm::{LlmError, MockCompletionClient};

    fn stage(client: &MockCompletionClient) -> DescriptionGenerationStage<MockCompletionClient> {
        DescriptionGenerationStage::new(Arc::new(client.clone()), &ExtractorConfig::default())
    }

    fn causes() -> RelationTriple {
        RelationTriple::new("DB outage", "UDM failure", RelationType::Causes)
    }

    #[tokio::test]
    async fn test_two_calls_per_complete_triple() {
        let client = MockCompletionClient::default();
        client.add_response(DESCRIPTION_TASK, "The DB outage caused the UDM failure.");
        client.add_response(
            VARIATION_TASK,
            r#"["UDM failed because the DB went down.", "The DB outage caused the UDM failure."]"#,
        );

        let output = stage(&client).describe(&[causes()], "context").await;

        assert_eq!(client.call_count(), 2);
        let calls = client.calls();
        assert_eq!(calls[0].max_output_tokens, 200);
        assert_eq!(calls[0].temperature, 0.7);
        assert_eq!(calls[1].max_output_tokens, 300);
        assert_eq!(calls[1].temperature, 0.8);

        assert_eq!(output.descriptions.len(), 1);
        let description = &output.descriptions[0];
        assert_eq!(description.detailed_description, "The DB outage caused the UDM failure.");
        assert_eq!(description.variations.len(), 2);
        assert_eq!(description.all_descriptions.len(), 2);
        assert_eq!(output.sentences, description.all_descriptions);
    }

    #[tokio::test]
    async fn test_incomplete_triples_are_skipped() {
        let client = MockCompletionClient::new("[]");
        let relations = vec![
            RelationTriple::new("", "UDM failure", RelationType::Causes),
            RelationTriple {
                source: "alarm".to_string(),
                target: "engineer".to_string(),
                relation_type: None,
            },
        ];

        let output = stage(&client).describe(&relations, "context").await;

        assert!(output.descriptions.is_empty());
        assert!(output.sentences.is_empty());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_variations_are_empty() {
        let client = MockCompletionClient::default();
        client.add_response(DESCRIPTION_TASK, "The DB outage caused the UDM failure.");
        client.add_response(VARIATION_TASK, "1. One way\n2. Another way");

        let output = stage(&client).describe(&[causes()], "context").await;

        let description = &output.descriptions[0];
        assert!(description.variations.is_empty());
        assert_eq!(output.sentences.len(), 1);
    }

    #[tokio::test]
    async fn test_canonical_failure_uses_fallback_sentence() {
        let client = MockCompletionClient::default();
        client.add_error(DESCRIPTION_TASK, LlmError::Communication("reset".to_string()));
        client.add_error(VARIATION_TASK, LlmError::RateLimitExceeded);

        let output = stage(&client).describe(&[causes()], "context").await;

        let description = &output.descriptions[0];
        assert_eq!(description.detailed_description, "DB outage causes UDM failure.");
        assert!(description.variations.is_empty());
        assert!(description.all_descriptions.contains("DB outage causes UDM failure."));
    }

    #[tokio::test]
    async fn test_blank_canonical_uses_fallback_sentence() {
        let client = MockCompletionClient::default();
        client.add_response(DESCRIPTION_TASK, "   ");
        client.add_response(VARIATION_TASK, "[]");

        let output = stage(&client).describe(&[causes()], "context").await;
        assert_eq!(
            output.descriptions[0].detailed_description,
            "DB outage causes UDM failure."
        );
    }

    #[test]
    fn test_aggregate_sentences_pools_across_relations() {
        let first = RelationDescription::new(causes(), "A.", vec!["B.".to_string()]);
        let second = RelationDescription::new(
            RelationTriple::new("engineer", "UDM", RelationType::Recovers),
            "C.",
            vec!["A.".to_string()],
        );

        let sentences = aggregate_sentences(&[first, second]);
        assert_eq!(sentences.into_iter().collect::<Vec<_>>(), vec!["A.", "B.", "C."]);
    }
}
