//! Shared fixtures for batch integration tests

#![allow(dead_code)]

use faultline_batch::{BatchConfig, BatchError, BatchReport, BatchRunner, CheckpointKey, CheckpointStore};
use faultline_domain::Document;
use faultline_extractor::prompt::{DESCRIPTION_TASK, ENTITY_TASK, RELATION_TASK, VARIATION_TASK};
use faultline_extractor::{ExtractionPipeline, ExtractorConfig};
use faultline_llm::{LlmError, MockCompletionClient};

/// Marker that makes every completion call for a document fail
pub const POISON: &str = "POISON-PILL";

/// Length guard used by [`runner`]
pub const MAX_TEXT_LENGTH: usize = 200;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic client: two entities, two relations (one incomplete), one described
pub fn scripted_client() -> MockCompletionClient {
    let client = MockCompletionClient::default();
    client.add_response(
        ENTITY_TASK,
        r#"{"network_element": ["UDM"], "cause": ["DB outage"]}"#,
    );
    client.add_response(
        RELATION_TASK,
        r#"[
            {"source": "DB outage", "target": "UDM", "relation_type": "AFFECTS"},
            {"source": "DB outage", "target": "", "relation_type": "CAUSES"}
        ]"#,
    );
    client.add_response(DESCRIPTION_TASK, "The DB outage affected the UDM.");
    client.add_response(
        VARIATION_TASK,
        r#"["UDM was affected by the DB outage.", "The UDM suffered from the DB outage."]"#,
    );
    client.add_error(POISON, LlmError::Communication("upstream closed connection".to_string()));
    client
}

pub fn documents(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| Document::new(i, format!("Incident {}: UDM unavailable after DB outage.", i)))
        .collect()
}

/// Document rejected by the length guard
pub fn oversized(index: usize) -> Document {
    Document::new(index, "UDM alarm storm. ".repeat(MAX_TEXT_LENGTH))
}

pub fn runner<S: CheckpointStore>(
    client: &MockCompletionClient,
    store: S,
    interval: usize,
) -> BatchRunner<MockCompletionClient, S> {
    let extractor = ExtractorConfig {
        max_text_length: MAX_TEXT_LENGTH,
        ..Default::default()
    };
    let pipeline = ExtractionPipeline::new(client.clone(), extractor).unwrap();
    let config = BatchConfig {
        checkpoint_interval: interval,
        ..Default::default()
    };
    BatchRunner::new(pipeline, store, config).unwrap()
}

/// Store whose writes always fail
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait::async_trait]
impl CheckpointStore for FailingStore {
    type Error = BatchError;

    async fn save(&self, key: &CheckpointKey, _report: &BatchReport) -> Result<(), Self::Error> {
        Err(BatchError::Checkpoint(format!("disk full while writing {}", key)))
    }

    async fn load(&self, key: &CheckpointKey) -> Result<Option<BatchReport>, Self::Error> {
        Err(BatchError::Checkpoint(format!("cannot read {}", key)))
    }
}
