//! End-to-end batch runs over a deterministic completion client

mod common;

use common::{documents, init_tracing, oversized, runner, scripted_client, FailingStore, POISON};
use faultline_batch::{CheckpointKey, CheckpointStore, MemoryCheckpointStore};
use faultline_domain::Document;

#[tokio::test]
async fn test_twelve_documents_checkpoint_at_five_and_ten() {
    init_tracing();
    let client = scripted_client();
    let store = MemoryCheckpointStore::new();
    let runner = runner(&client, store.clone(), 5);

    let state = runner.process(&documents(12)).await;

    let mut keys: Vec<String> = store.keys().iter().map(|k| k.to_string()).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["batch_results_partial_10_of_12", "batch_results_partial_5_of_12"]
    );

    let first = store
        .load(&CheckpointKey::progress("batch_results", 5, 12))
        .await
        .unwrap()
        .unwrap();
    assert!(first.is_partial);
    assert_eq!(first.results.len(), 5);
    assert_eq!(first.summary.progress, "5/12");
    assert_eq!(first.summary.processed_texts, 5);

    let report = state.report();
    assert!(!report.is_partial);
    assert_eq!(report.summary.processed_texts, 12);
    assert_eq!(report.summary.success_count, 12);
    assert_eq!(report.summary.failure_count, 0);
    assert_eq!(report.summary.total_entities, 24);
    assert_eq!(report.summary.total_relations, 24);
    assert_eq!(report.summary.total_descriptions, 12);
    assert_eq!(report.summary.success_rate, 1.0);
    assert_eq!(report.summary.progress, "12/12");

    let indices: Vec<usize> = report.results.iter().map(|r| r.document_index).collect();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_blank_documents_are_skipped() {
    init_tracing();
    let client = scripted_client();
    let store = MemoryCheckpointStore::new();
    let runner = runner(&client, store.clone(), 5);

    let mut docs = documents(12);
    docs[4] = Document::new(4, "   ");
    docs[7] = Document::missing(7);

    let state = runner.process(&docs).await;

    assert_eq!(state.processed(), 10);
    assert_eq!(state.success_count(), 10);
    assert_eq!(state.failure_count(), 0);
    assert!(state.results().iter().all(|r| r.document_index != 4 && r.document_index != 7));

    // Position 4 was skipped, so nothing was appended there and no checkpoint was taken.
    let keys: Vec<String> = store.keys().iter().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["batch_results_partial_10_of_12"]);

    let checkpoint = store
        .load(&CheckpointKey::progress("batch_results", 10, 12))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(checkpoint.summary.processed_texts, 8);
}

#[tokio::test]
async fn test_failing_document_does_not_abort_batch() {
    init_tracing();
    let client = scripted_client();
    let runner = runner(&client, MemoryCheckpointStore::new(), 5);

    let mut docs = documents(6);
    docs[2] = oversized(2);

    let state = runner.process(&docs).await;

    assert_eq!(state.processed(), 6);
    assert_eq!(state.success_count(), 5);
    assert_eq!(state.failure_count(), 1);

    let failed = &state.results()[2];
    assert!(!failed.success);
    assert!(failed.error.as_deref().unwrap().starts_with("Text too long"));

    // Failed documents contribute nothing to the totals.
    assert_eq!(state.total_entities(), 10);
    assert!((state.success_rate() - 5.0 / 6.0).abs() < 1e-9);
    assert_eq!(client.call_count(), 5 * 4);
}

#[tokio::test]
async fn test_unreachable_service_yields_empty_success() {
    init_tracing();
    let client = scripted_client();
    let runner = runner(&client, MemoryCheckpointStore::new(), 5);

    let mut docs = documents(6);
    docs[2] = Document::new(2, format!("{} corrupted report", POISON));

    let state = runner.process(&docs).await;

    assert_eq!(state.success_count(), 6);
    assert_eq!(state.failure_count(), 0);

    let degraded = &state.results()[2];
    assert!(degraded.success);
    assert_eq!(degraded.metadata.total_entities, 0);
    assert_eq!(degraded.metadata.total_relations, 0);
    assert_eq!(state.total_entities(), 10);
}

#[tokio::test]
async fn test_checkpoint_failure_does_not_abort_batch() {
    init_tracing();
    let client = scripted_client();
    let runner = runner(&client, FailingStore, 2);

    let state = runner.process(&documents(7)).await;

    assert!(!state.is_partial());
    assert_eq!(state.processed(), 7);
    assert_eq!(state.success_count(), 7);
}

#[tokio::test]
async fn test_empty_collection() {
    let client = scripted_client();
    let store = MemoryCheckpointStore::new();
    let runner = runner(&client, store.clone(), 5);

    let state = runner.process(&[]).await;

    assert_eq!(state.processed(), 0);
    assert_eq!(state.success_rate(), 0.0);
    assert!(store.is_empty());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    use faultline_batch::{BatchConfig, BatchError, BatchRunner};
    use faultline_extractor::{ExtractionPipeline, ExtractorConfig};

    let pipeline = ExtractionPipeline::new(scripted_client(), ExtractorConfig::default()).unwrap();
    let config = BatchConfig {
        checkpoint_interval: 0,
        ..Default::default()
    };

    let result = BatchRunner::new(pipeline, MemoryCheckpointStore::new(), config);
    assert!(matches!(result, Err(BatchError::Config(_))));
}
