//! Batch runner with periodic checkpoints and resume

use crate::config::BatchConfig;
use crate::error::BatchError;
use faultline_domain::{BatchState, CheckpointKey, CheckpointStore, CompletionClient, Document};
use faultline_extractor::ExtractionPipeline;
use tracing::{error, info, warn};

/// Drives the extraction pipeline over an ordered document collection
///
/// Documents are processed one at a time in input order. After the result
/// for the document at position `i` is appended, a partial checkpoint is
/// saved whenever `(i + 1) % checkpoint_interval == 0`. Documents without
/// usable text are skipped: they produce no result and never trigger a
/// checkpoint. Neither document failures nor checkpoint failures stop the run.
pub struct BatchRunner<C, S> {
    pipeline: ExtractionPipeline<C>,
    store: S,
    config: BatchConfig,
}

impl<C, S> BatchRunner<C, S>
where
    C: CompletionClient,
    S: CheckpointStore,
{
    /// Create a runner, validating `config`
    pub fn new(
        pipeline: ExtractionPipeline<C>,
        store: S,
        config: BatchConfig,
    ) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        Ok(Self {
            pipeline,
            store,
            config,
        })
    }

    /// Checkpoint store used by this runner
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runner configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process every document from the start
    pub async fn process(&self, documents: &[Document]) -> BatchState {
        info!(
            "Starting batch of {} documents (checkpoint every {})",
            documents.len(),
            self.config.checkpoint_interval
        );
        self.run(documents, BatchState::new(documents.len())).await
    }

    /// Continue a partial run
    ///
    /// The results in `state` are trusted as-is and processing resumes at
    /// the position after the last recorded document. A state that is not
    /// partial, or holds no results, starts over.
    pub async fn resume(&self, documents: &[Document], state: BatchState) -> BatchState {
        if !state.is_partial() || state.processed() == 0 {
            warn!("Checkpoint is not a usable partial run, processing from the start");
            return self.process(documents).await;
        }

        let state = if state.total_documents() == documents.len() {
            state
        } else {
            warn!(
                "Checkpoint was taken over {} documents but {} were supplied",
                state.total_documents(),
                documents.len()
            );
            let mut rebased = BatchState::new(documents.len());
            for result in state.results() {
                rebased.record(result.clone());
            }
            rebased
        };

        info!(
            "Resuming batch at {}/{} ({} results recorded)",
            resume_position(&state),
            documents.len(),
            state.processed()
        );
        self.run(documents, state).await
    }

    /// Continue from the checkpoint stored under `key`
    ///
    /// A missing or unreadable checkpoint starts the run over.
    pub async fn resume_from_key(&self, documents: &[Document], key: &CheckpointKey) -> BatchState {
        match self.store.load(key).await {
            Ok(Some(report)) => {
                info!("Loaded checkpoint {} ({} results)", key, report.results.len());
                self.resume(documents, BatchState::from_report(report)).await
            }
            Ok(None) => {
                warn!("Checkpoint {} not found, processing from the start", key);
                self.process(documents).await
            }
            Err(e) => {
                warn!("Checkpoint {} could not be read, processing from the start: {}", key, e);
                self.process(documents).await
            }
        }
    }

    async fn run(&self, documents: &[Document], mut state: BatchState) -> BatchState {
        let interval = self.config.checkpoint_interval;
        let start = resume_position(&state);

        for (position, document) in documents.iter().enumerate().skip(start) {
            let Some(text) = document.usable_text() else {
                warn!("Skipping document {}: missing or blank text", position);
                continue;
            };

            let result = self.pipeline.run(document.index, text).await;
            state.record(result);

            if (position + 1) % interval == 0 {
                self.checkpoint(&state, position + 1).await;
            }
        }

        let state = state.into_complete();
        info!(
            "Batch complete: {} processed, {} succeeded, {} failed, {} entities, {} relations, {} descriptions",
            state.processed(),
            state.success_count(),
            state.failure_count(),
            state.total_entities(),
            state.total_relations(),
            state.total_descriptions()
        );
        state
    }

    async fn checkpoint(&self, state: &BatchState, done: usize) {
        let key = CheckpointKey::progress(&self.config.run_name, done, state.total_documents());
        match self.store.save(&key, &state.snapshot(done)).await {
            Ok(()) => info!("Saved checkpoint {} ({} results)", key, state.processed()),
            Err(e) => error!("Failed to save checkpoint {}, continuing: {}", key, e),
        }
    }
}

/// Input position following the last recorded document
///
/// Skipped documents leave no result, so this can run ahead of
/// `state.processed()`.
fn resume_position(state: &BatchState) -> usize {
    state
        .results()
        .last()
        .map_or(0, |result| result.document_index + 1)
}
