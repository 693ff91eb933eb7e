//! Faultline Batch
//!
//! Runs the extraction pipeline over document collections with periodic,
//! resumable checkpoints.
//!
//! # Overview
//!
//! [`BatchRunner`] owns the only mutable [`BatchState`] of a run and appends
//! one `DocumentResult` per document with usable text, in input order. Every
//! `checkpoint_interval` positions it hands a partial report to a
//! [`CheckpointStore`]; a later run can pick up from that report with
//! [`BatchRunner::resume`] or [`BatchRunner::resume_from_key`]. Counters
//! are always recomputed from the result sequence, so a resumed run reports
//! exactly what an uninterrupted one would.
//!
//! # Example Usage
//!
//! ```no_run
//! use faultline_batch::{load_documents, write_report, BatchConfig, BatchRunner, FileCheckpointStore};
//! use faultline_extractor::{ExtractionPipeline, ExtractorConfig};
//! use faultline_llm::MockCompletionClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let documents = load_documents("incidents.json").await?;
//!
//! let config = BatchConfig::default();
//! let pipeline = ExtractionPipeline::new(MockCompletionClient::new("[]"), ExtractorConfig::default())?;
//! let store = FileCheckpointStore::new(&config.checkpoint_dir);
//! let runner = BatchRunner::new(pipeline, store, config)?;
//!
//! let state = runner.process(&documents).await;
//! write_report("batch_results.json", &state.report()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod checkpoint;
mod config;
mod error;
mod input;
mod runner;

pub use checkpoint::{read_report, write_report, FileCheckpointStore, MemoryCheckpointStore};
pub use config::BatchConfig;
pub use error::BatchError;
pub use input::{load_documents, parse_documents};
pub use runner::BatchRunner;

pub use faultline_domain::{BatchReport, BatchState, BatchSummary, CheckpointKey, CheckpointStore};
