//! Batch state, summaries and checkpoint keys
//!
//! [`BatchState`] owns the ordered, append-only result sequence of one batch
//! run. Every aggregate counter is derived by folding over that sequence at
//! report time, so a state rebuilt from a checkpoint reports exactly what the
//! original run would have.

use crate::DocumentResult;
use serde::{Deserialize, Serialize};

/// Append-only results of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchState {
    total_documents: usize,
    results: Vec<DocumentResult>,
    is_partial: bool,
}

impl BatchState {
    /// Create an empty, in-progress state for a collection of `total_documents`
    pub fn new(total_documents: usize) -> Self {
        Self {
            total_documents,
            results: Vec::new(),
            is_partial: true,
        }
    }

    /// Rebuild a state from a persisted report
    ///
    /// The report's results are trusted verbatim; the total is taken from
    /// its summary.
    pub fn from_report(report: BatchReport) -> Self {
        Self {
            total_documents: report.summary.total_texts,
            results: report.results,
            is_partial: report.is_partial,
        }
    }

    /// Append one document result
    pub fn record(&mut self, result: DocumentResult) {
        self.results.push(result);
    }

    /// Results in processing order
    pub fn results(&self) -> &[DocumentResult] {
        &self.results
    }

    /// Number of results recorded so far
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Size of the input collection
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Whether the run is still in progress
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// Results with `success == true`
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Results with `success == false`
    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    /// Entities across successful results
    pub fn total_entities(&self) -> usize {
        self.successes().map(|r| r.metadata.total_entities).sum()
    }

    /// Relations across successful results
    pub fn total_relations(&self) -> usize {
        self.successes().map(|r| r.metadata.total_relations).sum()
    }

    /// Descriptions across successful results
    pub fn total_descriptions(&self) -> usize {
        self.successes()
            .map(|r| r.metadata.descriptions_generated)
            .sum()
    }

    /// Fraction of recorded results that succeeded, 0 when nothing was recorded
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            self.success_count() as f64 / self.results.len() as f64
        }
    }

    /// Summary with the given absolute progress position
    pub fn summary(&self, done: usize) -> BatchSummary {
        BatchSummary {
            total_texts: self.total_documents,
            processed_texts: self.processed(),
            success_count: self.success_count(),
            failure_count: self.failure_count(),
            total_entities: self.total_entities(),
            total_relations: self.total_relations(),
            total_descriptions: self.total_descriptions(),
            success_rate: self.success_rate(),
            progress: format!("{}/{}", done, self.total_documents),
        }
    }

    /// Partial report for a checkpoint taken at absolute position `done`
    pub fn snapshot(&self, done: usize) -> BatchReport {
        BatchReport {
            summary: self.summary(done),
            results: self.results.clone(),
            is_partial: true,
        }
    }

    /// Mark the run finished
    pub fn into_complete(mut self) -> Self {
        self.is_partial = false;
        self
    }

    /// Report reflecting the current state
    ///
    /// A finished state reports progress as `total/total`; an unfinished one
    /// reports the number of results recorded.
    pub fn report(&self) -> BatchReport {
        let done = if self.is_partial {
            self.processed()
        } else {
            self.total_documents
        };

        BatchReport {
            summary: self.summary(done),
            results: self.results.clone(),
            is_partial: self.is_partial,
        }
    }

    fn successes(&self) -> impl Iterator<Item = &DocumentResult> {
        self.results.iter().filter(|r| r.success)
    }
}

/// Aggregate counters of a batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Documents in the input collection
    pub total_texts: usize,

    /// Results recorded (skipped documents excluded)
    pub processed_texts: usize,

    /// Successful results
    pub success_count: usize,

    /// Failed results
    pub failure_count: usize,

    /// Entities across successful results
    pub total_entities: usize,

    /// Relations across successful results
    pub total_relations: usize,

    /// Descriptions across successful results
    pub total_descriptions: usize,

    /// `success_count / processed_texts`, 0 when nothing was processed
    pub success_rate: f64,

    /// `"<done>/<total>"`
    pub progress: String,
}

/// Checkpoint or final report of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Aggregate counters
    pub summary: BatchSummary,

    /// Per-document results in processing order
    pub results: Vec<DocumentResult>,

    /// Whether this is an intermediate checkpoint
    pub is_partial: bool,
}

/// Opaque identifier of a persisted checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckpointKey(String);

impl CheckpointKey {
    /// Wrap an arbitrary key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key embedding run progress: `<run>_partial_<done>_of_<total>`
    pub fn progress(run_name: &str, done: usize, total: usize) -> Self {
        Self(format!("{}_partial_{}_of_{}", run_name, done, total))
    }

    /// The key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckpointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckpointKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
