//! Faultline Scorer
//!
//! Judges how faithfully generated knowledge reflects its source incident
//! report.
//!
//! # Overview
//!
//! [`ConsistencyScorer`] asks the completion service for a free-text
//! judgment on three independent [`Dimension`]s. A score is read from each
//! judgment by [`extract_score`] and clamped to `[0, 1]`; the three scores
//! are then mapped onto a [`Verdict`] by a top-down decision table that
//! requires every dimension to meet a tier's threshold. The weighted
//! `overall_score` is reported alongside but never decides the category, so
//! one strong dimension cannot hide a weak one.
//!
//! # Example Usage
//!
//! ```
//! use faultline_llm::MockCompletionClient;
//! use faultline_scorer::{ConfidenceCategory, ConsistencyScorer, ScorerConfig};
//!
//! # async fn example() -> Result<(), faultline_scorer::ScorerError> {
//! let client = MockCompletionClient::new("### Analysis\nConsistent.\n\n### Score:\n0.9");
//! let scorer = ConsistencyScorer::new(client, ScorerConfig::default())?;
//!
//! let verdict = scorer
//!     .score("The DB outage made UDM unavailable.", "DB outage causes UDM unavailability.")
//!     .await;
//! assert_eq!(verdict.category, ConfidenceCategory::HighConfidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extract;
pub mod prompt;
mod scorer;
mod synthesis;
mod types;

pub use config::{DimensionWeights, ScorerConfig};
pub use error::ScorerError;
pub use extract::{clamp_score, extract_score, NEUTRAL_SCORE};
pub use scorer::ConsistencyScorer;
pub use synthesis::{categorize, overall_score, synthesize};
pub use types::{
    ConfidenceCategory, Dimension, HallucinationStatus, ScoreResult, ScoreSource, Verdict,
};
