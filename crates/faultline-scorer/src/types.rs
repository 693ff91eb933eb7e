//! Scoring data types

use crate::config::DimensionWeights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An axis along which generated knowledge is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Agreement of stated facts with the source
    FactualConsistency,

    /// Soundness of causal and logical claims
    ReasoningQuality,

    /// Absence of fundamental errors (inverted entities, invented causes)
    FundamentalErrors,
}

impl Dimension {
    /// All dimensions in evaluation order
    pub const ALL: [Dimension; 3] = [
        Dimension::FactualConsistency,
        Dimension::ReasoningQuality,
        Dimension::FundamentalErrors,
    ];

    /// Get the dimension label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::FactualConsistency => "factual_consistency",
            Dimension::ReasoningQuality => "reasoning_quality",
            Dimension::FundamentalErrors => "fundamental_errors",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a dimension score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// A labeled score field in the judgment
    Labeled,

    /// A bare decimal found elsewhere in the judgment
    Fallback,

    /// No score found; the neutral default was used
    Default,

    /// The evaluation call failed; the neutral default was used
    Error,
}

impl ScoreSource {
    /// Whether the score was substituted rather than read from a judgment
    pub fn is_substituted(&self) -> bool {
        matches!(self, ScoreSource::Default | ScoreSource::Error)
    }
}

/// Score for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Evaluated dimension
    pub dimension: Dimension,

    /// Score in [0, 1]
    pub score: f64,

    /// Free-text judgment, or the failure message
    pub analysis: String,

    /// How `score` was obtained
    pub source: ScoreSource,
}

/// Verdict bucket, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceCategory {
    /// Every dimension at least 0.8
    HighConfidence,

    /// Every dimension at least 0.7
    MediumConfidence,

    /// Every dimension at least 0.6
    LowConfidence,

    /// Every dimension at least 0.5
    Uncertain,

    /// Some dimension below 0.5
    HighUncertainty,
}

impl ConfidenceCategory {
    /// Ordinal where larger is better
    pub fn rank(&self) -> u8 {
        match self {
            ConfidenceCategory::HighConfidence => 4,
            ConfidenceCategory::MediumConfidence => 3,
            ConfidenceCategory::LowConfidence => 2,
            ConfidenceCategory::Uncertain => 1,
            ConfidenceCategory::HighUncertainty => 0,
        }
    }

    /// Get the category label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceCategory::HighConfidence => "high_confidence",
            ConfidenceCategory::MediumConfidence => "medium_confidence",
            ConfidenceCategory::LowConfidence => "low_confidence",
            ConfidenceCategory::Uncertain => "uncertain",
            ConfidenceCategory::HighUncertainty => "high_uncertainty",
        }
    }
}

/// Hallucination assessment paired with a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallucinationStatus {
    /// No hallucination
    NoHallucination,

    /// Probably no hallucination
    LikelyNoHallucination,

    /// Possible hallucination, needs review
    PotentialHallucination,

    /// Cannot tell
    UncertainHallucination,

    /// Probably hallucinated
    LikelyHallucination,
}

impl HallucinationStatus {
    /// Get the status label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HallucinationStatus::NoHallucination => "no_hallucination",
            HallucinationStatus::LikelyNoHallucination => "likely_no_hallucination",
            HallucinationStatus::PotentialHallucination => "potential_hallucination",
            HallucinationStatus::UncertainHallucination => "uncertain_hallucination",
            HallucinationStatus::LikelyHallucination => "likely_hallucination",
        }
    }
}

/// Synthesized judgment over all three dimensions
///
/// Built in one step from three [`ScoreResult`]s and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Weighted score, for reference only
    pub overall_score: f64,

    /// Decision-table bucket
    pub category: ConfidenceCategory,

    /// Hallucination assessment for the bucket
    pub hallucination_status: HallucinationStatus,

    /// Suggested follow-up
    pub recommendation: String,

    /// Score per dimension
    pub detailed_scores: BTreeMap<Dimension, f64>,

    /// Judgment text per dimension
    pub detailed_analysis: BTreeMap<Dimension, String>,

    /// Provenance of each score
    pub score_sources: BTreeMap<Dimension, ScoreSource>,

    /// Weights behind `overall_score`
    pub weights_used: DimensionWeights,
}

impl Verdict {
    /// Score of one dimension
    pub fn score(&self, dimension: Dimension) -> Option<f64> {
        self.detailed_scores.get(&dimension).copied()
    }

    /// Dimensions whose score was substituted with the neutral default
    pub fn substituted_dimensions(&self) -> Vec<Dimension> {
        self.score_sources
            .iter()
            .filter(|(_, source)| source.is_substituted())
            .map(|(dimension, _)| *dimension)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_rank_order() {
        assert!(ConfidenceCategory::HighConfidence.rank() > ConfidenceCategory::MediumConfidence.rank());
        assert!(ConfidenceCategory::Uncertain.rank() > ConfidenceCategory::HighUncertainty.rank());
    }

    #[test]
    fn test_substituted_sources() {
        assert!(ScoreSource::Default.is_substituted());
        assert!(ScoreSource::Error.is_substituted());
        assert!(!ScoreSource::Labeled.is_substituted());
        assert!(!ScoreSource::Fallback.is_substituted());
    }

    #[test]
    fn test_verdict_json_uses_snake_case_keys() {
        let verdict = Verdict {
            overall_score: 0.75,
            category: ConfidenceCategory::LowConfidence,
            hallucination_status: HallucinationStatus::PotentialHallucination,
            recommendation: "Review".to_string(),
            detailed_scores: Dimension::ALL.into_iter().map(|d| (d, 0.75)).collect(),
            detailed_analysis: BTreeMap::new(),
            score_sources: Dimension::ALL
                .into_iter()
                .map(|d| (d, ScoreSource::Labeled))
                .collect(),
            weights_used: DimensionWeights::default(),
        };

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["category"], "low_confidence");
        assert_eq!(json["hallucination_status"], "potential_hallucination");
        assert_eq!(json["detailed_scores"]["fundamental_errors"], 0.75);
        assert_eq!(json["score_sources"]["reasoning_quality"], "labeled");
        assert_eq!(json["weights_used"]["fundamental_errors"], 0.5);

        let parsed: Verdict = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, verdict);
    }
}
