//! Verdict synthesis from per-dimension scores

use crate::config::DimensionWeights;
use crate::extract::NEUTRAL_SCORE;
use crate::types::{
    ConfidenceCategory, Dimension, HallucinationStatus, ScoreResult, ScoreSource, Verdict,
};
use std::collections::BTreeMap;

struct Rule {
    threshold: f64,
    category: ConfidenceCategory,
    status: HallucinationStatus,
    recommendation: &'static str,
}

/// Checked top to bottom; the first rule whose threshold every dimension meets wins.
const DECISION_TABLE: [Rule; 4] = [
    Rule {
        threshold: 0.8,
        category: ConfidenceCategory::HighConfidence,
        status: HallucinationStatus::NoHallucination,
        recommendation: "Accept: the generated knowledge is consistent with the source",
    },
    Rule {
        threshold: 0.7,
        category: ConfidenceCategory::MediumConfidence,
        status: HallucinationStatus::LikelyNoHallucination,
        recommendation: "Accept after a light review of individual claims",
    },
    Rule {
        threshold: 0.6,
        category: ConfidenceCategory::LowConfidence,
        status: HallucinationStatus::PotentialHallucination,
        recommendation: "Review manually before use: some claims may not be supported",
    },
    Rule {
        threshold: 0.5,
        category: ConfidenceCategory::Uncertain,
        status: HallucinationStatus::UncertainHallucination,
        recommendation: "Verify every claim against the source before use",
    },
];

const FALLBACK_RECOMMENDATION: &str =
    "Reject or regenerate: the generated knowledge is likely hallucinated";

/// Map three dimension scores onto a category and hallucination status
pub fn categorize(
    factual: f64,
    reasoning: f64,
    fundamental: f64,
) -> (ConfidenceCategory, HallucinationStatus, &'static str) {
    let lowest = factual.min(reasoning).min(fundamental);
    DECISION_TABLE
        .iter()
        .find(|rule| lowest >= rule.threshold)
        .map(|rule| (rule.category, rule.status, rule.recommendation))
        .unwrap_or((
            ConfidenceCategory::HighUncertainty,
            HallucinationStatus::LikelyHallucination,
            FALLBACK_RECOMMENDATION,
        ))
}

/// Weighted sum of the dimension scores
pub fn overall_score(scores: &BTreeMap<Dimension, f64>, weights: &DimensionWeights) -> f64 {
    Dimension::ALL
        .iter()
        .map(|d| scores.get(d).copied().unwrap_or(0.0) * weights.weight(*d))
        .sum()
}

/// Build a verdict from one result per dimension
///
/// A dimension without a result is treated as a neutral 0.5.
pub fn synthesize(results: &[ScoreResult], weights: DimensionWeights) -> Verdict {
    let mut detailed_scores = BTreeMap::new();
    let mut detailed_analysis = BTreeMap::new();
    let mut score_sources = BTreeMap::new();

    for dimension in Dimension::ALL {
        match results.iter().find(|r| r.dimension == dimension) {
            Some(result) => {
                detailed_scores.insert(dimension, result.score);
                detailed_analysis.insert(dimension, result.analysis.clone());
                score_sources.insert(dimension, result.source);
            }
            None => {
                detailed_scores.insert(dimension, NEUTRAL_SCORE);
                detailed_analysis.insert(dimension, String::new());
                score_sources.insert(dimension, ScoreSource::Default);
            }
        }
    }

    let score = |d: Dimension| detailed_scores[&d];
    let (category, hallucination_status, recommendation) = categorize(
        score(Dimension::FactualConsistency),
        score(Dimension::ReasoningQuality),
        score(Dimension::FundamentalErrors),
    );

    Verdict {
        overall_score: overall_score(&detailed_scores, &weights),
        category,
        hallucination_status,
        recommendation: recommendation.to_string(),
        detailed_scores,
        detailed_analysis,
        score_sources,
        weights_used: weights,
    }
}
