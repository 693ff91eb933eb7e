//! Score extraction from free-text judgments
//!
//! A labeled `Score:` field (optionally a markdown heading, English or
//! Chinese label) wins. Otherwise the first bare decimal in [0, 1] is used.
//! Otherwise the score is the neutral 0.5. Whatever is found is clamped to
//! [0, 1].

use crate::types::ScoreSource;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Score used when a judgment carries no readable score
pub const NEUTRAL_SCORE: f64 = 0.5;

static LABELED_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*#{0,6}\s*\**\s*(?:score|评分)\s*\**\s*[:：]\s*\**\s*([0-9]+(?:\.[0-9]+)?|\.[0-9]+)")
        .expect("labeled score pattern is valid")
});

static BARE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(0\.[0-9]+|1\.0+)\b").expect("bare decimal pattern is valid"));

/// Extract a score from `response`, reporting which rule produced it
pub fn extract_score(response: &str) -> (f64, ScoreSource) {
    if let Some(score) = first_number(&LABELED_SCORE, response) {
        return (clamp_score(score), ScoreSource::Labeled);
    }

    if let Some(score) = first_number(&BARE_DECIMAL, response) {
        debug!("Using unlabeled score {}", score);
        return (clamp_score(score), ScoreSource::Fallback);
    }

    warn!("No score found in judgment, using {}", NEUTRAL_SCORE);
    (NEUTRAL_SCORE, ScoreSource::Default)
}

/// Clamp into [0, 1]; NaN becomes the neutral score
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        NEUTRAL_SCORE
    } else {
        score.clamp(0.0, 1.0)
    }
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| m.as_str().parse::<f64>().ok())
}
