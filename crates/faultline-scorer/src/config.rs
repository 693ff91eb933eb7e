//! Configuration for the consistency scorer

use crate::types::Dimension;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weights of the reference `overall_score`
///
/// The weights never influence the verdict category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    /// Weight of factual consistency
    pub factual_consistency: f64,

    /// Weight of reasoning quality
    pub reasoning_quality: f64,

    /// Weight of the fundamental-errors check
    pub fundamental_errors: f64,
}

impl DimensionWeights {
    /// Weight of one dimension
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::FactualConsistency => self.factual_consistency,
            Dimension::ReasoningQuality => self.reasoning_quality,
            Dimension::FundamentalErrors => self.fundamental_errors,
        }
    }

    /// Validate that weights are non-negative and sum to 1
    pub fn validate(&self) -> Result<(), String> {
        let weights = Dimension::ALL.map(|d| self.weight(d));
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("weights must be finite and non-negative".to_string());
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(format!("weights must sum to 1.0, got {}", sum));
        }
        Ok(())
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            factual_consistency: 0.25,
            reasoning_quality: 0.25,
            fundamental_errors: 0.5,
        }
    }
}

/// Configuration for the consistency scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Output budget for each dimension's judgment
    pub max_tokens: u32,

    /// Sampling temperature for judgments
    pub temperature: f32,

    /// Maximum time for a single completion call (seconds)
    pub call_timeout_secs: u64,

    /// Weights of the reference score
    pub weights: DimensionWeights,
}

impl ScorerConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        self.weights.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.3,
            call_timeout_secs: 120,
            weights: DimensionWeights::default(),
        }
    }
}
