//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum document length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single completion call (seconds)
    pub call_timeout_secs: u64,

    /// Output budget for entity extraction
    pub entity_max_tokens: u32,

    /// Output budget for relation extraction
    pub relation_max_tokens: u32,

    /// Output budget for a canonical description
    pub description_max_tokens: u32,

    /// Output budget for a set of paraphrase variants
    pub variation_max_tokens: u32,

    /// Sampling temperature for entity and relation extraction
    pub extraction_temperature: f32,

    /// Sampling temperature for canonical descriptions
    pub description_temperature: f32,

    /// Sampling temperature for paraphrase variants
    pub variation_temperature: f32,

    /// Characters kept in `DocumentResult::text_preview`
    pub preview_chars: usize,
}

impl ExtractorConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        for (name, tokens) in [
            ("entity_max_tokens", self.entity_max_tokens),
            ("relation_max_tokens", self.relation_max_tokens),
            ("description_max_tokens", self.description_max_tokens),
            ("variation_max_tokens", self.variation_max_tokens),
        ] {
            if tokens == 0 {
                return Err(format!("{} must be greater than 0", name));
            }
        }
        for (name, temperature) in [
            ("extraction_temperature", self.extraction_temperature),
            ("description_temperature", self.description_temperature),
            ("variation_temperature", self.variation_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!("{} must be between 0.0 and 2.0", name));
            }
        }
        Ok(())
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            call_timeout_secs: 120,
            entity_max_tokens: 2000,
            relation_max_tokens: 2000,
            description_max_tokens: 200,
            variation_max_tokens: 300,
            extraction_temperature: 0.7,
            description_temperature: 0.7,
            variation_temperature: 0.8,
            preview_chars: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.call_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_token_budget() {
        let config = ExtractorConfig {
            variation_max_tokens: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("variation_max_tokens"));
    }

    #[test]
    fn test_invalid_temperature() {
        let config = ExtractorConfig {
            description_temperature: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("call_timeout_secs = 30").unwrap();
        assert_eq!(parsed.call_timeout_secs, 30);
        assert_eq!(parsed.entity_max_tokens, 2000);
    }
}
