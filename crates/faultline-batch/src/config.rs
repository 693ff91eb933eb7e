//! Configuration for batch runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Checkpoint after every this many documents (by input position)
    pub checkpoint_interval: usize,

    /// Prefix of checkpoint keys
    pub run_name: String,

    /// Directory used by the file checkpoint store
    pub checkpoint_dir: PathBuf,
}

impl BatchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.checkpoint_interval == 0 {
            return Err("checkpoint_interval must be greater than 0".to_string());
        }
        if self.run_name.trim().is_empty() {
            return Err("run_name cannot be empty".to_string());
        }
        if self.run_name.contains(['/', '\\']) {
            return Err("run_name cannot contain path separators".to_string());
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

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 5,
            run_name: "batch_results".to_string(),
            checkpoint_dir: PathBuf::from("checkpoints"),
        }
    }
}
