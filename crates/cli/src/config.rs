//! Configuration format for `clearance`.
//!
//! # Example
//!
//! ```toml
//! [rules]
//! weight_tolerance_percent = 10
//! weight_validation = true
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use clearance_eval::RuleConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from the file passed via `--config`.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceConfig {
    pub rules: RuleConfig,
    pub logging: LoggingConfig,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<ClearanceConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}
