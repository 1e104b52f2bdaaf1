//! Configuration file
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/infoshare",
//!   "backend": "file",
//!   "log_level": "info",
//!   "log_target": "stderr"
//! }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::{LogTarget, Severity};

/// Which state backend to boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Durable append-only log under `data_dir`
    #[default]
    File,
    /// Process-lifetime map; nothing survives exit
    Memory,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    #[serde(default)]
    pub backend: BackendKind,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log target for non-error lines (default "stderr")
    #[serde(default = "default_log_target")]
    pub log_target: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_target() -> String {
    "stderr".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config("data_dir must not be empty"));
        }
        self.min_severity()?;
        self.target()?;
        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn min_severity(&self) -> CliResult<Severity> {
        Severity::from_name(&self.log_level).ok_or_else(|| {
            CliError::config(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    pub fn target(&self) -> CliResult<LogTarget> {
        LogTarget::from_name(&self.log_target).ok_or_else(|| {
            CliError::config(format!(
                "Invalid log_target: '{}'. Must be 'stdout' or 'stderr'.",
                self.log_target
            ))
        })
    }
}
