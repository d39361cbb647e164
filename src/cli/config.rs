//! Configuration file handling
//!
//! The config is a single JSON object. Only `data_file` is required.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mirror::DEFAULT_MIRROR_URL;
use crate::observability::Severity;
use crate::query::{QueryDefaults, DEFAULT_LIMIT};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON data file holding every paste (required)
    pub data_file: String,

    /// Page size when a query names none (default 10)
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// Largest page a query may ask for (default: no cap)
    #[serde(default)]
    pub max_limit: Option<i64>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Endpoint new pastes are mirrored to.
    ///
    /// Only read when a caller hands [`crate::cli::add`] a transport. The
    /// `pastedb` binary ships no HTTP transport, so its `add` never mirrors.
    #[serde(default = "default_mirror_url")]
    pub mirror_url: String,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_mirror_url() -> String {
    DEFAULT_MIRROR_URL.to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.default_limit == 0 {
            return Err(CliError::config_error("default_limit must not be 0"));
        }

        if let Some(max) = self.max_limit {
            if max <= 0 {
                return Err(CliError::config_error("max_limit must be > 0"));
            }
            if self.default_limit < 0 || self.default_limit > max {
                return Err(CliError::config_error(format!(
                    "default_limit {} exceeds max_limit {}",
                    self.default_limit, max
                )));
            }
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            )));
        }

        if !(self.mirror_url.starts_with("http://") || self.mirror_url.starts_with("https://")) {
            return Err(CliError::config_error(format!(
                "Invalid mirror_url: '{}'",
                self.mirror_url
            )));
        }

        Ok(())
    }

    /// Get data file as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_file)
    }

    /// Paging limits for the service
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }

    /// Parsed `log_level`; validated on load
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}
