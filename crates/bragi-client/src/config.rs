//! Workbench configuration.
//!
//! Loaded from `~/.bragi/config.yaml` when present, with the executor
//! endpoint overridable via `BRAGI_ENDPOINT`. Missing file means
//! defaults; a malformed file is an error rather than a silent fallback.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bragi_hal::{ExecError, ExecResult, PollConfig};

use crate::http::DEFAULT_ENDPOINT;

/// Workbench settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Executor endpoint URL.
    pub endpoint: String,
    /// Default shot count for submissions.
    pub shots: u32,
    /// Seconds between job status polls.
    pub poll_interval_secs: u64,
    /// Overall seconds to wait for a job before giving up.
    pub wait_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            shots: 1,
            poll_interval_secs: 2,
            wait_timeout_secs: 600,
        }
    }
}

impl Config {
    /// Load configuration from disk and environment.
    pub fn load() -> ExecResult<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path).map_err(|e| {
                    ExecError::Configuration(format!("failed to read {}: {e}", path.display()))
                })?;
                serde_yaml_ng::from_str(&raw).map_err(|e| {
                    ExecError::Configuration(format!("invalid config {}: {e}", path.display()))
                })?
            }
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var("BRAGI_ENDPOINT") {
            config.endpoint = endpoint;
        }

        Ok(config)
    }

    /// Polling parameters derived from this configuration.
    pub fn poll(&self) -> PollConfig {
        PollConfig::default()
            .with_interval(Duration::from_secs(self.poll_interval_secs))
            .with_timeout(Duration::from_secs(self.wait_timeout_secs))
    }

    /// Location of the config file (`~/.bragi/config.yaml`).
    fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".bragi").join("config.yaml"))
    }
}
