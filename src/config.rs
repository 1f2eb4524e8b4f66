//! Configuration management for Turnstile.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};

/// Configuration for the request-rate governor.
///
/// All fields have defaults so a partial configuration file is valid.
/// Values are validated when a [`Policy`](crate::admission::Policy) is
/// built from this configuration, not at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Maximum requests admitted per client per window
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u64,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,

    /// Advisory `Retry-After` value returned to rejected clients
    #[serde(default = "default_retry_after_secs")]
    pub retry_after_secs: u64,

    /// Tracked-client count that triggers an opportunistic eviction pass
    #[serde(default = "default_max_tracked_clients")]
    pub max_tracked_clients: usize,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            max_requests_per_window: default_max_requests(),
            window_secs: default_window_secs(),
            retry_after_secs: default_retry_after_secs(),
            max_tracked_clients: default_max_tracked_clients(),
        }
    }
}

fn default_max_requests() -> u64 {
    100
}

fn default_window_secs() -> f64 {
    60.0
}

fn default_retry_after_secs() -> u64 {
    60
}

fn default_max_tracked_clients() -> usize {
    10_000
}

impl GovernorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading governor configuration");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse governor config: {}", e)))
    }
}
