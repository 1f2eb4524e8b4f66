//! Validated admission policy.

use std::time::Duration;

use crate::config::GovernorConfig;
use crate::error::{Error, Result};

/// Immutable admission policy supplied at controller construction.
///
/// Construction validates the configuration and fails fast: an invalid
/// policy is a fatal startup error for the owning service, never a
/// runtime one.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Maximum requests admitted per client per window
    max_requests: u64,
    /// Window length
    window: Duration,
    /// Advisory retry delay returned to rejected clients
    retry_after_secs: u64,
}

impl Policy {
    /// Create a new policy.
    ///
    /// Fails with [`Error::Config`] if `max_requests` is zero or
    /// `window_secs` is not a positive, finite number representable as a
    /// duration.
    pub fn new(max_requests: u64, window_secs: f64, retry_after_secs: u64) -> Result<Self> {
        if max_requests == 0 {
            return Err(Error::Config(
                "max_requests_per_window must be positive".to_string(),
            ));
        }
        if !window_secs.is_finite() || window_secs <= 0.0 {
            return Err(Error::Config(format!(
                "window_secs must be a positive, finite number (got {})",
                window_secs
            )));
        }
        let window = Duration::try_from_secs_f64(window_secs).map_err(|_| {
            Error::Config(format!(
                "window_secs is out of range for a duration (got {})",
                window_secs
            ))
        })?;

        Ok(Self {
            max_requests,
            window,
            retry_after_secs,
        })
    }

    /// Maximum requests admitted per client per window.
    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Length of the counting window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Advisory retry delay for rejected clients.
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after_secs
    }
}

impl TryFrom<&GovernorConfig> for Policy {
    type Error = Error;

    fn try_from(config: &GovernorConfig) -> Result<Self> {
        Self::new(
            config.max_requests_per_window,
            config.window_secs,
            config.retry_after_secs,
        )
    }
}
