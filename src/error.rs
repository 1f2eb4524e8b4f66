//! Error types for the Turnstile admission controller.

use thiserror::Error;

/// Main error type for admission control operations.
///
/// Rejecting a request is not an error: rejection is an expected,
/// high-frequency outcome surfaced as an ordinary
/// [`Decision`](crate::admission::Decision) return value.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for admission control operations.
pub type Result<T> = std::result::Result<T, Error>;
