//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that can occur during synthesis
///
/// Per-cluster oracle failures are absorbed into degraded forces rather than
/// surfaced here; these variants cover stage-fatal conditions and internal
/// validation only.
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Oracle call failed
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Oracle call exceeded the configured timeout
    #[error("Oracle timeout")]
    Timeout,

    /// Oracle output did not have the expected shape
    #[error("Invalid oracle output: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SynthesizerError {
    fn from(e: serde_json::Error) -> Self {
        SynthesizerError::InvalidFormat(format!("JSON parse error: {}", e))
    }
}
