//! Error types for the pipeline

use forcescan_domain::ValidationError;
use forcescan_scanner::ScanError;
use forcescan_synthesizer::SynthesizerError;
use thiserror::Error;

/// Stage-fatal pipeline errors
///
/// A checkpoint rejection is not represented here: it is a valid terminal
/// outcome of a run, not a fault.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The plan failed configuration validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The scan stage failed (every category down)
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// The synthesis stage failed
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesizerError),

    /// Writing packaged artifacts failed
    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::Output(e.to_string())
    }
}
