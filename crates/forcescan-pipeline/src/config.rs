//! Configuration for the pipeline

use forcescan_scanner::ScanConfig;
use forcescan_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Whether Checkpoint 2 (force review) runs; Checkpoint 1 always does
    pub review_forces: bool,

    /// Scan coordinator settings
    pub scan: ScanConfig,

    /// Synthesizer settings
    pub synthesizer: SynthesizerConfig,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.scan.validate()?;
        self.synthesizer.validate()?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            review_forces: true,
            scan: ScanConfig::default(),
            synthesizer: SynthesizerConfig::default(),
        }
    }
}
