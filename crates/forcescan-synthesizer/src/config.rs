//! Configuration for the Synthesizer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Snippet similarity above which two findings from the same source are
    /// considered duplicates (token Jaccard, 0.0-1.0)
    pub similarity_threshold: f64,

    /// Maximum time for a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Maximum snippet length included in prompts (characters)
    pub max_snippet_chars: usize,
}

impl SynthesizerConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(format!(
                "similarity_threshold {} out of range [0.0, 1.0]",
                self.similarity_threshold
            ));
        }
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_snippet_chars == 0 {
            return Err("max_snippet_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SynthesizerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            oracle_timeout_secs: 120,
            max_snippet_chars: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(SynthesizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = SynthesizerConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let config = SynthesizerConfig {
            oracle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
