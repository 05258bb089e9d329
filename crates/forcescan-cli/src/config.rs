//! File configuration for the CLI.

use crate::error::Result;
use forcescan_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Oracle backend settings
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Directory report files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Pipeline stage settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Oracle backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_endpoint() -> String {
    forcescan_oracle::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "llama2".to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle: OracleConfig::default(),
            output_dir: default_output_dir(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
