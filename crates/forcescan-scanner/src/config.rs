//! Configuration for the scan coordinator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scan coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum time a single category worker may run (seconds)
    ///
    /// A category that exceeds this budget is abandoned and recorded as a
    /// failure; completed categories are unaffected.
    pub category_timeout_secs: u64,
}

impl ScanConfig {
    /// Get the category timeout as a Duration
    pub fn category_timeout(&self) -> Duration {
        Duration::from_secs(self.category_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.category_timeout_secs == 0 {
            return Err("category_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            category_timeout_secs: 300,
        }
    }
}
