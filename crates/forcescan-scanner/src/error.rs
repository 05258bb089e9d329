//! Error types for the scan coordinator

use forcescan_domain::SourceFailure;
use thiserror::Error;

/// Errors that can occur during a coordinated scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// Every attempted category failed; the failure records carry the detail
    #[error("all {} source categories failed", failures.len())]
    AllSourcesFailed {
        /// One record per failed category
        failures: Vec<SourceFailure>,
    },

    /// The plan named no scannable source group
    #[error("plan contains no non-empty source group")]
    NothingToScan,
}
