//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the pipeline and its external
//! collaborators. Infrastructure implementations live in other crates.

use crate::finding::{SourceFailure, SourceFinding};
use crate::plan::ResearchPlan;

/// Trait for the opaque text-transformation oracle
///
/// Used for clustering, naming/description synthesis, and narrative report
/// generation. The oracle may be slow, unavailable, or return malformed
/// output; callers must validate shape before trusting it.
///
/// Implemented by the infrastructure layer (forcescan-oracle).
pub trait TextOracle {
    /// Error type for oracle operations
    type Error;

    /// Generate text for a prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// What one scan unit returns: whatever succeeded plus recorded failures
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Findings extracted from reachable sources
    pub findings: Vec<SourceFinding>,

    /// Per-source failures (unreachable, extraction error, timeout)
    pub failures: Vec<SourceFailure>,
}

/// Trait for a category-specific scan function
///
/// A scanner must not fail for individual source problems; those are
/// recorded in [`ScanOutput::failures`]. The `Err` branch is reserved for
/// category-fatal conditions only.
pub trait SourceScanner: Send + Sync {
    /// Scan the given sources for the plan's keywords
    fn scan(&self, plan: &ResearchPlan, sources: &[String]) -> Result<ScanOutput, String>;
}

/// A reviewer's decision over a checkpoint payload
#[derive(Debug, Clone)]
pub enum ReviewDecision<P> {
    /// Accept the payload as-is
    Approve,
    /// Accept with modifications; the revised payload is a new artifact
    ApproveWith(P),
    /// Decline with a stated reason; no further stages run
    Reject(String),
}

/// Trait for the external human-review channel
///
/// The channel presents a rendered summary to the reviewer and captures the
/// decision. It may time out or return malformed responses; such failures
/// are distinguishable from a human rejection.
pub trait ReviewChannel<P> {
    /// Error type for channel failures (timeout, malformed response)
    type Error;

    /// Present the payload and capture the reviewer's decision
    fn review(&self, payload: &P, summary: &str) -> Result<ReviewDecision<P>, Self::Error>;
}
