//! Fan-out/fan-in scan coordination

use crate::config::ScanConfig;
use crate::error::ScanError;
use forcescan_domain::traits::SourceScanner;
use forcescan_domain::{ResearchPlan, SourceFailure, SourceFinding};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Combined result of a coordinated scan across all categories
#[derive(Debug, Clone, Default)]
pub struct ScanBatch {
    /// Findings from every category that succeeded, in category order then
    /// scanner-emission order
    pub findings: Vec<SourceFinding>,

    /// Per-source and per-category failure records
    pub failures: Vec<SourceFailure>,
}

impl ScanBatch {
    /// Whether any category produced findings
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Coordinates one concurrent scan worker per source category
///
/// Workers share no mutable state: each owns its own accumulator and returns
/// an immutable result, so the join needs no locks.
pub struct ScanCoordinator {
    scanners: Vec<(String, Arc<dyn SourceScanner>)>,
    config: ScanConfig,
}

impl ScanCoordinator {
    /// Create a coordinator with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            scanners: Vec::new(),
            config,
        }
    }

    /// Create a coordinator with default configuration
    pub fn default_config() -> Self {
        Self::new(ScanConfig::default())
    }

    /// Register the scan function for a source category
    pub fn register(
        mut self,
        category: impl Into<String>,
        scanner: Arc<dyn SourceScanner>,
    ) -> Self {
        self.scanners.push((category.into(), scanner));
        self
    }

    /// Scanner registered for a category, if any
    fn scanner_for(&self, category: &str) -> Option<Arc<dyn SourceScanner>> {
        self.scanners
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, s)| Arc::clone(s))
    }

    /// Fan the plan out to one worker per category and join the results
    ///
    /// Returns `Ok` with a combined batch when at least one category
    /// succeeded (failures, if any, are surfaced in the batch), and
    /// `Err(ScanError::AllSourcesFailed)` only when every attempted category
    /// failed.
    pub async fn scan(&self, plan: &ResearchPlan) -> Result<ScanBatch, ScanError> {
        let groups: Vec<_> = plan
            .source_groups
            .iter()
            .filter(|g| !g.sources.is_empty())
            .cloned()
            .collect();

        if groups.is_empty() {
            return Err(ScanError::NothingToScan);
        }

        info!(
            "Starting scan for '{}': {} categories, {} keywords",
            plan.target_industry,
            groups.len(),
            plan.keywords.len()
        );

        // Fan out: one task per category, no shared mutable state.
        let mut handles = Vec::new();
        let mut batch = ScanBatch::default();

        for group in groups {
            match self.scanner_for(&group.category) {
                Some(scanner) => {
                    let plan = plan.clone();
                    let category = group.category.clone();
                    let sources = group.sources.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        scanner.scan(&plan, &sources)
                    });
                    handles.push((category, handle));
                }
                None => {
                    warn!("No scanner registered for category '{}'", group.category);
                    batch.failures.push(SourceFailure {
                        source: group.category.clone(),
                        reason: "no scanner registered for category".to_string(),
                    });
                }
            }
        }

        // Fan in: await in spawn order so the merged batch is deterministic.
        let attempted = handles.len() + batch.failures.len();
        let mut succeeded = 0usize;

        for (category, handle) in handles {
            match timeout(self.config.category_timeout(), handle).await {
                Ok(Ok(Ok(output))) => {
                    debug!(
                        "Category '{}': {} findings, {} source failures",
                        category,
                        output.findings.len(),
                        output.failures.len()
                    );
                    succeeded += 1;
                    batch.findings.extend(output.findings);
                    batch.failures.extend(output.failures);
                }
                Ok(Ok(Err(reason))) => {
                    warn!("Category '{}' failed: {}", category, reason);
                    batch.failures.push(SourceFailure {
                        source: category,
                        reason,
                    });
                }
                Ok(Err(join_err)) => {
                    warn!("Category '{}' worker panicked: {}", category, join_err);
                    batch.failures.push(SourceFailure {
                        source: category,
                        reason: format!("scan worker failed: {}", join_err),
                    });
                }
                Err(_) => {
                    // The in-flight worker is abandoned; completed categories
                    // are already in the batch.
                    warn!(
                        "Category '{}' timed out after {}s",
                        category, self.config.category_timeout_secs
                    );
                    batch.failures.push(SourceFailure {
                        source: category,
                        reason: format!(
                            "scan timed out after {}s",
                            self.config.category_timeout_secs
                        ),
                    });
                }
            }
        }

        info!(
            "Scan complete: {} findings, {}/{} categories succeeded, {} failures",
            batch.findings.len(),
            succeeded,
            attempted,
            batch.failures.len()
        );

        if succeeded == 0 {
            return Err(ScanError::AllSourcesFailed {
                failures: batch.failures,
            });
        }

        Ok(batch)
    }
}
