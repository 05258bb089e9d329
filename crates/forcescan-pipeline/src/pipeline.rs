//! Pipeline orchestrator: stage sequencing and checkpoint gating

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::packaging::{build_report_prompt, build_table, fallback_report, MarketForceReport};
use crate::render::{render_forces_markdown, render_plan_markdown};
use forcescan_checkpoint::Checkpoint;
use forcescan_domain::traits::{ReviewChannel, TextOracle};
use forcescan_domain::{
    IdentifiedForce, PlanInput, ResearchPlan, SourceFinding, StageStatus,
};
use forcescan_scanner::{ScanBatch, ScanCoordinator};
use forcescan_synthesizer::{SynthesisOutcome, Synthesizer};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Terminal outcome of a pipeline run
///
/// Mirrors the stage envelope: the status and summary of the last stage
/// that ran, plus every artifact produced before the run ended. A halted
/// run still carries the plan (and forces, where synthesis completed) so
/// the caller can inspect, store, or re-enter from them.
#[derive(Debug)]
pub struct RunOutcome {
    /// Status of the last stage that ran
    pub status: StageStatus,

    /// Summary of the last stage that ran
    pub summary: String,

    /// Rejection reason or error detail, when the run halted
    pub message: Option<String>,

    /// The plan, once configuration succeeded
    pub plan: Option<ResearchPlan>,

    /// The force list, once synthesis completed
    pub forces: Option<Vec<IdentifiedForce>>,

    /// The packaged report, on a completed run only
    pub report: Option<MarketForceReport>,
}

impl RunOutcome {
    /// Whether the run completed and produced a report
    pub fn is_complete(&self) -> bool {
        self.report.is_some()
    }

    fn failed(summary: impl Into<String>, error: &PipelineError, plan: Option<ResearchPlan>) -> Self {
        Self {
            status: StageStatus::Error,
            summary: summary.into(),
            message: Some(error.to_string()),
            plan,
            forces: None,
            report: None,
        }
    }
}

/// Sequences Configuration → Checkpoint 1 → Scan → Synthesis →
/// Checkpoint 2 → Packaging
///
/// Each stage is also a public method, so a host holding a stored payload
/// can re-enter the pipeline at any boundary instead of replaying the
/// stages before it.
pub struct Pipeline<O, C1, C2>
where
    O: TextOracle + Send + Sync + 'static,
    O::Error: std::fmt::Display,
    C1: ReviewChannel<ResearchPlan>,
    C1::Error: std::fmt::Display,
    C2: ReviewChannel<Vec<IdentifiedForce>>,
    C2::Error: std::fmt::Display,
{
    oracle: Arc<O>,
    coordinator: ScanCoordinator,
    plan_review: C1,
    forces_review: C2,
    config: PipelineConfig,
}

impl<O, C1, C2> Pipeline<O, C1, C2>
where
    O: TextOracle + Send + Sync + 'static,
    O::Error: std::fmt::Display,
    C1: ReviewChannel<ResearchPlan>,
    C1::Error: std::fmt::Display,
    C2: ReviewChannel<Vec<IdentifiedForce>>,
    C2::Error: std::fmt::Display,
{
    /// Assemble a pipeline from its collaborators
    pub fn new(
        oracle: O,
        coordinator: ScanCoordinator,
        plan_review: C1,
        forces_review: C2,
        config: PipelineConfig,
    ) -> Self {
        Self {
            oracle: Arc::new(oracle),
            coordinator,
            plan_review,
            forces_review,
            config,
        }
    }

    /// Build and validate the research plan from caller input
    pub fn configure(&self, input: PlanInput) -> Result<ResearchPlan, PipelineError> {
        let plan = ResearchPlan::from_input(input);
        plan.validate()?;
        info!(
            "Configured plan for '{}' ({}), {} keywords, {} source groups",
            plan.target_industry,
            plan.target_market,
            plan.keywords.len(),
            plan.source_groups.len()
        );
        Ok(plan)
    }

    /// Fan the approved plan out to the scan coordinator
    pub async fn scan(&self, plan: &ResearchPlan) -> Result<ScanBatch, PipelineError> {
        Ok(self.coordinator.scan(plan).await?)
    }

    /// Synthesize forces from scan findings
    ///
    /// `prior` carries forces from an earlier pass so their identifiers
    /// survive a re-run; pass an empty slice for a fresh run.
    pub async fn synthesize(
        &self,
        findings: Vec<SourceFinding>,
        plan: &ResearchPlan,
        prior: &[IdentifiedForce],
    ) -> Result<SynthesisOutcome, PipelineError> {
        let synthesizer =
            Synthesizer::from_shared(Arc::clone(&self.oracle), self.config.synthesizer.clone());
        Ok(synthesizer.synthesize(findings, plan, prior).await?)
    }

    /// Package the approved forces into the final report bundle
    ///
    /// The narrative report is written by the oracle; when the oracle is
    /// unavailable the bundle falls back to a structured listing so a
    /// completed run always yields both artifacts.
    pub async fn package(
        &self,
        plan: ResearchPlan,
        forces: Vec<IdentifiedForce>,
        scan_failures: Vec<forcescan_domain::SourceFailure>,
    ) -> MarketForceReport {
        let markdown_table = build_table(&forces);

        let prompt = build_report_prompt(&plan, &forces);
        let markdown_report = match self.narrate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Oracle returned an empty report, using structured fallback");
                fallback_report(&plan, &forces)
            }
            Err(e) => {
                warn!("Oracle report generation failed ({}), using structured fallback", e);
                fallback_report(&plan, &forces)
            }
        };

        MarketForceReport {
            plan,
            forces,
            markdown_table,
            markdown_report,
            scan_failures,
        }
    }

    /// Run the full pipeline from caller input to packaged report
    ///
    /// Halts at the first rejection or stage error; the returned outcome
    /// carries the last stage's envelope plus every artifact produced.
    pub async fn run(&self, input: PlanInput) -> RunOutcome {
        // Stage 1: configuration
        let plan = match self.configure(input) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Configuration failed: {}", e);
                return RunOutcome::failed("Plan configuration", &e, None);
            }
        };

        // Checkpoint 1: plan review (always gated)
        let mut plan_gate = Checkpoint::new("plan-review");
        let resolved = plan_gate.resolve(plan, render_plan_markdown, &self.plan_review);
        let plan = match (resolved.status, resolved.payload) {
            (StageStatus::Approved, Some(plan)) => plan,
            (status, payload) => {
                info!("Run halted at plan review: {}", status);
                return RunOutcome {
                    status,
                    summary: resolved.summary,
                    message: resolved.message,
                    plan: payload,
                    forces: None,
                    report: None,
                };
            }
        };

        // Stage 2: scan
        let batch = match self.scan(&plan).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Scan failed: {}", e);
                return RunOutcome::failed("Source scan", &e, Some(plan));
            }
        };

        // Stage 3: synthesis
        let outcome = match self.synthesize(batch.findings, &plan, &[]).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Synthesis failed: {}", e);
                return RunOutcome::failed("Synthesis", &e, Some(plan));
            }
        };

        // Checkpoint 2: force review (skippable by configuration)
        let forces = if self.config.review_forces {
            let original = outcome.forces.clone();
            let mut force_gate = Checkpoint::new("force-review");
            let resolved =
                force_gate.resolve(outcome.forces, |f| render_forces_markdown(f), &self.forces_review);
            match (resolved.status, resolved.payload) {
                (StageStatus::Approved, Some(revised)) => {
                    merge_force_revisions(original, revised)
                }
                (status, _) => {
                    info!("Run halted at force review: {}", status);
                    return RunOutcome {
                        status,
                        summary: resolved.summary,
                        message: resolved.message,
                        plan: Some(plan),
                        forces: Some(original),
                        report: None,
                    };
                }
            }
        } else {
            info!("Force review disabled, accepting synthesis output as-is");
            outcome.forces
        };

        // Stage 4: packaging
        let report = self.package(plan, forces, batch.failures).await;

        RunOutcome {
            status: StageStatus::Approved,
            summary: outcome.summary,
            message: None,
            plan: Some(report.plan.clone()),
            forces: Some(report.forces.clone()),
            report: Some(report),
        }
    }

    /// Oracle call for the narrative report, with the synthesis timeout
    async fn narrate(&self, prompt: &str) -> Result<String, String> {
        let oracle = Arc::clone(&self.oracle);
        let prompt = prompt.to_string();

        let call = tokio::task::spawn_blocking(move || {
            oracle.generate(&prompt).map_err(|e| e.to_string())
        });

        timeout(self.config.synthesizer.oracle_timeout(), call)
            .await
            .map_err(|_| "oracle timed out".to_string())?
            .map_err(|e| format!("task join error: {}", e))?
    }
}

/// Apply reviewer revisions to the synthesized force list
///
/// Revisions patch forces in place: a revised force replaces the name,
/// description, keywords, scope, time horizon, and impact of the original
/// with the same id, but the id and supporting references always come from
/// the original. A revised force whose id matches no original is ignored
/// (a reviewer cannot invent evidence), as is a revision set that removes
/// every force; originals absent from the revision set are dropped.
fn merge_force_revisions(
    original: Vec<IdentifiedForce>,
    revised: Vec<IdentifiedForce>,
) -> Vec<IdentifiedForce> {
    let mut merged = Vec::with_capacity(revised.len());

    for revision in revised {
        let Some(base) = original.iter().find(|f| f.id == revision.id) else {
            warn!(
                "Reviewer revision '{}' matches no synthesized force, ignoring",
                revision.name
            );
            continue;
        };

        let manual = revision.needs_manual_synthesis && revision.description.trim().is_empty();
        merged.push(IdentifiedForce {
            id: base.id,
            name: revision.name,
            description: revision.description,
            keywords: revision.keywords,
            scope: revision.scope,
            time_horizon: revision.time_horizon,
            impact: revision.impact,
            supporting_sources: base.supporting_sources.clone(),
            needs_manual_synthesis: manual,
        });
    }

    if merged.is_empty() && !original.is_empty() {
        warn!("Reviewer revisions removed every force, keeping synthesis output");
        return original;
    }

    merged
}
