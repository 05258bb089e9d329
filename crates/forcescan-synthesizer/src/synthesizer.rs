//! Core Synthesizer implementation

use crate::cluster::fallback_clusters;
use crate::config::SynthesizerConfig;
use crate::dedup::dedup_findings;
use crate::error::SynthesizerError;
use crate::parser::{parse_clusters, parse_force_profile};
use crate::prompt::{build_cluster_prompt, NamingPromptBuilder};
use forcescan_domain::traits::TextOracle;
use forcescan_domain::{
    ForceId, IdentifiedForce, ResearchPlan, SourceFinding, SourceReference,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Ordered forces plus a human-readable synthesis summary
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Identified forces, one per cluster, in first-seen evidence order
    pub forces: Vec<IdentifiedForce>,

    /// Human-readable summary of the synthesis pass
    pub summary: String,
}

/// The Synthesizer turns raw findings into identified forces
pub struct Synthesizer<O>
where
    O: TextOracle,
{
    oracle: Arc<O>,
    config: SynthesizerConfig,
}

impl<O> Synthesizer<O>
where
    O: TextOracle + Send + Sync + 'static,
    O::Error: std::fmt::Display,
{
    /// Create a new Synthesizer
    pub fn new(oracle: O, config: SynthesizerConfig) -> Self {
        Self::from_shared(Arc::new(oracle), config)
    }

    /// Create a Synthesizer sharing an oracle with other components
    pub fn from_shared(oracle: Arc<O>, config: SynthesizerConfig) -> Self {
        Self { oracle, config }
    }

    /// Synthesize forces from the combined findings of all scan categories
    ///
    /// `prior` is the prior-state hint: forces from an earlier synthesis
    /// pass whose identifiers must survive a re-run over an unchanged
    /// finding set. An empty slice means a fresh run.
    ///
    /// Evidence is never silently discarded: when the oracle is unavailable
    /// or returns unparseable output for a cluster, that cluster is emitted
    /// as a force with an empty description flagged for manual synthesis.
    pub async fn synthesize(
        &self,
        findings: Vec<SourceFinding>,
        plan: &ResearchPlan,
        prior: &[IdentifiedForce],
    ) -> Result<SynthesisOutcome, SynthesizerError> {
        let total_in = findings.len();

        info!(
            "Starting synthesis for '{}': {} raw findings",
            plan.target_industry, total_in
        );

        // 1. Deduplication (also drops zero-keyword findings)
        let retained = dedup_findings(findings, self.config.similarity_threshold);
        let collapsed = total_in - retained.len();

        if retained.is_empty() {
            // Not an error: the pipeline reports the absence of evidence.
            let summary = format!(
                "No evidence was found ({} raw findings, none usable).",
                total_in
            );
            info!("{}", summary);
            return Ok(SynthesisOutcome {
                forces: Vec::new(),
                summary,
            });
        }

        // 2. Clustering: oracle partition, deterministic fallback on failure
        let clusters = self.cluster(&retained, plan).await;

        debug!(
            "Clustered {} evidence items into {} clusters",
            retained.len(),
            clusters.len()
        );

        // 3. One force per cluster
        let mut forces = Vec::with_capacity(clusters.len());
        let mut used_prior: Vec<ForceId> = Vec::new();
        let mut degraded = 0usize;

        for indices in &clusters {
            let cluster_findings: Vec<&SourceFinding> =
                indices.iter().map(|&i| &retained[i]).collect();

            let references: Vec<SourceReference> = cluster_findings
                .iter()
                .map(|f| SourceReference::from(*f))
                .collect();

            let keywords = union_keywords(&cluster_findings);
            let scope = scope_tags(plan);

            let prompt =
                NamingPromptBuilder::new(cluster_findings.clone(), plan, self.config.max_snippet_chars)
                    .build();

            let id = adopt_prior_id(&references, prior, &mut used_prior)
                .unwrap_or_default();

            let force = match self.call_oracle(&prompt).await.and_then(|r| parse_force_profile(&r)) {
                Ok(profile) => {
                    let mut force = IdentifiedForce::new(
                        id,
                        profile.name,
                        profile.description,
                        keywords,
                        scope,
                        plan.time_horizon.clone(),
                        references,
                    )
                    .map_err(SynthesizerError::InvalidFormat)?;
                    force.impact = profile.impact;
                    force
                }
                Err(e) => {
                    warn!("Naming failed for cluster, emitting degraded force: {}", e);
                    degraded += 1;
                    IdentifiedForce::new(
                        id,
                        dominant_keyword(&cluster_findings),
                        String::new(),
                        keywords,
                        scope,
                        plan.time_horizon.clone(),
                        references,
                    )
                    .map_err(SynthesizerError::InvalidFormat)?
                    .flagged_manual()
                }
            };

            forces.push(force);
        }

        let summary = format!(
            "Synthesized {} forces from {} evidence items ({} duplicates collapsed out of {} raw findings){}.",
            forces.len(),
            retained.len(),
            collapsed,
            total_in,
            if degraded > 0 {
                format!("; {} need manual synthesis", degraded)
            } else {
                String::new()
            }
        );

        info!("{}", summary);

        Ok(SynthesisOutcome { forces, summary })
    }

    /// Partition the retained findings into clusters
    async fn cluster(&self, retained: &[SourceFinding], plan: &ResearchPlan) -> Vec<Vec<usize>> {
        if retained.len() == 1 {
            return vec![vec![0]];
        }

        let prompt = build_cluster_prompt(retained, plan, self.config.max_snippet_chars);

        match self.call_oracle(&prompt).await {
            Ok(response) => match parse_clusters(&response, retained.len()) {
                Ok(clusters) => clusters,
                Err(e) => {
                    warn!("Oracle clustering rejected ({}), using keyword fallback", e);
                    fallback_clusters(retained)
                }
            },
            Err(e) => {
                warn!("Oracle clustering failed ({}), using keyword fallback", e);
                fallback_clusters(retained)
            }
        }
    }

    /// Call the oracle with the configured timeout
    async fn call_oracle(&self, prompt: &str) -> Result<String, SynthesizerError> {
        let oracle = Arc::clone(&self.oracle);
        let prompt = prompt.to_string();

        // The oracle trait is sync; run it off the async worker threads.
        let call = tokio::task::spawn_blocking(move || {
            oracle
                .generate(&prompt)
                .map_err(|e| SynthesizerError::Oracle(e.to_string()))
        });

        timeout(self.config.oracle_timeout(), call)
            .await
            .map_err(|_| SynthesizerError::Timeout)?
            .map_err(|e| SynthesizerError::Oracle(format!("Task join error: {}", e)))?
    }
}

/// Union the keyword matches across a cluster, preserving first-seen order
fn union_keywords(cluster: &[&SourceFinding]) -> Vec<String> {
    let mut keywords = Vec::new();
    for finding in cluster {
        for keyword in &finding.matched_keywords {
            if !keywords.contains(keyword) {
                keywords.push(keyword.clone());
            }
        }
    }
    keywords
}

/// Scope tags derived from the plan
fn scope_tags(plan: &ResearchPlan) -> Vec<String> {
    let mut tags = vec![plan.target_market.clone()];
    if !tags.contains(&plan.target_industry) {
        tags.push(plan.target_industry.clone());
    }
    tags
}

/// The most frequent keyword across the cluster (first-seen tie-break);
/// used as the name of a degraded force
fn dominant_keyword(cluster: &[&SourceFinding]) -> String {
    let keywords = union_keywords(cluster);
    let mut best = String::from("Unnamed force");
    let mut best_count = 0usize;

    for keyword in keywords {
        let count = cluster
            .iter()
            .filter(|f| f.matched_keywords.contains(&keyword))
            .count();
        if count > best_count {
            best_count = count;
            best = keyword;
        }
    }

    best
}

/// Adopt a prior force's id when the cluster shares a supporting reference
/// with it; first prior match wins, each prior id is used at most once
fn adopt_prior_id(
    references: &[SourceReference],
    prior: &[IdentifiedForce],
    used: &mut Vec<ForceId>,
) -> Option<ForceId> {
    for previous in prior {
        if used.contains(&previous.id) {
            continue;
        }
        let shares_evidence = previous.supporting_sources.iter().any(|p| {
            references.iter().any(|r| {
                r.source_name == p.source_name && r.url == p.url && r.snippet == p.snippet
            })
        });
        if shares_evidence {
            used.push(previous.id);
            return Some(previous.id);
        }
    }
    None
}
