//! Final packaging: detail table, narrative report, file output

use crate::error::PipelineError;
use forcescan_domain::{IdentifiedForce, ResearchPlan, SourceFailure};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// The immutable final bundle of a successful run
#[derive(Debug, Clone)]
pub struct MarketForceReport {
    /// The validated, approved plan the run executed
    pub plan: ResearchPlan,

    /// All identified forces, in synthesis order
    pub forces: Vec<IdentifiedForce>,

    /// Markdown detail table (one row per force)
    pub markdown_table: String,

    /// Markdown narrative report
    pub markdown_report: String,

    /// Source failures surfaced during scanning
    pub scan_failures: Vec<SourceFailure>,
}

impl MarketForceReport {
    /// Write the table and report to timestamped files under `dir`
    ///
    /// Returns the two paths written (table first). The directory is
    /// created if missing.
    pub fn write_markdown(&self, dir: &Path) -> Result<(PathBuf, PathBuf), PipelineError> {
        std::fs::create_dir_all(dir)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PipelineError::Output(e.to_string()))?
            .as_secs();

        let table_path = dir.join(format!("market_forces_table_{}.md", timestamp));
        let report_path = dir.join(format!("market_forces_report_{}.md", timestamp));

        std::fs::write(&table_path, &self.markdown_table)?;
        std::fs::write(&report_path, &self.markdown_report)?;

        Ok((table_path, report_path))
    }
}

/// Escape characters that would break a markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Build the markdown detail table, one row per force
///
/// Columns: Name, Description, Keywords, Scope, Time Horizon, Sources.
pub(crate) fn build_table(forces: &[IdentifiedForce]) -> String {
    let mut out = String::new();

    out.push_str("| Name | Description | Keywords | Scope | Time Horizon | Sources |\n");
    out.push_str("| --- | --- | --- | --- | --- | --- |\n");

    for force in forces {
        let description = if force.needs_manual_synthesis {
            "(needs manual synthesis)".to_string()
        } else {
            escape_cell(&force.description)
        };

        let sources: Vec<String> = force
            .supporting_sources
            .iter()
            .map(|r| match &r.url {
                Some(url) => format!("{} ({})", r.source_name, url),
                None => r.source_name.clone(),
            })
            .collect();

        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_cell(&force.name),
            description,
            escape_cell(&force.keywords.join(", ")),
            escape_cell(&force.scope.join(", ")),
            escape_cell(&force.time_horizon),
            escape_cell(&sources.join("; ")),
        ));
    }

    out
}

/// The prompt asking the oracle for narrative prose over the force list
pub(crate) fn build_report_prompt(plan: &ResearchPlan, forces: &[IdentifiedForce]) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Write a structured markdown report on the market forces below. \
         Open with a short executive summary, then one section per force \
         discussing its evidence. Respond with markdown only.\n\n",
    );
    prompt.push_str(&format!(
        "Market: {}\nIndustry: {}\nTime horizon: {}\n\nForces:\n",
        plan.target_market, plan.target_industry, plan.time_horizon
    ));

    for force in forces {
        prompt.push_str(&format!(
            "- {}: {} ({} sources)\n",
            force.name,
            force.description,
            force.supporting_sources.len()
        ));
    }

    prompt
}

/// Deterministic narrative skeleton used when the oracle is unavailable
///
/// Packaging never fails the run; the skeleton lists every force so no
/// evidence is lost from the final artifact.
pub(crate) fn fallback_report(plan: &ResearchPlan, forces: &[IdentifiedForce]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Market Forces: {} ({})\n\nTime horizon: {}. {} forces identified.\n\n",
        plan.target_industry,
        plan.target_market,
        plan.time_horizon,
        forces.len()
    ));

    for force in forces {
        out.push_str(&format!("## {}\n\n", force.name));
        if force.needs_manual_synthesis {
            out.push_str("Description pending manual synthesis.\n\n");
        } else {
            out.push_str(&format!("{}\n\n", force.description));
        }
        out.push_str("Supporting sources:\n\n");
        for reference in &force.supporting_sources {
            out.push_str(&format!(
                "- {}: {}\n",
                reference.source_name, reference.snippet
            ));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcescan_domain::{ForceId, PlanInput, SourceCategory, SourceReference};

    fn force(name: &str) -> IdentifiedForce {
        IdentifiedForce::new(
            ForceId::new(),
            name.to_string(),
            "A description".to_string(),
            vec!["coal demand".to_string()],
            vec!["Global".to_string()],
            "5+ years".to_string(),
            vec![SourceReference {
                source_name: "iea.org".to_string(),
                category: SourceCategory::Web,
                url: Some("https://iea.org".to_string()),
                published: None,
                snippet: "snippet".to_string(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_table_one_row_per_force() {
        let table = build_table(&[force("Plateauing Coal Demand")]);
        let rows: Vec<&str> = table.lines().collect();
        // Header, separator, one data row
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Time Horizon"));
        assert!(rows[2].contains("Plateauing Coal Demand"));
        assert!(rows[2].contains("iea.org (https://iea.org)"));
    }

    #[test]
    fn test_table_escapes_pipes() {
        let mut f = force("A | B");
        f.description = "left|right".to_string();
        let table = build_table(&[f]);
        assert!(table.contains("A \\| B"));
        assert!(table.contains("left\\|right"));
    }

    #[test]
    fn test_fallback_report_lists_every_force() {
        let plan = ResearchPlan::from_input(PlanInput {
            target_industry: "Energy".to_string(),
            ..Default::default()
        });
        let forces = vec![force("First Force"), force("Second Force")];
        let report = fallback_report(&plan, &forces);
        assert!(report.contains("## First Force"));
        assert!(report.contains("## Second Force"));
        assert!(report.contains("snippet"));
    }

    #[test]
    fn test_write_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let plan = ResearchPlan::from_input(PlanInput {
            target_industry: "Energy".to_string(),
            ..Default::default()
        });
        let forces = vec![force("First Force")];
        let report = MarketForceReport {
            markdown_table: build_table(&forces),
            markdown_report: fallback_report(&plan, &forces),
            plan,
            forces,
            scan_failures: Vec::new(),
        };

        let (table_path, report_path) = report.write_markdown(dir.path()).unwrap();
        assert!(table_path.exists());
        assert!(report_path.exists());
        let table = std::fs::read_to_string(table_path).unwrap();
        assert!(table.contains("First Force"));
    }
}
