//! Markdown summary renderers for checkpoint review

use forcescan_domain::{IdentifiedForce, ResearchPlan};

/// Render a research plan as the markdown artifact shown at Checkpoint 1
pub fn render_plan_markdown(plan: &ResearchPlan) -> String {
    let mut out = String::new();

    out.push_str("## Research Plan\n\n");
    out.push_str(&format!("- **Market**: {}\n", plan.target_market));
    out.push_str(&format!("- **Industry**: {}\n", plan.target_industry));
    out.push_str(&format!("- **Time horizon**: {}\n", plan.time_horizon));
    out.push_str(&format!("- **Keywords**: {}\n", plan.keywords.join(", ")));

    out.push_str("\n### Sources\n\n");
    for group in &plan.source_groups {
        out.push_str(&format!(
            "- **{}** ({}): {}\n",
            group.category,
            group.sources.len(),
            group.sources.join(", ")
        ));
    }

    out
}

/// Render the preliminary force list as the markdown artifact shown at
/// Checkpoint 2
pub fn render_forces_markdown(forces: &[IdentifiedForce]) -> String {
    let mut out = String::new();

    out.push_str(&format!("## Preliminary Findings ({} forces)\n\n", forces.len()));

    for force in forces {
        out.push_str(&format!("### {}\n\n", force.name));
        if force.needs_manual_synthesis {
            out.push_str("_Needs manual synthesis._\n\n");
        } else {
            out.push_str(&format!("{}\n\n", force.description));
        }
        out.push_str(&format!("- Keywords: {}\n", force.keywords.join(", ")));
        out.push_str(&format!("- Scope: {}\n", force.scope.join(", ")));
        out.push_str(&format!("- Evidence ({} sources):\n", force.supporting_sources.len()));
        for reference in &force.supporting_sources {
            match &reference.url {
                Some(url) => out.push_str(&format!("  - {} ({})\n", reference.source_name, url)),
                None => out.push_str(&format!("  - {}\n", reference.source_name)),
            }
        }
        out.push('\n');
    }

    out
}
