//! Oracle prompt engineering for clustering and naming

use forcescan_domain::{ResearchPlan, SourceFinding};

const CLUSTERING_INSTRUCTIONS: &str = "\
You are grouping research findings into distinct market forces.
Respond with ONLY a JSON array of arrays: each inner array lists the
zero-based indices of findings that describe the same underlying force.
Every index must appear in exactly one group. A group may contain a
single index.";

const NAMING_INSTRUCTIONS: &str = "\
You are naming a market force identified from the findings below.
Respond with ONLY a JSON object of this shape:
{\"name\": \"<concise force name>\", \"description\": \"<2-4 sentence description>\", \"impact\": \"Low|Medium|High\"}";

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the clustering prompt over a deduplicated finding set
pub(crate) fn build_cluster_prompt(
    findings: &[SourceFinding],
    plan: &ResearchPlan,
    max_snippet_chars: usize,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(CLUSTERING_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Research scope: {} ({})\n\nFindings:\n",
        plan.scope_context(),
        plan.time_horizon
    ));

    for (idx, finding) in findings.iter().enumerate() {
        prompt.push_str(&format!(
            "[{}] source: {} | keywords: {} | text: {}\n",
            idx,
            finding.source_name,
            finding.matched_keywords.join(", "),
            truncate(&finding.extracted_text, max_snippet_chars)
        ));
    }

    prompt
}

/// Builds the naming prompt for one cluster of findings
pub(crate) struct NamingPromptBuilder<'a> {
    findings: Vec<&'a SourceFinding>,
    plan: &'a ResearchPlan,
    max_snippet_chars: usize,
}

impl<'a> NamingPromptBuilder<'a> {
    pub(crate) fn new(
        findings: Vec<&'a SourceFinding>,
        plan: &'a ResearchPlan,
        max_snippet_chars: usize,
    ) -> Self {
        Self {
            findings,
            plan,
            max_snippet_chars,
        }
    }

    pub(crate) fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(NAMING_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "Target market: {}\nTarget industry: {}\nTime horizon: {}\n\nEvidence:\n",
            self.plan.target_market, self.plan.target_industry, self.plan.time_horizon
        ));

        for finding in &self.findings {
            prompt.push_str(&format!(
                "- {} ({}): {}\n",
                finding.source_name,
                finding.matched_keywords.join(", "),
                truncate(&finding.extracted_text, self.max_snippet_chars)
            ));
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcescan_domain::{PlanInput, SourceCategory};

    fn plan() -> ResearchPlan {
        ResearchPlan::from_input(PlanInput {
            target_industry: "Energy".to_string(),
            keywords: vec!["coal demand".to_string()],
            ..Default::default()
        })
    }

    fn finding(text: &str) -> SourceFinding {
        SourceFinding {
            source_name: "iea.org".to_string(),
            category: SourceCategory::Web,
            url: None,
            published: None,
            matched_keywords: vec!["coal demand".to_string()],
            scope_context: "Global / Energy".to_string(),
            extracted_text: text.to_string(),
        }
    }

    #[test]
    fn test_cluster_prompt_indexes_findings() {
        let findings = vec![finding("first"), finding("second")];
        let prompt = build_cluster_prompt(&findings, &plan(), 600);
        assert!(prompt.contains("[0]"));
        assert!(prompt.contains("[1]"));
        assert!(prompt.contains("first"));
        assert!(prompt.contains("second"));
    }

    #[test]
    fn test_naming_prompt_includes_scope() {
        let f = finding("coal demand has plateaued");
        let prompt = NamingPromptBuilder::new(vec![&f], &plan(), 600).build();
        assert!(prompt.contains("Energy"));
        assert!(prompt.contains("iea.org"));
        assert!(prompt.contains("coal demand has plateaued"));
    }

    #[test]
    fn test_snippets_truncated() {
        let f = finding(&"x".repeat(2000));
        let prompt = NamingPromptBuilder::new(vec![&f], &plan(), 100).build();
        assert!(!prompt.contains(&"x".repeat(101)));
        assert!(prompt.contains(&"x".repeat(100)));
    }
}
