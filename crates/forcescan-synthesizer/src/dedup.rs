//! Finding deduplication
//!
//! Findings are duplicates when they share the same source identity
//! (name + URL) and their snippets overlap beyond the similarity threshold.
//! Duplicates collapse into one evidence item; keyword matches are unioned.

use forcescan_domain::SourceFinding;
use std::collections::HashSet;
use tracing::debug;

/// Token-level Jaccard similarity of two snippets (case-insensitive)
pub(crate) fn snippet_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = tokenize(a);
    let tokens_b: HashSet<String> = tokenize(b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Collapse duplicate findings, preserving first-seen order
///
/// Findings matching zero keywords are dropped up front; they can never
/// contribute evidence to a force. The reduction is idempotent: a second
/// pass over the output shrinks nothing, because any pair that would merge
/// has already merged.
pub fn dedup_findings(findings: Vec<SourceFinding>, threshold: f64) -> Vec<SourceFinding> {
    let before = findings.len();
    let mut retained: Vec<SourceFinding> = Vec::new();

    for finding in findings {
        if finding.matched_keywords.is_empty() {
            debug!(
                "Dropping finding from '{}': no matched keywords",
                finding.source_name
            );
            continue;
        }

        let duplicate_of = retained.iter_mut().find(|kept| {
            kept.source_identity() == finding.source_identity()
                && snippet_similarity(&kept.extracted_text, &finding.extracted_text) >= threshold
        });

        match duplicate_of {
            Some(kept) => {
                // Union keyword matches into the first-seen evidence item
                for keyword in &finding.matched_keywords {
                    if !kept.matched_keywords.contains(keyword) {
                        kept.matched_keywords.push(keyword.clone());
                    }
                }
            }
            None => retained.push(finding),
        }
    }

    debug!("Dedup: {} findings in, {} retained", before, retained.len());
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcescan_domain::SourceCategory;

    fn finding(source: &str, text: &str, keywords: &[&str]) -> SourceFinding {
        SourceFinding {
            source_name: source.to_string(),
            category: SourceCategory::Web,
            url: Some(format!("https://{}", source)),
            published: None,
            matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            scope_context: "Global / Energy".to_string(),
            extracted_text: text.to_string(),
        }
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(snippet_similarity("coal demand plateau", "coal demand plateau"), 1.0);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(snippet_similarity("coal demand", "wind power"), 0.0);
    }

    #[test]
    fn test_similarity_case_insensitive() {
        assert_eq!(snippet_similarity("Coal Demand", "coal demand"), 1.0);
    }

    #[test]
    fn test_overlapping_snippets_collapse() {
        let a = finding(
            "iea.org",
            "Global coal demand has plateaued and is expected to stay flat",
            &["coal demand"],
        );
        let b = finding(
            "iea.org",
            "Global coal demand has plateaued and should stay flat",
            &["Trends"],
        );

        let result = dedup_findings(vec![a, b], 0.6);
        assert_eq!(result.len(), 1);
        // Keyword matches unioned in order
        assert_eq!(result[0].matched_keywords, vec!["coal demand", "Trends"]);
    }

    #[test]
    fn test_different_sources_never_collapse() {
        let a = finding("iea.org", "coal demand plateau", &["coal demand"]);
        let b = finding("imf.org", "coal demand plateau", &["coal demand"]);

        let result = dedup_findings(vec![a, b], 0.6);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_zero_keyword_findings_dropped() {
        let a = finding("iea.org", "coal demand plateau", &[]);
        let b = finding("iea.org", "grid storage surges", &["Trends"]);

        let result = dedup_findings(vec![a, b], 0.6);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].extracted_text, "grid storage surges");
    }

    #[test]
    fn test_dedup_idempotent() {
        let findings = vec![
            finding("iea.org", "coal demand has plateaued globally", &["coal demand"]),
            finding("iea.org", "coal demand has plateaued across the globe", &["Trends"]),
            finding("imf.org", "interest rates remain high", &["Signals"]),
        ];

        let once = dedup_findings(findings, 0.5);
        let twice = dedup_findings(once.clone(), 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_findings(Vec::new(), 0.6).is_empty());
    }
}
