//! Clustering of deduplicated findings
//!
//! The oracle is asked for a partition of the findings; when its answer is
//! missing or malformed, a deterministic keyword-overlap fallback groups the
//! findings instead. Either way every finding lands in exactly one cluster.

use forcescan_domain::SourceFinding;

/// Deterministic fallback clustering: findings that share a matched keyword
/// (case-insensitive) end up in the same cluster
///
/// Clusters are ordered by their smallest finding index; indices within a
/// cluster ascend, so evidence keeps first-seen order downstream.
pub(crate) fn fallback_clusters(findings: &[SourceFinding]) -> Vec<Vec<usize>> {
    let n = findings.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn root(parent: &mut Vec<usize>, mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    // Union findings pairwise on shared keywords
    let keyword_sets: Vec<Vec<String>> = findings
        .iter()
        .map(|f| {
            f.matched_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect()
        })
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            if keyword_sets[i].iter().any(|k| keyword_sets[j].contains(k)) {
                let (ri, rj) = (root(&mut parent, i), root(&mut parent, j));
                if ri != rj {
                    // Attach the later root to the earlier one
                    let (lo, hi) = if ri < rj { (ri, rj) } else { (rj, ri) };
                    parent[hi] = lo;
                }
            }
        }
    }

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut cluster_of_root: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        let r = root(&mut parent, i);
        match cluster_of_root[r] {
            Some(c) => clusters[c].push(i),
            None => {
                cluster_of_root[r] = Some(clusters.len());
                clusters.push(vec![i]);
            }
        }
    }

    // Indices already ascend within clusters; order clusters by first member
    clusters.sort_by_key(|c| c[0]);
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcescan_domain::SourceCategory;

    fn finding(source: &str, keywords: &[&str]) -> SourceFinding {
        SourceFinding {
            source_name: source.to_string(),
            category: SourceCategory::Web,
            url: None,
            published: None,
            matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            scope_context: "Global / Energy".to_string(),
            extracted_text: format!("snippet from {}", source),
        }
    }

    #[test]
    fn test_shared_keyword_groups() {
        let findings = vec![
            finding("a", &["coal demand"]),
            finding("b", &["grid storage"]),
            finding("c", &["Coal Demand", "Trends"]),
        ];
        let clusters = fallback_clusters(&findings);
        assert_eq!(clusters, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn test_transitive_grouping() {
        // a~b via "x", b~c via "y" puts all three together
        let findings = vec![
            finding("a", &["x"]),
            finding("b", &["x", "y"]),
            finding("c", &["y"]),
        ];
        let clusters = fallback_clusters(&findings);
        assert_eq!(clusters, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_singletons_allowed() {
        let findings = vec![finding("a", &["x"]), finding("b", &["y"])];
        let clusters = fallback_clusters(&findings);
        assert_eq!(clusters, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(fallback_clusters(&[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let findings = vec![
            finding("a", &["x"]),
            finding("b", &["y"]),
            finding("c", &["x"]),
            finding("d", &["z", "y"]),
        ];
        let first = fallback_clusters(&findings);
        let second = fallback_clusters(&findings);
        assert_eq!(first, second);
        assert_eq!(first, vec![vec![0, 2], vec![1, 3]]);
    }
}
