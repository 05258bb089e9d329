//! Parse oracle output into structured synthesis results

use crate::error::SynthesizerError;
use forcescan_domain::ImpactRating;
use serde_json::Value;

/// Parsed name/description pair for one cluster
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ForceProfile {
    pub name: String,
    pub description: String,
    pub impact: Option<ImpactRating>,
}

/// Extract JSON from an oracle response, handling markdown code blocks
///
/// Oracles sometimes wrap JSON in markdown fences.
pub(crate) fn extract_json(response: &str) -> Result<String, SynthesizerError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(SynthesizerError::InvalidFormat(
                "Empty code block".to_string(),
            ));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse the oracle's naming response: `{"name": ..., "description": ...}`
/// with an optional `"impact"` field
pub(crate) fn parse_force_profile(response: &str) -> Result<ForceProfile, SynthesizerError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| SynthesizerError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| SynthesizerError::InvalidFormat("Expected JSON object".to_string()))?;

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SynthesizerError::InvalidFormat("Missing or empty 'name'".to_string()))?
        .to_string();

    let description = obj
        .get("description")
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SynthesizerError::InvalidFormat("Missing or empty 'description'".to_string())
        })?
        .to_string();

    let impact = obj
        .get("impact")
        .and_then(|v| v.as_str())
        .and_then(parse_impact);

    Ok(ForceProfile {
        name,
        description,
        impact,
    })
}

fn parse_impact(s: &str) -> Option<ImpactRating> {
    match s.to_ascii_lowercase().as_str() {
        "low" => Some(ImpactRating::Low),
        "medium" => Some(ImpactRating::Medium),
        "high" => Some(ImpactRating::High),
        _ => None,
    }
}

/// Parse the oracle's clustering response: a JSON array of arrays of finding
/// indices, validated to be an exact partition of `0..count`
pub(crate) fn parse_clusters(
    response: &str,
    count: usize,
) -> Result<Vec<Vec<usize>>, SynthesizerError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| SynthesizerError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let outer = json
        .as_array()
        .ok_or_else(|| SynthesizerError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut seen = vec![false; count];

    for (i, cluster_json) in outer.iter().enumerate() {
        let inner = cluster_json.as_array().ok_or_else(|| {
            SynthesizerError::InvalidFormat(format!("Cluster {} is not an array", i))
        })?;

        let mut indices = Vec::new();
        for value in inner {
            let idx = value.as_u64().ok_or_else(|| {
                SynthesizerError::InvalidFormat(format!("Cluster {} has a non-integer index", i))
            })? as usize;

            if idx >= count {
                return Err(SynthesizerError::InvalidFormat(format!(
                    "Index {} out of range (count {})",
                    idx, count
                )));
            }
            if seen[idx] {
                return Err(SynthesizerError::InvalidFormat(format!(
                    "Index {} appears in more than one cluster",
                    idx
                )));
            }
            seen[idx] = true;
            indices.push(idx);
        }

        if indices.is_empty() {
            return Err(SynthesizerError::InvalidFormat(format!(
                "Cluster {} is empty",
                i
            )));
        }

        indices.sort_unstable();
        clusters.push(indices);
    }

    if seen.iter().any(|s| !s) {
        return Err(SynthesizerError::InvalidFormat(
            "Not every finding was assigned to a cluster".to_string(),
        ));
    }

    // Deterministic cluster order regardless of oracle ordering
    clusters.sort_by_key(|c| c[0]);
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_plain() {
        let profile = parse_force_profile(
            r#"{"name": "Plateauing Coal Demand", "description": "Demand has flattened."}"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Plateauing Coal Demand");
        assert_eq!(profile.description, "Demand has flattened.");
        assert_eq!(profile.impact, None);
    }

    #[test]
    fn test_parse_profile_markdown_wrapped() {
        let response = "```json\n{\"name\": \"X\", \"description\": \"Y\", \"impact\": \"High\"}\n```";
        let profile = parse_force_profile(response).unwrap();
        assert_eq!(profile.name, "X");
        assert_eq!(profile.impact, Some(ImpactRating::High));
    }

    #[test]
    fn test_parse_profile_missing_name() {
        let result = parse_force_profile(r#"{"description": "Y"}"#);
        assert!(matches!(result, Err(SynthesizerError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_profile_empty_description() {
        let result = parse_force_profile(r#"{"name": "X", "description": "  "}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_profile_not_json() {
        assert!(parse_force_profile("this is prose, not JSON").is_err());
    }

    #[test]
    fn test_parse_profile_unknown_impact_ignored() {
        let profile =
            parse_force_profile(r#"{"name": "X", "description": "Y", "impact": "Severe"}"#)
                .unwrap();
        assert_eq!(profile.impact, None);
    }

    #[test]
    fn test_parse_clusters_valid() {
        let clusters = parse_clusters("[[1, 0], [2]]", 3).unwrap();
        // Indices sorted within clusters, clusters ordered by first index
        assert_eq!(clusters, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_parse_clusters_missing_index() {
        assert!(parse_clusters("[[0], [1]]", 3).is_err());
    }

    #[test]
    fn test_parse_clusters_duplicate_index() {
        assert!(parse_clusters("[[0, 1], [1, 2]]", 3).is_err());
    }

    #[test]
    fn test_parse_clusters_out_of_range() {
        assert!(parse_clusters("[[0, 5]]", 2).is_err());
    }

    #[test]
    fn test_parse_clusters_empty_cluster() {
        assert!(parse_clusters("[[0, 1], []]", 2).is_err());
    }

    #[test]
    fn test_parse_clusters_markdown_wrapped() {
        let clusters = parse_clusters("```json\n[[0], [1]]\n```", 2).unwrap();
        assert_eq!(clusters, vec![vec![0], vec![1]]);
    }
}
