//! Identified forces - the synthesized output of the research pipeline

use crate::finding::{SourceCategory, SourceFinding};
use std::fmt;

/// Unique identifier for an identified force based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (forces sort by synthesis time)
/// - 128-bit uniqueness, never reused
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForceId(u128);

impl ForceId {
    /// Generate a new UUIDv7-based ForceId
    ///
    /// # Examples
    ///
    /// ```
    /// use forcescan_domain::ForceId;
    ///
    /// let id = ForceId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ForceId from a raw u128 value
    ///
    /// This is primarily for host-side deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ForceId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use forcescan_domain::ForceId;
    ///
    /// let id = ForceId::new();
    /// let parsed = ForceId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ForceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ForceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Denormalized evidence pointer embedded inside a force
///
/// Many references may point at the same underlying finding: one finding can
/// support multiple forces.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReference {
    /// Name of the source (website domain, filename)
    pub source_name: String,

    /// Category of the source
    pub category: SourceCategory,

    /// URL of the source, if applicable
    pub url: Option<String>,

    /// Publication date, if available
    pub published: Option<String>,

    /// The specific snippet backing the claim
    pub snippet: String,
}

impl From<&SourceFinding> for SourceReference {
    fn from(finding: &SourceFinding) -> Self {
        Self {
            source_name: finding.source_name.clone(),
            category: finding.category,
            url: finding.url.clone(),
            published: finding.published.clone(),
            snippet: finding.extracted_text.clone(),
        }
    }
}

/// Qualitative impact rating for a force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactRating {
    /// Marginal effect within the time horizon
    Low,
    /// Material effect on parts of the industry
    Medium,
    /// Structural effect across the industry
    High,
}

impl fmt::Display for ImpactRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// A distinct market force, trend, or signal identified by synthesis
///
/// Forces are immutable artifacts: a review cycle that revises content
/// produces a new value, but the `id` assigned at synthesis time is carried
/// over and is never reused for a different force.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedForce {
    /// Stable identifier, generated at synthesis time
    pub id: ForceId,

    /// Concise name for the force
    pub name: String,

    /// Detailed description (empty when synthesis degraded)
    pub description: String,

    /// Keywords associated with this force
    pub keywords: Vec<String>,

    /// Geographic/market scope tags
    pub scope: Vec<String>,

    /// Time horizon relevance
    pub time_horizon: String,

    /// Qualitative impact rating, when assessed
    pub impact: Option<ImpactRating>,

    /// Evidence backing this force, first-seen order; never empty
    pub supporting_sources: Vec<SourceReference>,

    /// Set when the synthesis oracle failed for this cluster and the
    /// description needs to be written by hand
    pub needs_manual_synthesis: bool,
}

impl IdentifiedForce {
    /// Create a force, enforcing the evidence invariant
    ///
    /// Returns an error if `supporting_sources` is empty: a force without
    /// evidence must never exist.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ForceId,
        name: String,
        description: String,
        keywords: Vec<String>,
        scope: Vec<String>,
        time_horizon: String,
        supporting_sources: Vec<SourceReference>,
    ) -> Result<Self, String> {
        if supporting_sources.is_empty() {
            return Err(format!("force '{}' has no supporting sources", name));
        }
        Ok(Self {
            id,
            name,
            description,
            keywords,
            scope,
            time_horizon,
            impact: None,
            supporting_sources,
            needs_manual_synthesis: false,
        })
    }

    /// Mark this force as needing manual synthesis
    pub fn flagged_manual(mut self) -> Self {
        self.needs_manual_synthesis = true;
        self
    }

    /// Set the impact rating
    pub fn with_impact(mut self, impact: ImpactRating) -> Self {
        self.impact = Some(impact);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> SourceReference {
        SourceReference {
            source_name: "iea.org".to_string(),
            category: SourceCategory::Web,
            url: None,
            published: None,
            snippet: "snippet".to_string(),
        }
    }

    #[test]
    fn test_force_id_ordering() {
        let id1 = ForceId::from_value(1000);
        let id2 = ForceId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_force_id_chronological() {
        // UUIDv7s generated in sequence should be chronologically ordered
        let id1 = ForceId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ForceId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp(), "Timestamps should be ordered");
    }

    #[test]
    fn test_force_id_display_and_parse() {
        let id = ForceId::new();
        let id_str = id.to_string();

        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = ForceId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_force_id_invalid_string() {
        assert!(ForceId::from_string("not-a-valid-uuid").is_err());
        assert!(ForceId::from_string("").is_err());
    }

    #[test]
    fn test_force_requires_evidence() {
        let result = IdentifiedForce::new(
            ForceId::new(),
            "Plateauing Coal Demand".to_string(),
            "Demand has flattened".to_string(),
            vec!["coal demand".to_string()],
            vec!["Global".to_string()],
            "5+ years".to_string(),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_force_with_evidence() {
        let force = IdentifiedForce::new(
            ForceId::new(),
            "Plateauing Coal Demand".to_string(),
            String::new(),
            vec!["coal demand".to_string()],
            vec!["Global".to_string()],
            "5+ years".to_string(),
            vec![reference()],
        )
        .unwrap()
        .flagged_manual();

        assert!(force.needs_manual_synthesis);
        assert_eq!(force.supporting_sources.len(), 1);
    }

    #[test]
    fn test_reference_from_finding() {
        let finding = SourceFinding {
            source_name: "iea.org".to_string(),
            category: SourceCategory::Web,
            url: Some("https://iea.org".to_string()),
            published: Some("2025-04-01".to_string()),
            matched_keywords: vec!["coal demand".to_string()],
            scope_context: "Global / Energy".to_string(),
            extracted_text: "Coal demand is plateauing".to_string(),
        };
        let reference = SourceReference::from(&finding);
        assert_eq!(reference.source_name, "iea.org");
        assert_eq!(reference.snippet, "Coal demand is plateauing");
        assert_eq!(reference.category, SourceCategory::Web);
    }
}
