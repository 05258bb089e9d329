//! Raw findings produced by source scanners, prior to synthesis

use std::fmt;

/// Category of source a finding was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    /// Public web source (news site, consulting firm, blog)
    Web,
    /// Document fetched from a configured repository (PDF, report)
    Document,
    /// File uploaded by the user alongside the plan
    Uploaded,
}

impl SourceCategory {
    /// Parse a category from its configuration name
    ///
    /// # Examples
    ///
    /// ```
    /// use forcescan_domain::SourceCategory;
    ///
    /// assert_eq!(SourceCategory::parse("web"), Some(SourceCategory::Web));
    /// assert_eq!(SourceCategory::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Some(Self::Web),
            "document" | "pdf" => Some(Self::Document),
            "uploaded" | "upload" => Some(Self::Uploaded),
            _ => None,
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web => write!(f, "web"),
            Self::Document => write!(f, "document"),
            Self::Uploaded => write!(f, "uploaded"),
        }
    }
}

/// One raw extracted text snippet plus its source metadata
///
/// Findings are produced by scan workers and never mutated after creation.
/// They are owned by the batch that produced them until consumed by
/// synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFinding {
    /// Name of the source (website domain, filename)
    pub source_name: String,

    /// Category of the source
    pub category: SourceCategory,

    /// URL of the source, if applicable
    pub url: Option<String>,

    /// Publication date, if available (ISO-8601 string)
    pub published: Option<String>,

    /// Keywords that led to this finding
    pub matched_keywords: Vec<String>,

    /// Target market and industry context at scan time
    pub scope_context: String,

    /// The relevant text snippet extracted
    pub extracted_text: String,
}

impl SourceFinding {
    /// Source identity used for deduplication: name plus URL
    pub fn source_identity(&self) -> (&str, Option<&str>) {
        (self.source_name.as_str(), self.url.as_deref())
    }
}

/// A recorded per-source failure during scanning
///
/// Individual source failures never abort a scan; they are collected and
/// surfaced alongside whatever succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    /// The source (or category) that failed
    pub source: String,

    /// What went wrong (unreachable, extraction error, timeout)
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_roundtrip() {
        for cat in [
            SourceCategory::Web,
            SourceCategory::Document,
            SourceCategory::Uploaded,
        ] {
            assert_eq!(SourceCategory::parse(&cat.to_string()), Some(cat));
        }
    }

    #[test]
    fn test_category_parse_aliases() {
        assert_eq!(SourceCategory::parse("PDF"), Some(SourceCategory::Document));
        assert_eq!(SourceCategory::parse("upload"), Some(SourceCategory::Uploaded));
        assert_eq!(SourceCategory::parse(""), None);
    }

    #[test]
    fn test_source_identity() {
        let finding = SourceFinding {
            source_name: "iea.org".to_string(),
            category: SourceCategory::Web,
            url: Some("https://iea.org/coal".to_string()),
            published: None,
            matched_keywords: vec!["coal demand".to_string()],
            scope_context: "Global / Energy".to_string(),
            extracted_text: "Coal demand is plateauing".to_string(),
        };
        assert_eq!(
            finding.source_identity(),
            ("iea.org", Some("https://iea.org/coal"))
        );
    }
}
