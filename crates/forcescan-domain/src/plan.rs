//! Research plans - the validated input to a pipeline run

use std::fmt;

/// Default keywords scanned when the user supplies none
pub const DEFAULT_KEYWORDS: [&str; 6] = [
    "Forces",
    "Trends",
    "Mega trends",
    "Future of",
    "Signals",
    "Structural shifts",
];

/// Default web sources grouped by catalogue section
const DEFAULT_WEB_SOURCES: [&str; 22] = [
    // Consulting firms
    "https://www.mckinsey.com",
    "https://www.bain.com",
    "https://www.bcg.com",
    // Government and non-profit
    "https://www.weforum.org",
    "https://intelligence.weforum.org",
    "https://www.imf.org",
    "https://www.consilium.europa.eu/en",
    // News and tech publications
    "https://www.economist.com",
    "https://www.wired.com",
    "https://www.technologyreview.com",
    "https://www.forbes.com",
    "https://www.newscientist.com",
    "https://www.bloomberg.com",
    "https://www.cbinsights.com",
    // Futurists
    "https://futuristspeaker.com",
    "https://www.futuristgerd.com",
    "https://burrus.com",
    "https://www.diamandis.com",
    "https://www.pearson.uk.com",
    "https://www.matthewgriffin.info",
    "https://www.kurzweilai.net",
    "https://richardvanhooijdonk.com/en",
];

/// Validation failures for a research plan
///
/// A plan failing validation is fatal for the run and returned to the caller
/// immediately, before any scanning starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The plan has no keywords to match against
    NoKeywords,
    /// The plan has no non-empty source group to scan
    NoSources,
    /// A required text field is empty
    EmptyField(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeywords => write!(f, "plan has no keywords"),
            Self::NoSources => write!(f, "plan has no sources to scan"),
            Self::EmptyField(name) => write!(f, "plan field '{}' is empty", name),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A named group of sources to scan (category name → ordered source URIs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup {
    /// Category name ("web", "document", "uploaded", or custom)
    pub category: String,
    /// Ordered source identifiers/URIs
    pub sources: Vec<String>,
}

/// User-supplied inputs to a run, merged with defaults into a [`ResearchPlan`]
#[derive(Debug, Clone, Default)]
pub struct PlanInput {
    /// Specific industry to focus on (required)
    pub target_industry: String,
    /// Geographic or market scope (defaults to "Global")
    pub target_market: Option<String>,
    /// Keywords to search for (defaults to [`DEFAULT_KEYWORDS`])
    pub keywords: Vec<String>,
    /// Time horizon for the analysis (defaults to "5+ years")
    pub time_horizon: Option<String>,
    /// Source groups (defaults to the built-in web catalogue)
    pub source_groups: Vec<SourceGroup>,
    /// Paths to user-uploaded files
    pub uploaded_files: Vec<String>,
}

/// The structured research plan carried through the pipeline
///
/// Immutable once approved at Checkpoint 1; a reviewer revision produces a
/// new plan value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchPlan {
    /// Geographic or market scope
    pub target_market: String,
    /// Specific industry to focus on
    pub target_industry: String,
    /// Ordered, deduplicated keywords
    pub keywords: Vec<String>,
    /// Time horizon for the analysis
    pub time_horizon: String,
    /// Source groups in configuration order
    pub source_groups: Vec<SourceGroup>,
    /// Paths to user-uploaded files
    pub uploaded_files: Vec<String>,
}

impl ResearchPlan {
    /// Build a plan by merging user input with defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use forcescan_domain::PlanInput;
    /// use forcescan_domain::ResearchPlan;
    ///
    /// let plan = ResearchPlan::from_input(PlanInput {
    ///     target_industry: "Banking".to_string(),
    ///     ..Default::default()
    /// });
    /// assert_eq!(plan.target_market, "Global");
    /// assert!(!plan.keywords.is_empty());
    /// ```
    pub fn from_input(input: PlanInput) -> Self {
        let keywords = if input.keywords.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            dedup_preserving_order(input.keywords)
        };

        let mut source_groups = if input.source_groups.is_empty() {
            vec![SourceGroup {
                category: "web".to_string(),
                sources: DEFAULT_WEB_SOURCES.iter().map(|s| s.to_string()).collect(),
            }]
        } else {
            input.source_groups
        };

        // Uploaded files are a source group of their own
        if !input.uploaded_files.is_empty()
            && !source_groups.iter().any(|g| g.category == "uploaded")
        {
            source_groups.push(SourceGroup {
                category: "uploaded".to_string(),
                sources: input.uploaded_files.clone(),
            });
        }

        Self {
            target_market: input.target_market.unwrap_or_else(|| "Global".to_string()),
            target_industry: input.target_industry,
            keywords,
            time_horizon: input.time_horizon.unwrap_or_else(|| "5+ years".to_string()),
            source_groups,
            uploaded_files: input.uploaded_files,
        }
    }

    /// Validate the plan before it may leave the Configuration stage
    ///
    /// A plan needs at least one keyword and one non-empty source group.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_industry.trim().is_empty() {
            return Err(ValidationError::EmptyField("target_industry"));
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ValidationError::NoKeywords);
        }
        if !self.source_groups.iter().any(|g| !g.sources.is_empty()) {
            return Err(ValidationError::NoSources);
        }
        Ok(())
    }

    /// The "market / industry" context string attached to findings
    pub fn scope_context(&self) -> String {
        format!("{} / {}", self.target_market, self.target_industry)
    }

    /// Produce a new plan with a replaced keyword list (review revision)
    pub fn with_keywords(&self, keywords: Vec<String>) -> Self {
        let mut plan = self.clone();
        plan.keywords = dedup_preserving_order(keywords);
        plan
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !item.trim().is_empty() && !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_input() -> PlanInput {
        PlanInput {
            target_industry: "Energy".to_string(),
            keywords: vec!["coal demand".to_string()],
            source_groups: vec![SourceGroup {
                category: "web".to_string(),
                sources: vec!["iea.org".to_string()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let plan = ResearchPlan::from_input(PlanInput {
            target_industry: "Banking".to_string(),
            ..Default::default()
        });
        assert_eq!(plan.target_market, "Global");
        assert_eq!(plan.time_horizon, "5+ years");
        assert_eq!(plan.keywords.len(), DEFAULT_KEYWORDS.len());
        assert_eq!(plan.source_groups.len(), 1);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_default_catalogue_covers_all_sections() {
        let plan = ResearchPlan::from_input(PlanInput {
            target_industry: "Banking".to_string(),
            ..Default::default()
        });
        let web = &plan.source_groups[0].sources;
        // Consulting, government/non-profit, news, futurists
        assert!(web.iter().any(|s| s.contains("mckinsey.com")));
        assert!(web.iter().any(|s| s.contains("weforum.org")));
        assert!(web.iter().any(|s| s.contains("economist.com")));
        assert!(web.iter().any(|s| s.contains("futuristspeaker.com")));
        assert!(web.iter().any(|s| s.contains("kurzweilai.net")));
        assert_eq!(web.len(), 22);
    }

    #[test]
    fn test_valid_plan_passes() {
        let plan = ResearchPlan::from_input(minimal_input());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_keywords_deduped() {
        let mut input = minimal_input();
        input.keywords = vec![
            "coal demand".to_string(),
            "coal demand".to_string(),
            "  ".to_string(),
            "grid storage".to_string(),
        ];
        let plan = ResearchPlan::from_input(input);
        assert_eq!(plan.keywords, vec!["coal demand", "grid storage"]);
    }

    #[test]
    fn test_empty_industry_fails() {
        let mut input = minimal_input();
        input.target_industry = String::new();
        let plan = ResearchPlan::from_input(input);
        assert_eq!(
            plan.validate(),
            Err(ValidationError::EmptyField("target_industry"))
        );
    }

    #[test]
    fn test_no_sources_fails() {
        let mut plan = ResearchPlan::from_input(minimal_input());
        plan.source_groups = vec![SourceGroup {
            category: "web".to_string(),
            sources: Vec::new(),
        }];
        assert_eq!(plan.validate(), Err(ValidationError::NoSources));
    }

    #[test]
    fn test_no_keywords_fails() {
        let mut plan = ResearchPlan::from_input(minimal_input());
        plan.keywords = Vec::new();
        assert_eq!(plan.validate(), Err(ValidationError::NoKeywords));
    }

    #[test]
    fn test_uploaded_files_become_group() {
        let mut input = minimal_input();
        input.uploaded_files = vec!["notes.txt".to_string()];
        let plan = ResearchPlan::from_input(input);
        assert!(plan
            .source_groups
            .iter()
            .any(|g| g.category == "uploaded" && g.sources == vec!["notes.txt"]));
    }

    #[test]
    fn test_with_keywords_is_new_artifact() {
        let plan = ResearchPlan::from_input(minimal_input());
        let revised = plan.with_keywords(vec!["hydrogen".to_string()]);
        assert_eq!(plan.keywords, vec!["coal demand"]);
        assert_eq!(revised.keywords, vec!["hydrogen"]);
    }
}
