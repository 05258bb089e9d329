//! Concrete source scanners wired into the scan coordinator.

use forcescan_domain::traits::{ScanOutput, SourceScanner};
use forcescan_domain::{ResearchPlan, SourceCategory, SourceFailure, SourceFinding};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest snippet a scanner emits; paragraphs are cut at a char boundary.
const MAX_SNIPPET_CHARS: usize = 1200;

/// Scans local text documents for the plan's keywords.
///
/// Serves both the `document` and `uploaded` categories; the category tag
/// on emitted findings is set at construction.
pub struct DocumentScanner {
    category: SourceCategory,
}

impl DocumentScanner {
    /// Create a scanner that tags its findings with the given category.
    pub fn new(category: SourceCategory) -> Self {
        Self { category }
    }
}

impl SourceScanner for DocumentScanner {
    fn scan(&self, plan: &ResearchPlan, sources: &[String]) -> Result<ScanOutput, String> {
        let mut output = ScanOutput::default();

        for source in sources {
            let text = match fs::read_to_string(source) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not read '{}': {}", source, e);
                    output.failures.push(SourceFailure {
                        source: source.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let name = Path::new(source)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.clone());

            let found = extract_findings(&text, plan, &name, self.category, None);
            debug!("Document '{}': {} findings", name, found.len());
            output.findings.extend(found);
        }

        Ok(output)
    }
}

/// Fetches web pages and scans their visible text for the plan's keywords.
pub struct WebScanner {
    client: reqwest::Client,
}

impl WebScanner {
    /// Create a scanner with a default HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}

impl Default for WebScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceScanner for WebScanner {
    fn scan(&self, plan: &ResearchPlan, sources: &[String]) -> Result<ScanOutput, String> {
        // The coordinator runs scanners on blocking threads; bring up a
        // local runtime for the async HTTP client.
        let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;

        let mut output = ScanOutput::default();

        for url in sources {
            match runtime.block_on(self.fetch(url)) {
                Ok(body) => {
                    let name = host_name(url);
                    let text = strip_tags(&body);
                    let found = extract_findings(
                        &text,
                        plan,
                        &name,
                        SourceCategory::Web,
                        Some(url.clone()),
                    );
                    debug!("Web '{}': {} findings", name, found.len());
                    output.findings.extend(found);
                }
                Err(reason) => {
                    warn!("Could not fetch '{}': {}", url, reason);
                    output.failures.push(SourceFailure {
                        source: url.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(output)
    }
}

/// One finding per paragraph that matches at least one plan keyword.
fn extract_findings(
    text: &str,
    plan: &ResearchPlan,
    source_name: &str,
    category: SourceCategory,
    url: Option<String>,
) -> Vec<SourceFinding> {
    let mut findings = Vec::new();

    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let matched = matched_keywords(paragraph, &plan.keywords);
        if matched.is_empty() {
            continue;
        }

        findings.push(SourceFinding {
            source_name: source_name.to_string(),
            category,
            url: url.clone(),
            published: None,
            matched_keywords: matched,
            scope_context: plan.scope_context(),
            extracted_text: truncate(paragraph, MAX_SNIPPET_CHARS),
        });
    }

    findings
}

/// Keywords present in the text, case-insensitive, in plan order.
fn matched_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.trim().is_empty() && lower.contains(&k.to_lowercase()))
        .cloned()
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Host portion of a URL, used as the source name ("www." stripped).
fn host_name(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = stripped.split('/').next().unwrap_or(stripped);
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// ASCII case-insensitive prefix test; never re-indexes through a
/// case-folded copy, so offsets stay valid on multibyte input.
fn starts_with_ci(s: &str, prefix: &str) -> bool {
    let (s, prefix) = (s.as_bytes(), prefix.as_bytes());
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// ASCII case-insensitive search returning a byte offset into `haystack`.
///
/// Only valid for ASCII needles: an ASCII byte never matches inside a
/// multibyte UTF-8 sequence, so the returned offset is a char boundary.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Reduce an HTML body to visible text: tags removed, script and style
/// blocks dropped, block-level boundaries turned into paragraph breaks.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];

        if starts_with_ci(rest, "<script") || starts_with_ci(rest, "<style") {
            let close = if starts_with_ci(rest, "<script") {
                "</script>"
            } else {
                "</style>"
            };
            match find_ci(rest, close) {
                Some(end) => rest = &rest[end + close.len()..],
                None => return out,
            }
            continue;
        }

        match rest.find('>') {
            Some(end) => {
                let tag = &rest[1..end];
                if starts_with_ci(tag, "p")
                    || starts_with_ci(tag, "/p")
                    || starts_with_ci(tag, "div")
                    || starts_with_ci(tag, "/div")
                    || starts_with_ci(tag, "br")
                    || starts_with_ci(tag, "h")
                    || starts_with_ci(tag, "/h")
                {
                    out.push_str("\n\n");
                } else {
                    out.push(' ');
                }
                rest = &rest[end + 1..];
            }
            None => return out,
        }
    }

    out.push_str(rest);
    out
}
