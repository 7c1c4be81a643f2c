use crate::url::domain::network_location_of;
use regex::Regex;
use url::Url;

/// Path extensions that never hold page content (documents, media, archives, data)
pub const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".mp4", ".mp3", ".wav", ".zip",
    ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".csv", ".json", ".xml",
];

/// Why a URL was accepted or rejected by the scope filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDecision {
    /// Same host, content-like path, no exclusion pattern matched
    InScope,
    /// Host differs from the crawl root, or the URL is malformed
    OtherDomain,
    /// Path ends with one of [`SKIP_EXTENSIONS`]
    SkippedExtension,
    /// An exclusion pattern matched the URL text
    Excluded,
}

impl ScopeDecision {
    /// Returns true if the URL may be fetched
    pub fn is_in_scope(&self) -> bool {
        matches!(self, Self::InScope)
    }
}

/// Checks whether two URLs share the same network location, case-insensitively
///
/// Malformed URLs never match.
pub fn is_same_domain(base: &str, candidate: &str) -> bool {
    match (network_location_of(base), network_location_of(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Checks whether the URL path ends with a non-page extension
pub fn has_skip_extension(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_lowercase();
    SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Checks whether any exclusion pattern matches the URL text
pub fn is_excluded(url: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(url))
}

/// Decides whether `candidate` belongs to the crawl rooted at `root`
///
/// All three checks (same domain, extension, exclusion) must pass.
///
/// # Examples
///
/// ```
/// use homepage_harvest::url::in_scope;
///
/// assert!(in_scope("https://example.test", "https://EXAMPLE.test/about", &[]));
/// assert!(!in_scope("https://example.test", "https://other.test/", &[]));
/// assert!(!in_scope("https://example.test", "https://example.test/cv.pdf", &[]));
/// ```
pub fn in_scope(root: &str, candidate: &str, exclude: &[Regex]) -> bool {
    classify(root, candidate, exclude).is_in_scope()
}

/// Runs the scope checks and reports the first one that rejects
pub fn classify(root: &str, candidate: &str, exclude: &[Regex]) -> ScopeDecision {
    if !is_same_domain(root, candidate) {
        return ScopeDecision::OtherDomain;
    }

    if has_skip_extension(candidate) {
        return ScopeDecision::SkippedExtension;
    }

    if is_excluded(candidate, exclude) {
        return ScopeDecision::Excluded;
    }

    ScopeDecision::InScope
}
