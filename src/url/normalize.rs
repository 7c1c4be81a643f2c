use regex::Regex;
use std::sync::LazyLock;

/// Matches an explicit http(s) scheme prefix, in any letter case
static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://").expect("scheme prefix regex is valid")
});

/// Runs of characters that are not ASCII letters or digits
static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9]+").expect("key separator regex is valid")
});

/// Normalizes a raw URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; empty input yields `None`
/// 2. Prepend `https://` when no `http://` or `https://` prefix is present
/// 3. Remove the fragment (everything from the first `#`)
///
/// Nothing else is touched: host case, default ports and trailing slashes are
/// preserved, so `https://Example.test/` and `https://example.test/` remain
/// distinct crawl targets.
///
/// # Examples
///
/// ```
/// use homepage_harvest::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("example.test/about#team").as_deref(),
///     Some("https://example.test/about")
/// );
/// assert_eq!(normalize_url("   "), None);
/// ```
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut url = if SCHEME_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    if let Some(index) = url.find('#') {
        url.truncate(index);
    }

    let normalized = url.trim_end();
    if normalized.is_empty() {
        return None;
    }

    Some(normalized.to_string())
}

/// Derives a filesystem- and JSON-safe key from a URL
///
/// Every run of characters outside `[A-Za-z0-9]` collapses into a single `_`,
/// and leading/trailing separators are removed.
///
/// # Examples
///
/// ```
/// use homepage_harvest::url::url_key;
///
/// assert_eq!(url_key("https://example.test/about-us/"), "https_example_test_about_us");
/// ```
pub fn url_key(url: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(url, "_")
        .trim_matches('_')
        .to_string()
}
