//! Robots.txt handling module
//!
//! A crawl fetches its root origin's robots.txt once, at start, and keeps the
//! resulting [`RobotsGate`] for its whole lifetime. The gate is an owned value
//! of the crawl, never shared between crawls.

mod parser;

pub use parser::ParsedRobots;

use reqwest::{Client, StatusCode};
use url::Url;

/// Fetch-permission gate for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsGate {
    /// Enforcement is off: requested off, or robots.txt could not be fetched
    Disabled,
    /// Enforcement is on with the parsed rules of the root origin
    Enforced(ParsedRobots),
}

impl RobotsGate {
    /// Answers whether `url` may be fetched by `user_agent`
    pub fn can_fetch(&self, user_agent: &str, url: &str) -> bool {
        match self {
            Self::Disabled => true,
            Self::Enforced(robots) => robots.is_allowed(url, user_agent),
        }
    }

    /// Returns true if robots rules are being enforced
    pub fn is_enforced(&self) -> bool {
        matches!(self, Self::Enforced(_))
    }
}

/// Builds the robots.txt URL for the origin of `root`
///
/// # Examples
///
/// ```
/// use url::Url;
/// use homepage_harvest::robots::robots_url;
///
/// let root = Url::parse("https://example.test/people/jane?x=1").unwrap();
/// assert_eq!(robots_url(&root).unwrap().as_str(), "https://example.test/robots.txt");
/// ```
pub fn robots_url(root: &Url) -> Option<Url> {
    root.join("/robots.txt").ok()
}

/// Fetches and parses robots.txt for the origin of `root`
///
/// # Outcomes
///
/// | Response | Gate |
/// |----------|------|
/// | 2xx | rules parsed from the body |
/// | 401 / 403 | everything disallowed |
/// | other status | everything allowed |
/// | network or body error | enforcement disabled |
pub async fn fetch_robots(client: &Client, root: &Url) -> RobotsGate {
    let Some(url) = robots_url(root) else {
        tracing::warn!("Cannot derive robots.txt URL from {}; not enforcing", root);
        return RobotsGate::Disabled;
    };

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}; not enforcing robots", url, e);
            return RobotsGate::Disabled;
        }
    };

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::debug!("{} answered {}; disallowing everything", url, status);
        return RobotsGate::Enforced(ParsedRobots::disallow_all());
    }

    if !status.is_success() {
        tracing::debug!("{} answered {}; allowing everything", url, status);
        return RobotsGate::Enforced(ParsedRobots::allow_all());
    }

    match response.text().await {
        Ok(body) => RobotsGate::Enforced(ParsedRobots::from_content(&body)),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}; not enforcing robots", url, e);
            RobotsGate::Disabled
        }
    }
}
