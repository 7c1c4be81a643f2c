//! Robots.txt parser implementation
//!
//! This module wraps the robotstxt crate's matcher behind a small value type.

use robotstxt::DefaultMatcher;
use std::panic::{self, AssertUnwindSafe};
use url::Url;

/// What a robots.txt response means for the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rules {
    /// Every URL may be fetched
    AllowAll,
    /// No URL may be fetched (robots.txt answered 401/403)
    DisallowAll,
    /// Raw robots.txt content, evaluated per query
    Content(String),
}

/// Parsed robots.txt data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    rules: Rules,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: Rules::Content(content.to_string()),
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    pub fn allow_all() -> Self {
        Self {
            rules: Rules::AllowAll,
        }
    }

    /// Creates a ParsedRobots that denies everything
    pub fn disallow_all() -> Self {
        Self {
            rules: Rules::DisallowAll,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// The URL must be absolute. A URL that does not parse, or a matcher
    /// failure, answers `false`.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        let content = match &self.rules {
            Rules::AllowAll => return true,
            Rules::DisallowAll => return false,
            Rules::Content(content) => content,
        };

        if Url::parse(url).is_err() {
            return false;
        }

        if content.trim().is_empty() {
            return true;
        }

        panic::catch_unwind(AssertUnwindSafe(|| {
            let mut matcher = DefaultMatcher::default();
            matcher.one_agent_allowed_by_robots(content, user_agent, url)
        }))
        .unwrap_or(false)
    }
}
