//! Single-site crawl engine
//!
//! A [`SiteCrawler`] walks one site breadth-first from its root URL. It owns
//! the frontier, the visited set, the robots gate and the results of its
//! crawl; only the HTTP client and the [`DomainThrottle`] are shared with
//! other crawls.

use crate::config::Config;
use crate::crawler::fetcher::{fetch_page, FetchOutcome, FetchedPage};
use crate::crawler::parser::parse_html;
use crate::crawler::throttle::DomainThrottle;
use crate::output::CrawlStats;
use crate::robots::{fetch_robots, RobotsGate};
use crate::state::{CrawlState, Frontier, ResultMap};
use crate::url::{classify, in_scope, network_location, normalize_url, url_key};
use crate::{HarvestError, Result, UrlError};
use regex::Regex;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Immutable description of one site crawl
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    /// Normalized starting URL
    pub root_url: String,
    /// Maximum number of pages with text to collect
    pub max_pages: usize,
    /// Minimum spacing between requests to the root's domain (seconds)
    pub delay_seconds: f64,
    /// Per-request timeout
    pub timeout: Duration,
    /// Sent with every request and used for robots.txt queries
    pub user_agent: String,
    /// Whether robots.txt is fetched and enforced
    pub respect_robots: bool,
    /// URLs matching any of these are never fetched
    pub exclude: Vec<Regex>,
}

impl CrawlTarget {
    /// Builds a target for `root_url` from the crawler settings of `config`
    pub fn from_config(root_url: impl Into<String>, config: &Config, exclude: Vec<Regex>) -> Self {
        Self {
            root_url: root_url.into(),
            max_pages: config.crawler.max_pages,
            delay_seconds: config.crawler.delay_seconds,
            timeout: Duration::from_secs(config.crawler.timeout_seconds),
            user_agent: config.user_agent.name.clone(),
            respect_robots: config.crawler.respect_robots,
            exclude,
        }
    }
}

/// Result of a finished crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// `Completed` or `Aborted`
    pub state: CrawlState,
    /// URL key to page text
    pub results: ResultMap,
    /// Per-URL outcome counters
    pub stats: CrawlStats,
    /// Distinct URLs dequeued
    pub visited: usize,
}

/// Breadth-first crawler for one site
pub struct SiteCrawler {
    target: CrawlTarget,
    client: Client,
    throttle: DomainThrottle,
    interrupt: Arc<AtomicBool>,
    state: CrawlState,
    frontier: Frontier,
    results: ResultMap,
    stats: CrawlStats,
}

impl SiteCrawler {
    /// Creates an idle crawler
    ///
    /// # Arguments
    ///
    /// * `target` - What to crawl and how
    /// * `client` - HTTP client shared by the run
    /// * `throttle` - Per-domain delay gate shared by the run
    pub fn new(target: CrawlTarget, client: Client, throttle: DomainThrottle) -> Self {
        let frontier = Frontier::seeded(target.root_url.clone());

        Self {
            target,
            client,
            throttle,
            interrupt: Arc::new(AtomicBool::new(false)),
            state: CrawlState::Idle,
            frontier,
            results: ResultMap::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Uses `flag` as the cancellation signal, checked once per page
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    fn transition(&mut self, next: CrawlState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("{}: {} -> {}", self.target.root_url, self.state, next);
        self.state = next;
        Ok(())
    }

    /// Runs the crawl to completion or interruption
    ///
    /// Per-URL failures never end the crawl. The only error is a root URL
    /// that cannot be parsed or has no host, in which case the crawl is
    /// aborted before any request is made.
    pub async fn run(mut self) -> Result<CrawlReport> {
        let (root, domain) = match parse_root(&self.target.root_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.transition(CrawlState::Aborted)?;
                return Err(e.into());
            }
        };

        self.transition(CrawlState::Running)?;

        let robots = if self.target.respect_robots {
            fetch_robots(&self.client, &root).await
        } else {
            RobotsGate::Disabled
        };

        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                tracing::debug!("{}: interrupted", self.target.root_url);
                self.transition(CrawlState::Aborted)?;
                break;
            }

            if self.results.len() >= self.target.max_pages {
                tracing::debug!("{}: page budget reached", self.target.root_url);
                self.transition(CrawlState::Completed)?;
                break;
            }

            let Some(url) = self.frontier.next_unvisited() else {
                self.transition(CrawlState::Completed)?;
                break;
            };

            self.visit(&url, &domain, &robots).await;
        }

        tracing::debug!(
            "{}: {} visited, {} pages kept, {} skipped ({:?})",
            self.target.root_url,
            self.frontier.visited_count(),
            self.results.len(),
            self.stats.skipped(),
            self.stats
        );

        Ok(CrawlReport {
            state: self.state,
            visited: self.frontier.visited_count(),
            results: self.results,
            stats: self.stats,
        })
    }

    /// Filters, fetches and processes one dequeued URL
    async fn visit(&mut self, url: &str, domain: &str, robots: &RobotsGate) {
        let decision = classify(&self.target.root_url, url, &self.target.exclude);
        if !decision.is_in_scope() {
            tracing::trace!("Skipping {}: {:?}", url, decision);
            self.stats.out_of_scope += 1;
            return;
        }

        if !robots.can_fetch(&self.target.user_agent, url) {
            tracing::debug!("Skipping {}: disallowed by robots.txt", url);
            self.stats.robots_denied += 1;
            return;
        }

        self.throttle
            .wait_for_slot(domain, self.target.delay_seconds)
            .await;

        match fetch_page(&self.client, url, self.target.timeout).await {
            FetchOutcome::Success(page) => self.process_page(url, page),
            FetchOutcome::HttpError(status) => {
                tracing::debug!("Skipping {}: HTTP {}", url, status);
                self.stats.http_errors += 1;
            }
            FetchOutcome::NonHtml(content_type) => {
                tracing::debug!("Skipping {}: content type {:?}", url, content_type);
                self.stats.non_html += 1;
            }
            FetchOutcome::NetworkError(error) => {
                tracing::debug!("Skipping {}: {}", url, error);
                self.stats.network_errors += 1;
            }
        }
    }

    /// Stores the page text and queues its in-scope links
    fn process_page(&mut self, url: &str, page: FetchedPage) {
        self.stats.fetched += 1;

        let Ok(base) = Url::parse(url) else {
            return;
        };
        let parsed = parse_html(&page.body, &base);

        if parsed.text.is_empty() {
            tracing::debug!("No visible text at {}", url);
            self.stats.empty_text += 1;
        } else {
            tracing::debug!("Collected {} ({} bytes)", url, parsed.text.len());
            self.results.insert(url_key(url), parsed.text);
        }

        let mut queued = 0;
        for link in parsed.links {
            let Some(normalized) = normalize_url(&link) else {
                continue;
            };
            if !in_scope(&self.target.root_url, &normalized, &self.target.exclude) {
                continue;
            }
            if self.frontier.push_unvisited(normalized) {
                queued += 1;
            }
        }
        tracing::trace!(
            "Queued {} links from {} ({} pending)",
            queued,
            url,
            self.frontier.len()
        );
    }
}

/// Parses the root URL and derives the throttle key for its domain
fn parse_root(root_url: &str) -> std::result::Result<(Url, String), UrlError> {
    if root_url.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let root = Url::parse(root_url).map_err(|e| UrlError::Parse(format!("{}: {}", root_url, e)))?;
    let domain =
        network_location(&root).ok_or_else(|| UrlError::MissingHost(root_url.to_string()))?;

    Ok((root, domain))
}
