//! Harvest coordinator - run-level orchestration
//!
//! This module drives a whole run over the selected candidates:
//! - Building the shared HTTP client and per-domain throttle
//! - Skipping candidates without a homepage or with existing output
//! - Running one [`SiteCrawler`] per candidate on a bounded worker pool
//! - Writing results and tallying [`RunStatistics`]

use crate::config::{compile_patterns, Config, CrawlerConfig};
use crate::crawler::engine::{CrawlTarget, SiteCrawler};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::throttle::DomainThrottle;
use crate::input::{load_exclude_list, Candidate};
use crate::output::{CandidateOutcome, OutputHandler, RunStatistics};
use crate::state::CrawlState;
use crate::url::normalize_url;
use crate::Result;
use futures::stream::{self, StreamExt};
use regex::Regex;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    exclude: Vec<Regex>,
    client: Client,
    throttle: DomainThrottle,
    output: Arc<dyn OutputHandler>,
    interrupt: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `exclude` - Compiled exclusion patterns applied to every crawl
    /// * `output` - Where results are written
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(
        config: Config,
        exclude: Vec<Regex>,
        output: Arc<dyn OutputHandler>,
    ) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent.name,
            Duration::from_secs(config.crawler.timeout_seconds),
        )?;

        Ok(Self {
            config: Arc::new(config),
            exclude,
            client,
            throttle: DomainThrottle::new(),
            output,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that stops every crawl of this run when set
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Processes every candidate and returns the run statistics
    ///
    /// Up to `run.workers` candidates are crawled at once. Candidates finish
    /// and are written in any order.
    pub async fn run(&self, candidates: &[Candidate]) -> RunStatistics {
        let total = candidates.len();
        let workers = self.config.run.workers.max(1);
        tracing::info!("Processing {} candidates with {} workers", total, workers);

        let mut stats = RunStatistics::default();
        let mut outcomes = stream::iter(candidates.iter().enumerate())
            .map(|(i, candidate)| self.process_candidate(i + 1, total, candidate))
            .buffer_unordered(workers);

        while let Some(outcome) = outcomes.next().await {
            stats.record(outcome);
        }

        stats
    }

    /// Handles one candidate from selection to written output
    async fn process_candidate(
        &self,
        idx: usize,
        total: usize,
        candidate: &Candidate,
    ) -> CandidateOutcome {
        let id = &candidate.person_id;
        let name = candidate.display_name();

        let Some(homepage) = candidate.homepage_url.as_deref().and_then(normalize_url) else {
            tracing::info!("[{}/{}] Skipping {} {}: no homepage_url", idx, total, id, name);
            return CandidateOutcome::NoHomepage;
        };

        if self.output.exists(candidate) {
            tracing::info!("[{}/{}] Skipping {} {}: already scraped", idx, total, id, name);
            return CandidateOutcome::AlreadyScraped;
        }

        if self.interrupt.load(Ordering::Relaxed) {
            return CandidateOutcome::Aborted;
        }

        tracing::info!("[{}/{}] Scraping {} {} -> {}", idx, total, id, name, homepage);

        let target = CrawlTarget::from_config(homepage, &self.config, self.exclude.clone());
        let crawler = SiteCrawler::new(target, self.client.clone(), self.throttle.clone())
            .with_interrupt(self.interrupt_flag());

        let report = match crawler.run().await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("[{}/{}] Failed to crawl {} {}: {}", idx, total, id, name, e);
                return CandidateOutcome::Failed;
            }
        };

        if report.state == CrawlState::Aborted {
            tracing::warn!("[{}/{}] Interrupted while scraping {} {}", idx, total, id, name);
            return CandidateOutcome::Aborted;
        }

        if report.results.is_empty() {
            tracing::info!("[{}/{}] No pages scraped for {} {}", idx, total, id, name);
            return CandidateOutcome::Empty;
        }

        // Serializing and writing the file blocks, so it runs off the async workers.
        let pages = report.results.len();
        let output = Arc::clone(&self.output);
        let owned = candidate.clone();
        let written =
            tokio::task::spawn_blocking(move || output.write(&owned, &report.results)).await;

        match written {
            Ok(Ok(path)) => {
                tracing::info!(
                    "[{}/{}] Saved {} pages for {} {} to {}",
                    idx,
                    total,
                    pages,
                    id,
                    name,
                    path.display()
                );
                CandidateOutcome::Scraped(pages)
            }
            Ok(Err(e)) => {
                tracing::error!("[{}/{}] Failed to save {} {}: {}", idx, total, id, name, e);
                CandidateOutcome::Failed
            }
            Err(e) => {
                tracing::error!("[{}/{}] Write task for {} {} failed: {}", idx, total, id, name, e);
                CandidateOutcome::Failed
            }
        }
    }
}

/// Compiles the inline exclusion patterns plus those of the exclude file
///
/// # Returns
///
/// * `Ok(Vec<Regex>)` - Every pattern compiled
/// * `Err(HarvestError)` - The exclude file was unreadable or a pattern is invalid
pub fn build_exclusions(config: &CrawlerConfig) -> Result<Vec<Regex>> {
    let mut patterns = config.exclude_patterns.clone();

    if let Some(path) = &config.exclude_file {
        let from_file = load_exclude_list(path)?;
        tracing::debug!("Loaded {} exclusion patterns from {}", from_file.len(), path.display());
        patterns.extend(from_file);
    }

    Ok(compile_patterns(&patterns)?)
}
