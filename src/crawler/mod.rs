//! Crawler module for site harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with outcome classification
//! - Visible text and link extraction
//! - Per-domain request throttling
//! - The single-site breadth-first engine
//! - Run-level coordination over many candidates

mod coordinator;
mod engine;
mod fetcher;
mod parser;
mod throttle;

pub use coordinator::{build_exclusions, Coordinator};
pub use engine::{CrawlReport, CrawlTarget, SiteCrawler};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, FetchedPage};
pub use parser::{parse_html, ParsedPage};
pub use throttle::DomainThrottle;

use crate::config::Config;
use crate::input::load_missing_candidates;
use crate::output::{JsonDirectoryOutput, RunStatistics};
use crate::Result;
use std::sync::Arc;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. Compile the exclusion patterns
/// 2. Select the candidates that have no output yet
/// 3. Crawl each candidate's site on the worker pool
/// 4. Write one JSON file per candidate with collected text
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Per-candidate tallies for the run
/// * `Err(HarvestError)` - Candidates, patterns or output directory unusable
pub async fn crawl(config: Config) -> Result<RunStatistics> {
    let exclude = build_exclusions(&config.crawler)?;
    let candidates = load_missing_candidates(
        &config.input.candidates_csv,
        &config.input.json_dirs,
        config.run.limit,
    )?;
    let output = JsonDirectoryOutput::new(&config.output.json_dir)?;

    let coordinator = Coordinator::new(config, exclude, Arc::new(output))?;
    Ok(coordinator.run(&candidates).await)
}
