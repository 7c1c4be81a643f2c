//! Output module for persisting crawl results
//!
//! This module handles:
//! - The [`OutputHandler`] interface for result writers
//! - Writing one JSON file per candidate
//! - Recording and printing run statistics

mod json;
pub mod stats;
mod traits;

pub use json::{safe_filename, JsonDirectoryOutput};
pub use stats::{print_statistics, CandidateOutcome, CrawlStats, RunStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
