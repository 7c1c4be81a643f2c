//! Output handler traits and types
//!
//! This module defines the trait interface for result writers and the
//! errors they report.

use crate::input::Candidate;
use crate::state::ResultMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result writers
///
/// One handler is shared by every worker of a run, so implementations must
/// be thread-safe. Each candidate maps to exactly one artifact.
pub trait OutputHandler: Send + Sync {
    /// Location of the artifact for `candidate`
    fn output_path(&self, candidate: &Candidate) -> PathBuf;

    /// Returns true if the artifact for `candidate` already exists
    fn exists(&self, candidate: &Candidate) -> bool {
        self.output_path(candidate).exists()
    }

    /// Persists the results of one crawl
    ///
    /// # Arguments
    ///
    /// * `candidate` - The candidate the results belong to
    /// * `results` - URL key to extracted text, non-empty
    ///
    /// # Returns
    ///
    /// The path written
    fn write(&self, candidate: &Candidate, results: &ResultMap) -> OutputResult<PathBuf>;
}
