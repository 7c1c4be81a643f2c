//! Candidate selection for a harvest run
//!
//! This module handles:
//! - Reading the candidate list from CSV
//! - Indexing ids that already have output in the result directories
//! - Reading the exclusion-pattern file

mod candidates;
mod exclude;
mod index;

pub use candidates::{load_candidates, load_missing_candidates, select_missing, Candidate};
pub use exclude::load_exclude_list;
pub use index::existing_ids;
