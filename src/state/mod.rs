//! State module for a single site crawl
//!
//! Everything here is owned by exactly one crawl and needs no synchronization.
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of the crawl (idle, running, completed, aborted)
//! - `Frontier`: breadth-first queue plus the visited set
//! - `ResultMap`: URL key to extracted text, in insertion order

mod crawl_state;
mod frontier;
mod result_map;

// Re-export main types
pub use crawl_state::CrawlState;
pub use frontier::Frontier;
pub use result_map::ResultMap;
