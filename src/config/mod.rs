//! Configuration module for Homepage-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, and the command line may override any of them
//! before the final [`validate`] call.
//!
//! # Example
//!
//! ```no_run
//! use homepage_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will collect up to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, InputConfig, OutputConfig, RunConfig, UserAgentConfig,
    DEFAULT_DELAY_SECONDS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
    DEFAULT_WORKERS,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config, read_config_with_hash};
pub use validation::{compile_patterns, validate};
