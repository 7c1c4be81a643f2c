//! URL handling module for Homepage-Harvest
//!
//! This module provides URL normalization, result-key derivation, network
//! location extraction, and the same-site scope filter.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{network_location, network_location_of};
pub use normalize::{normalize_url, url_key};
pub use scope::{
    classify, has_skip_extension, in_scope, is_excluded, is_same_domain, ScopeDecision,
    SKIP_EXTENSIONS,
};
