//! Per-domain request throttling
//!
//! One [`DomainThrottle`] is shared by every crawl in the process. It maps a
//! domain to the earliest instant the next request to it may start. Entries
//! are created on first use and live until the process exits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Shared minimum-delay gate keyed by domain
///
/// Cloning is cheap and every clone sees the same deadlines.
#[derive(Debug, Clone, Default)]
pub struct DomainThrottle {
    next_allowed: Arc<Mutex<HashMap<String, Instant>>>,
}

impl DomainThrottle {
    /// Creates an empty throttle
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next request slot for `domain` and returns how long the
    /// caller must wait before issuing it
    ///
    /// Reading the current deadline, computing the wait and publishing the
    /// next deadline happen under a single lock acquisition, so concurrent
    /// callers for one domain always receive slots at least `delay` apart.
    ///
    /// Returns `None` when the next deadline would not fit in an [`Instant`];
    /// the shared state is left untouched in that case.
    pub fn reserve(&self, domain: &str, delay: Duration) -> Option<Duration> {
        let now = Instant::now();
        let mut next_allowed = self
            .next_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let slot = match next_allowed.get(domain) {
            Some(&deadline) if deadline > now => deadline,
            _ => now,
        };
        next_allowed.insert(domain.to_string(), slot.checked_add(delay)?);

        Some(slot - now)
    }

    /// Suspends the caller until its reserved slot for `domain` arrives
    ///
    /// A delay of zero or less (or a non-finite one) returns immediately
    /// without touching the shared state.
    pub async fn wait_for_slot(&self, domain: &str, delay_seconds: f64) {
        if !delay_seconds.is_finite() || delay_seconds <= 0.0 {
            return;
        }

        let Ok(delay) = Duration::try_from_secs_f64(delay_seconds) else {
            tracing::warn!(
                "Delay of {}s is out of range, not throttling {}",
                delay_seconds,
                domain
            );
            return;
        };
        let Some(wait) = self.reserve(domain, delay) else {
            tracing::warn!(
                "Delay of {}s overflows the clock, not throttling {}",
                delay_seconds,
                domain
            );
            return;
        };
        if !wait.is_zero() {
            tracing::trace!("Throttling {} for {:?}", domain, wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of domains with a recorded deadline
    pub fn tracked_domains(&self) -> usize {
        self.next_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
