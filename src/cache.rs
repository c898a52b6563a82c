//! Time-to-live cache of recently submitted URLs.
//!
//! Each [`IndexNowSubmitter`](crate::IndexNowSubmitter) owns its own cache, so
//! two submitters in one process never see each other's URLs.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Presence store for submitted URLs with per-instance expiry.
///
/// Uses tokio's clock so tests can pause and advance time.
#[derive(Debug)]
pub struct SubmissionCache {
    ttl: Duration,
    // None: the TTL reaches past what the clock can represent, never expires
    expires_at: HashMap<String, Option<Instant>>,
}

impl SubmissionCache {
    /// Empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            expires_at: HashMap::new(),
        }
    }

    /// Returns true if `url` was recorded and its entry has not expired yet.
    pub fn has(&self, url: &str) -> bool {
        self.expires_at
            .get(url)
            .is_some_and(|&expiry| expiry.is_none_or(|at| Instant::now() < at))
    }

    /// Records `url` as present until now + TTL.
    ///
    /// A TTL too large to add to the current instant never expires.
    pub fn set(&mut self, url: &str) {
        let expiry = Instant::now().checked_add(self.ttl);
        self.expires_at.insert(url.to_string(), expiry);
    }

    /// Drops expired entries.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        self.expires_at
            .retain(|_, expiry| expiry.is_none_or(|at| now < at));
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.expires_at.len()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.expires_at.is_empty()
    }
}
