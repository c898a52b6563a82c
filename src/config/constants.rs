//! Configuration constants.
//!
//! This module defines the defaults and protocol limits used throughout the
//! application.

/// Default IndexNow engine host.
///
/// `api.indexnow.org` fans submissions out to every participating search
/// engine, so it is the sensible default when no specific engine is targeted.
pub const DEFAULT_ENGINE: &str = "api.indexnow.org";

/// Path of the IndexNow submission endpoint on an engine host.
pub const INDEXNOW_PATH: &str = "/IndexNow";

/// Default number of URLs per submission request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Maximum number of URLs a single IndexNow request may carry.
pub const MAX_URLS_PER_REQUEST: usize = 10_000;

/// Default pause between consecutive batches, in milliseconds.
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 1_000;

/// Default time-to-live for submitted URLs in the cache, in seconds (one day).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Per-request HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("indexnow_submitter/", env!("CARGO_PKG_VERSION"));

/// Maximum nesting of sitemap index documents that will be followed.
pub const MAX_SITEMAP_INDEX_DEPTH: usize = 3;
