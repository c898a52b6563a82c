//! Error handling.
//!
//! This module provides:
//! - Error type definitions for configuration, submission, sitemap and
//!   initialization failures
//! - Categorization of IndexNow response statuses
//!
//! No error is swallowed inside the submission pipeline; every failure is
//! returned to the caller after the analytics bookkeeping for it is done.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{describe_status, is_success};
pub use types::{
    ConfigError, IndexNowError, InitializationError, ParseError, SitemapError, SubmissionError,
    TransportError,
};
