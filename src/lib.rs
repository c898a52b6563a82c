//! indexnow_submitter library: IndexNow URL submission
//!
//! This library submits URLs to search engines implementing the IndexNow
//! protocol. URLs can be given directly or taken from a sitemap (optionally
//! only those modified since a date). Submissions are split into batches that
//! are sent one after another with a pause in between, URLs submitted within
//! the cache TTL are skipped, and basic analytics are kept per submitter.
//!
//! # Example
//!
//! ```no_run
//! use indexnow_submitter::{Config, IndexNowSubmitter};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     key: "0123456789abcdef".to_string(),
//!     host: "www.example.com".to_string(),
//!     batch_size: 500,
//!     ..Default::default()
//! };
//!
//! let mut submitter = IndexNowSubmitter::new(config)?;
//! submitter
//!     .submit_urls(&["https://www.example.com/new-post".to_string()])
//!     .await?;
//! let analytics = submitter.analytics();
//! println!("{} submitted, {} failed",
//!          analytics.successful_submissions, analytics.failed_submissions);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod analytics;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod http;
pub mod initialization;
pub mod sitemap;
pub mod submit;
mod submitter;

// Re-export public API
pub use analytics::Analytics;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    ConfigError, IndexNowError, ParseError, SitemapError, SubmissionError, TransportError,
};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use sitemap::{filter_since, SitemapEntry, SitemapParser};
pub use submitter::IndexNowSubmitter;
