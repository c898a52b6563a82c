//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message (e.g., file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid submitter configuration.
///
/// Every problem is collected before the error is raised, so a single error
/// names all missing fields at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe_config_problems(.missing, .invalid))]
pub struct ConfigError {
    /// Required fields that are missing or blank, in declaration order.
    pub missing: Vec<&'static str>,
    /// Human-readable descriptions of out-of-range values.
    pub invalid: Vec<String>,
}

fn describe_config_problems(missing: &[&'static str], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!(
            "missing required configuration: {}",
            missing.join(", ")
        ));
    }
    parts.extend(invalid.iter().cloned());
    format!("Invalid configuration: {}", parts.join("; "))
}

/// Failure of the HTTP capability itself (no response was obtained).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The reqwest client failed (connect, timeout, body read, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// A transport reported that it could not complete the request.
    #[error("HTTP request failed: {0}")]
    Unavailable(String),
}

/// Failure of a single batch submission.
///
/// The whole batch is considered failed; analytics have already been updated
/// by the time this error reaches the caller.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The request could not be sent or no response was received.
    #[error("Failed to submit {url_count} URL(s) to {endpoint}: {source}")]
    Transport {
        /// Endpoint the batch was posted to.
        endpoint: String,
        /// Number of URLs in the failed batch.
        url_count: usize,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The engine answered with a non-2xx status.
    #[error("{endpoint} rejected {url_count} URL(s) with HTTP {status}: {reason}")]
    Rejected {
        /// Endpoint the batch was posted to.
        endpoint: String,
        /// Number of URLs in the failed batch.
        url_count: usize,
        /// HTTP status returned by the engine.
        status: u16,
        /// IndexNow meaning of the status.
        reason: &'static str,
    },
}

impl SubmissionError {
    /// Number of URLs in the batch that failed.
    pub fn url_count(&self) -> usize {
        match self {
            SubmissionError::Transport { url_count, .. }
            | SubmissionError::Rejected { url_count, .. } => *url_count,
        }
    }

    /// HTTP status of a rejected batch, if the engine answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Transport { .. } => None,
            SubmissionError::Rejected { status, .. } => Some(*status),
        }
    }
}

/// A sitemap body that is not a well-formed sitemap document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed sitemap XML at byte {position}: {message}")]
pub struct ParseError {
    /// Byte offset in the document where the problem was detected.
    pub position: u64,
    /// Description of the problem.
    pub message: String,
}

/// Failure while fetching or decoding a sitemap.
#[derive(Error, Debug)]
pub enum SitemapError {
    /// The sitemap could not be downloaded.
    #[error("Failed to fetch sitemap {url}: {source}")]
    Fetch {
        /// Sitemap URL.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The sitemap server answered with a non-2xx status.
    #[error("Sitemap {url} returned HTTP {status}")]
    Status {
        /// Sitemap URL.
        url: String,
        /// HTTP status returned by the server.
        status: u16,
    },

    /// The sitemap body was not a well-formed sitemap document.
    #[error("Failed to parse sitemap {url}: {source}")]
    Parse {
        /// Sitemap URL.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
}

/// Any error surfaced by [`IndexNowSubmitter`](crate::IndexNowSubmitter).
#[derive(Error, Debug)]
pub enum IndexNowError {
    /// The configuration was rejected at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The default HTTP transport could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// A batch failed to submit.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// A sitemap could not be fetched or parsed.
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}
