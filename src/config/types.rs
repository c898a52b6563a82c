//! Configuration types.
//!
//! This module defines the submitter configuration record and the enums used
//! for logging options on the command line.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_ENGINE, DEFAULT_RATE_LIMIT_DELAY_MS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, INDEXNOW_PATH, MAX_URLS_PER_REQUEST,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Submitter configuration.
///
/// Built once (programmatically or from the command line) and handed to
/// [`IndexNowSubmitter`](crate::IndexNowSubmitter), which validates it before
/// any request is made.
///
/// # Examples
///
/// ```no_run
/// use indexnow_submitter::Config;
///
/// let config = Config {
///     key: "0123456789abcdef".to_string(),
///     host: "www.example.com".to_string(),
///     batch_size: 500,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Engine host (e.g. `api.indexnow.org`), or a full base URL with scheme
    pub engine: String,

    /// IndexNow verification key
    pub key: String,

    /// Host owning the submitted URLs
    pub host: String,

    /// Location of the key file; defaults to `https://{host}/{key}.txt`
    pub key_path: Option<String>,

    /// Maximum URLs per request
    pub batch_size: usize,

    /// Pause between consecutive batches in milliseconds
    pub rate_limit_delay_ms: u64,

    /// Seconds a submitted URL stays cached (and is skipped on resubmission)
    pub cache_ttl_secs: u64,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            key: String::new(),
            host: String::new(),
            key_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            rate_limit_delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Checks the configuration, collecting every problem before failing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming every missing required field (`key`,
    /// `host`) and every out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.key.trim().is_empty() {
            missing.push("key");
        }
        if self.host.trim().is_empty() {
            missing.push("host");
        }

        let mut invalid = Vec::new();
        if self.engine.trim().is_empty() {
            invalid.push("engine must not be empty".to_string());
        }
        if self.batch_size == 0 || self.batch_size > MAX_URLS_PER_REQUEST {
            invalid.push(format!(
                "batch_size must be between 1 and {MAX_URLS_PER_REQUEST} (got {})",
                self.batch_size
            ));
        }

        if missing.is_empty() && invalid.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { missing, invalid })
        }
    }

    /// Full URL of the engine's IndexNow endpoint.
    ///
    /// A bare host gets the `https://` scheme; an engine value that already
    /// carries a scheme is used as the base as-is.
    pub fn endpoint(&self) -> String {
        let engine = self.engine.trim().trim_end_matches('/');
        if engine.contains("://") {
            format!("{engine}{INDEXNOW_PATH}")
        } else {
            format!("https://{engine}{INDEXNOW_PATH}")
        }
    }

    /// Key file location sent with every submission.
    pub fn key_location(&self) -> String {
        match self.key_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => format!("https://{}/{}.txt", self.host.trim(), self.key.trim()),
        }
    }

    /// Pause between consecutive batches.
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    /// Lifetime of a cache entry.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
