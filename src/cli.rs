//! Command-line interface definitions.
//!
//! Every submitter option can also come from an `INDEXNOW_*` environment
//! variable (including a `.env` file loaded by the binary). Key and host are
//! optional here on purpose: when they are missing the submitter reports all
//! missing fields in a single configuration error.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::config::{
    Config, LogFormat, LogLevel, DEFAULT_BATCH_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_ENGINE,
    DEFAULT_RATE_LIMIT_DELAY_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::sitemap::parse_timestamp;

/// Submit URLs to IndexNow search engines.
#[derive(Debug, Parser)]
#[command(name = "indexnow", version, about)]
pub struct Cli {
    /// Submitter settings
    #[command(flatten)]
    pub submitter: SubmitterArgs,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Print the final analytics as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// What to submit
    #[command(subcommand)]
    pub command: Command,
}

/// Submitter settings shared by every subcommand.
#[derive(Debug, Args)]
pub struct SubmitterArgs {
    /// IndexNow engine host, or a base URL with scheme
    #[arg(long, env = "INDEXNOW_ENGINE", default_value = DEFAULT_ENGINE, global = true)]
    pub engine: String,

    /// IndexNow verification key
    #[arg(long, env = "INDEXNOW_KEY", global = true, hide_env_values = true)]
    pub key: Option<String>,

    /// Host owning the submitted URLs
    #[arg(long, env = "INDEXNOW_HOST", global = true)]
    pub host: Option<String>,

    /// Key file location (default: https://{host}/{key}.txt)
    #[arg(long, env = "INDEXNOW_KEY_PATH", global = true)]
    pub key_path: Option<String>,

    /// Maximum URLs per request
    #[arg(long, env = "INDEXNOW_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE, global = true)]
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    #[arg(
        long,
        env = "INDEXNOW_RATE_LIMIT_DELAY",
        default_value_t = DEFAULT_RATE_LIMIT_DELAY_MS,
        global = true
    )]
    pub rate_limit_delay: u64,

    /// Seconds before a submitted URL may be submitted again
    #[arg(
        long,
        env = "INDEXNOW_CACHE_TTL",
        default_value_t = DEFAULT_CACHE_TTL_SECS,
        global = true
    )]
    pub cache_ttl: u64,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "INDEXNOW_TIMEOUT_SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    pub timeout_seconds: u64,
}

/// Source of the URLs to submit.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit the given URLs
    Submit {
        /// URLs to submit
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Submit URLs read from a file, one per line ("-" for stdin)
    File {
        /// File to read URLs from
        path: PathBuf,
    },
    /// Submit the URLs listed in a sitemap
    Sitemap {
        /// Sitemap URL
        #[arg(value_parser = parse_sitemap_url)]
        url: String,

        /// Only submit URLs modified at or after this date (e.g. 2024-07-22)
        #[arg(long, value_parser = parse_cutoff)]
        since: Option<DateTime<Utc>>,
    },
}

impl SubmitterArgs {
    /// Builds the submitter configuration; missing key/host become empty and
    /// are reported by validation.
    pub fn to_config(&self) -> Config {
        Config {
            engine: self.engine.clone(),
            key: self.key.clone().unwrap_or_default(),
            host: self.host.clone().unwrap_or_default(),
            key_path: self.key_path.clone(),
            batch_size: self.batch_size,
            rate_limit_delay_ms: self.rate_limit_delay,
            cache_ttl_secs: self.cache_ttl,
            timeout_seconds: self.timeout_seconds,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn parse_cutoff(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value).ok_or_else(|| {
        format!("invalid date '{value}', expected YYYY-MM-DD or a W3C datetime")
    })
}

fn parse_sitemap_url(value: &str) -> Result<String, String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("invalid sitemap URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("unsupported sitemap URL scheme '{other}'")),
    }
}
