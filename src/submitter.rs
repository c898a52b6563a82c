//! Submission facade.
//!
//! [`IndexNowSubmitter`] ties the batch submitter and the sitemap parser
//! together behind the three submission flows: one URL, a list of URLs, and
//! every (recently modified) URL of a sitemap.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::analytics::Analytics;
use crate::config::Config;
use crate::error_handling::{ConfigError, IndexNowError};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::sitemap::{filter_since, SitemapParser};
use crate::submit::BatchSubmitter;

/// Submits URLs to one IndexNow engine for one host.
///
/// Every instance owns its cache and analytics; instances never share state.
/// Submission methods take `&mut self`, so calls on one instance are
/// serialized.
///
/// # Example
///
/// ```no_run
/// use indexnow_submitter::{Config, IndexNowSubmitter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut submitter = IndexNowSubmitter::new(Config {
///     key: "0123456789abcdef".to_string(),
///     host: "www.example.com".to_string(),
///     ..Default::default()
/// })?;
/// submitter
///     .submit_from_sitemap("https://www.example.com/sitemap.xml", None)
///     .await?;
/// println!("{:?}", submitter.analytics());
/// # Ok(())
/// # }
/// ```
pub struct IndexNowSubmitter {
    batch: BatchSubmitter,
    sitemap: SitemapParser,
}

impl IndexNowSubmitter {
    /// Validates `config` and builds a submitter on a reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns `IndexNowError::Config` listing every missing field, or
    /// `IndexNowError::Initialization` if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, IndexNowError> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::build(&config, Arc::new(transport)))
    }

    /// Validates `config` and builds a submitter on the given transport.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every missing field.
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(&config, transport))
    }

    fn build(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        debug!(
            "IndexNow submitter for {} targeting {}",
            config.host,
            config.endpoint()
        );
        Self {
            batch: BatchSubmitter::new(config, Arc::clone(&transport)),
            sitemap: SitemapParser::new(transport),
        }
    }

    /// Submits every URL not submitted within the cache TTL.
    ///
    /// Cached URLs and repeats within `urls` are skipped silently. Nothing is
    /// sent when no URL remains. Only the first occurrence of a repeated URL
    /// is submitted, so analytics count it once.
    ///
    /// # Errors
    ///
    /// Returns `IndexNowError::Submission` for the first batch that fails;
    /// later batches are not attempted.
    pub async fn submit_urls(&mut self, urls: &[String]) -> Result<(), IndexNowError> {
        let mut seen = HashSet::new();
        let pending: Vec<String> = urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .filter(|url| !self.batch.cache().has(url))
            .cloned()
            .collect();

        let skipped = urls.len() - pending.len();
        if skipped > 0 {
            debug!("Skipping {skipped} URL(s) already submitted or repeated");
        }
        if pending.is_empty() {
            info!("No new URLs to submit");
            return Ok(());
        }

        self.batch.process_batch(&pending).await?;
        Ok(())
    }

    /// Submits a single URL unless it is still cached.
    ///
    /// # Errors
    ///
    /// Returns `IndexNowError::Submission` if the request fails.
    pub async fn submit_single_url(&mut self, url: &str) -> Result<(), IndexNowError> {
        if self.batch.cache().has(url) {
            info!("URL {url} was submitted recently, skipping");
            return Ok(());
        }
        self.submit_urls(&[url.to_string()]).await
    }

    /// Submits the URLs of a sitemap, optionally only those modified at or
    /// after `modified_since`.
    ///
    /// # Errors
    ///
    /// Returns `IndexNowError::Sitemap` if the sitemap cannot be fetched or
    /// parsed, or `IndexNowError::Submission` if a batch fails.
    pub async fn submit_from_sitemap(
        &mut self,
        sitemap_url: &str,
        modified_since: Option<DateTime<Utc>>,
    ) -> Result<(), IndexNowError> {
        let entries = self.sitemap.fetch_and_parse(sitemap_url).await?;
        let urls = filter_since(&entries, modified_since);

        if urls.is_empty() {
            match modified_since {
                Some(cutoff) => info!("No URLs in {sitemap_url} modified since {cutoff}"),
                None => info!("Sitemap {sitemap_url} lists no URLs"),
            }
            return Ok(());
        }

        info!(
            "Submitting {} of {} sitemap URL(s) from {}",
            urls.len(),
            entries.len(),
            sitemap_url
        );
        self.submit_urls(&urls).await
    }

    /// Copy of the current analytics.
    pub fn analytics(&self) -> Analytics {
        self.batch.analytics()
    }

    /// Full URL of the IndexNow endpoint this submitter posts to.
    pub fn endpoint(&self) -> &str {
        self.batch.endpoint()
    }
}
