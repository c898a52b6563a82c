//! Batch partitioning and rate-limited dispatch.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::json;
use tokio::time::{sleep, Instant};

use crate::analytics::{Analytics, AnalyticsAggregator};
use crate::cache::SubmissionCache;
use crate::config::Config;
use crate::error_handling::{describe_status, is_success, SubmissionError};
use crate::http::HttpTransport;

/// Sends URL batches to one IndexNow endpoint, one at a time.
///
/// Owns the submission cache and the analytics counters: a batch the engine
/// accepts is cached and recorded as successful, a batch that fails is
/// recorded as failed and nothing in it is cached.
pub struct BatchSubmitter {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    host: String,
    key: String,
    key_location: String,
    batch_size: usize,
    rate_limit_delay: Duration,
    cache: SubmissionCache,
    analytics: AnalyticsAggregator,
}

impl BatchSubmitter {
    /// Builds a submitter for `config` posting over `transport`.
    ///
    /// A batch size of zero is treated as one.
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoint: config.endpoint(),
            host: config.host.trim().to_string(),
            key: config.key.trim().to_string(),
            key_location: config.key_location(),
            batch_size: config.batch_size.max(1),
            rate_limit_delay: config.rate_limit_delay(),
            cache: SubmissionCache::new(config.cache_ttl()),
            analytics: AnalyticsAggregator::new(),
        }
    }

    /// IndexNow endpoint batches are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URLs accepted within the TTL.
    pub fn cache(&self) -> &SubmissionCache {
        &self.cache
    }

    /// Copy of the current analytics.
    pub fn analytics(&self) -> Analytics {
        self.analytics.snapshot()
    }

    fn payload(&self, urls: &[String]) -> serde_json::Value {
        json!({
            "host": self.host,
            "key": self.key,
            "keyPath": self.key_location,
            "urlList": urls,
        })
    }

    /// Submits `urls` in a single request.
    ///
    /// An empty slice is a no-op: no request, no analytics change.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Transport` if no response was obtained and
    /// `SubmissionError::Rejected` for a non-2xx status. In both cases every
    /// URL of the batch has been counted as failed.
    pub async fn submit_batch(&mut self, urls: &[String]) -> Result<(), SubmissionError> {
        if urls.is_empty() {
            return Ok(());
        }

        let url_count = urls.len();
        let body = self.payload(urls);
        debug!("Submitting {} URL(s) to {}", url_count, self.endpoint);

        let start = Instant::now();
        let response = match self.transport.post_json(&self.endpoint, &body).await {
            Ok(response) => response,
            Err(source) => {
                self.analytics.record_failure(url_count as u64);
                warn!(
                    "Failed to submit {} URL(s) to {}: {}",
                    url_count, self.endpoint, source
                );
                return Err(SubmissionError::Transport {
                    endpoint: self.endpoint.clone(),
                    url_count,
                    source,
                });
            }
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if !is_success(response.status) {
            self.analytics.record_failure(url_count as u64);
            let reason = describe_status(response.status);
            warn!(
                "{} rejected {} URL(s) with HTTP {}: {}",
                self.endpoint, url_count, response.status, reason
            );
            return Err(SubmissionError::Rejected {
                endpoint: self.endpoint.clone(),
                url_count,
                status: response.status,
                reason,
            });
        }

        self.analytics.record_success(url_count as u64, elapsed_ms);
        self.cache.sweep();
        for url in urls {
            self.cache.set(url);
        }
        info!(
            "Submitted {} URL(s) to {} (HTTP {}, {:.0} ms)",
            url_count, self.endpoint, response.status, elapsed_ms
        );
        Ok(())
    }

    /// Submits `urls` in consecutive chunks of at most `batch_size`.
    ///
    /// Chunks go out strictly in order, with the configured delay between two
    /// chunks (not after the last one).
    ///
    /// # Errors
    ///
    /// Stops at the first failing chunk and returns its error; later chunks
    /// are not attempted.
    pub async fn process_batch(&mut self, urls: &[String]) -> Result<(), SubmissionError> {
        let total_batches = urls.len().div_ceil(self.batch_size);

        for (index, chunk) in urls.chunks(self.batch_size).enumerate() {
            debug!(
                "Processing batch {}/{} ({} URLs)",
                index + 1,
                total_batches,
                chunk.len()
            );
            self.submit_batch(chunk).await?;

            if index + 1 < total_batches && !self.rate_limit_delay.is_zero() {
                debug!(
                    "Waiting {} ms before the next batch",
                    self.rate_limit_delay.as_millis()
                );
                sleep(self.rate_limit_delay).await;
            }
        }

        Ok(())
    }
}
