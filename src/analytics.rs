//! Submission analytics.
//!
//! Tracks how many URLs were attempted, how many succeeded or failed, and a
//! running average of batch response time.

use serde::Serialize;

/// Snapshot of submission analytics.
///
/// Returned by value, so callers can't mutate the submitter's own counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Every URL attempted, whether its batch succeeded or failed.
    pub total_submissions: u64,
    /// URLs in batches the engine accepted.
    pub successful_submissions: u64,
    /// URLs in batches that failed.
    pub failed_submissions: u64,
    /// Running average of batch response time in milliseconds.
    pub average_response_time: f64,
}

/// Running counters behind [`Analytics`].
#[derive(Debug, Default)]
pub struct AnalyticsAggregator {
    current: Analytics,
}

impl AnalyticsAggregator {
    /// Aggregator with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a batch of `count` URLs accepted after `elapsed_ms`.
    ///
    /// The batch latency enters the average as a single sample weighted
    /// against the previous total URL count:
    /// `(old_average * old_total + elapsed_ms) / new_total`.
    pub fn record_success(&mut self, count: u64, elapsed_ms: f64) {
        let old_total = self.current.total_submissions;
        let new_total = old_total + count;
        self.current.total_submissions = new_total;
        self.current.successful_submissions += count;
        if new_total > 0 {
            self.current.average_response_time =
                (self.current.average_response_time * old_total as f64 + elapsed_ms)
                    / new_total as f64;
        }
    }

    /// Records a failed batch of `count` URLs. The average is left untouched.
    pub fn record_failure(&mut self, count: u64) {
        self.current.total_submissions += count;
        self.current.failed_submissions += count;
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> Analytics {
        self.current
    }
}
