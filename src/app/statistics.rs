//! Analytics reporting.

use log::info;

use crate::analytics::Analytics;

/// Logs the analytics counters, one line per metric.
pub fn log_analytics(analytics: &Analytics) {
    info!("Submission statistics:");
    info!("   Total URLs attempted: {}", analytics.total_submissions);
    info!("   Successful: {}", analytics.successful_submissions);
    info!("   Failed: {}", analytics.failed_submissions);
    info!(
        "   Average response time: {:.1} ms",
        analytics.average_response_time
    );
}

/// One-line summary for the terminal.
pub fn format_summary(analytics: &Analytics) -> String {
    format!(
        "Submitted {} URL{} ({} succeeded, {} failed), average response time {:.1} ms",
        analytics.total_submissions,
        if analytics.total_submissions == 1 { "" } else { "s" },
        analytics.successful_submissions,
        analytics.failed_submissions,
        analytics.average_response_time
    )
}
