//! Main application modules.
//!
//! This module provides URL list input and analytics reporting used by the
//! command-line binary.

pub mod statistics;
pub mod url;

// Re-export public API
pub use statistics::{format_summary, log_analytics};
pub use url::read_url_list;
