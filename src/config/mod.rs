//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, protocol limits)
//! - The submitter configuration record and its validation
//! - Logging option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
