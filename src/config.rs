//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::backend::DEFAULT_MAX_VALUE_SIZE;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum size in bytes the backend accepts for a single value
    pub max_value_size: usize,
    /// Whether the call-counting interceptor is installed
    pub enable_call_counts: bool,
    /// Whether the call-history interceptor is installed
    pub enable_call_history: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_VALUE_SIZE` - Maximum value size in bytes (default: 1048576)
    /// - `ENABLE_CALL_COUNTS` - Install the call-counting interceptor (default: true)
    /// - `ENABLE_CALL_HISTORY` - Install the call-history interceptor (default: true)
    pub fn from_env() -> Self {
        Self {
            max_value_size: env::var("MAX_VALUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_VALUE_SIZE),
            enable_call_counts: env::var("ENABLE_CALL_COUNTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_call_history: env::var("ENABLE_CALL_HISTORY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            enable_call_counts: true,
            enable_call_history: true,
        }
    }
}
