//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its store backend.
///
/// A cache miss is never an error: lookup operations return `Ok(None)` for
/// absent keys. Every variant here is fatal to the call that produced it and
/// is surfaced immediately, without retries.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store backend failed (connectivity, protocol, internal state)
    #[error("Backend failure: {0}")]
    Backend(String),

    /// Value rejected by the backend's size limit
    #[error("Value of {actual} bytes exceeds the backend limit of {limit} bytes")]
    ValueTooLarge { limit: usize, actual: usize },

    /// Stored bytes were not valid UTF-8 when a text decode was requested
    #[error("Invalid UTF-8 in stored value: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Stored text did not parse as an integer
    #[error("Invalid integer in stored value: {0}")]
    InvalidInteger(#[from] std::num::ParseIntError),

    /// Replay was requested for a method with no recorded call count
    #[error("No call count recorded for method: {0}")]
    CounterMissing(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
