//! Cache Module
//!
//! The instrumented key-value cache: scalar values stored under random keys,
//! with optional decoding on retrieval.

mod handle;
mod value;


// Re-export public types
pub use handle::Cache;
pub use value::CacheValue;
