//! Traced Cache - An instrumented key-value cache
//!
//! Stores scalar values under random keys on top of a pluggable key-value
//! backend, and records per-method call counts and input/output history
//! through composable interceptors, with replay of the recorded calls.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use cache::{Cache, CacheValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{
    CallContext, CallCounter, CallHistory, CallInterceptor, CallPair, InterceptorChain, MethodId,
    ProceedFn, ReplayReport,
};
