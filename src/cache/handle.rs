//! Cache Handle Module
//!
//! The cache itself: a thin store/retrieve core over a key-value backend,
//! wrapped by the interceptor chain that records call counts and history.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{KeyValueBackend, MemoryBackend};
use crate::cache::CacheValue;
use crate::config::Config;
use crate::error::Result;
use crate::instrument::{
    CallContext, CallCounter, CallHistory, InterceptorChain, MethodId, ReplayReport,
};

// == Cache ==
/// Instrumented key-value cache.
///
/// Owns the backend connection and an interceptor chain. Construction clears
/// the backend's entire keyspace, so every new handle starts from an empty
/// store; values, counters and history written afterwards outlive the handle
/// for as long as the backend keeps them.
pub struct Cache {
    backend: Arc<dyn KeyValueBackend>,
    chain: InterceptorChain,
}

impl Cache {
    // == Constructors ==
    /// Connects to `backend` with the default instrumentation: call counting
    /// outermost, call history innermost.
    ///
    /// Flushes the backend before returning.
    pub fn connect(backend: Arc<dyn KeyValueBackend>) -> Result<Self> {
        let chain = InterceptorChain::new()
            .with(CallCounter::new())
            .with(CallHistory::new());
        Self::with_chain(backend, chain)
    }

    /// Connects to `backend` with an explicit interceptor chain.
    ///
    /// Flushes the backend before returning. An empty chain yields an
    /// uninstrumented cache.
    pub fn with_chain(backend: Arc<dyn KeyValueBackend>, chain: InterceptorChain) -> Result<Self> {
        backend.flush_all()?;
        info!(layers = chain.len(), "cache connected, backend flushed");
        Ok(Self { backend, chain })
    }

    /// Builds a cache over a fresh in-memory backend, with the value-size
    /// limit and instrumentation toggles taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = Arc::new(MemoryBackend::with_limit(config.max_value_size));
        let mut chain = InterceptorChain::new();
        if config.enable_call_counts {
            chain = chain.with(CallCounter::new());
        }
        if config.enable_call_history {
            chain = chain.with(CallHistory::new());
        }
        Self::with_chain(backend, chain)
    }

    // == Store ==
    /// Stores `value` under a freshly generated random key and returns the key.
    ///
    /// Keys are v4 UUIDs rendered as text, never reused and never derived from
    /// the value. Backend failures propagate unchanged; when instrumentation
    /// is installed the attempt is counted and recorded regardless.
    pub fn store(&self, value: impl Into<CacheValue>) -> Result<String> {
        let value = value.into();
        let args = [value.to_string()];
        let ctx = CallContext {
            method: MethodId::Store,
            args: &args,
        };
        let payload = value.to_bytes();
        let backend = &*self.backend;

        self.chain.dispatch(backend, &ctx, &mut || {
            let key = Uuid::new_v4().to_string();
            backend.set(&key, &payload)?;
            debug!(key = %key, bytes = payload.len(), "value stored");
            Ok(key)
        })
    }

    // == Get ==
    /// Looks up `key`, returning the raw bytes or `None` if absent.
    ///
    /// A miss is never an error; callers can always tell an absent key from a
    /// present-but-empty value.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let args = [key.to_string()];
        let ctx = CallContext {
            method: MethodId::Get,
            args: &args,
        };
        let backend = &*self.backend;

        let mut found: Option<Option<Vec<u8>>> = None;
        self.chain.dispatch(backend, &ctx, &mut || {
            let value = backend.get(key)?;
            // History records a readable rendering; misses record as (nil) so
            // the inputs and outputs lists stay in lockstep.
            let rendered = match &value {
                Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                None => "(nil)".to_string(),
            };
            found = Some(value);
            Ok(rendered)
        })?;

        Ok(found.flatten())
    }

    /// Looks up `key` and applies `decode` to the raw bytes.
    ///
    /// Absent keys short-circuit to `Ok(None)` without invoking the decoder;
    /// decoder failures propagate to the caller.
    pub fn get_with<T>(
        &self,
        key: &str,
        decode: impl FnOnce(Vec<u8>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => decode(bytes).map(Some),
        }
    }

    /// Looks up `key` and decodes the value as UTF-8 text.
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |bytes| Ok(String::from_utf8(bytes)?))
    }

    /// Looks up `key` and decodes the value as UTF-8 integer text.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |bytes| Ok(String::from_utf8(bytes)?.parse()?))
    }

    // == Replay ==
    /// Prints the recorded call count and history for `method` to stdout.
    pub fn replay(&self, method: MethodId) -> Result<()> {
        let report = self.replay_report(method)?;
        print!("{}", report);
        Ok(())
    }

    /// Returns the structured replay report for `method`.
    pub fn replay_report(&self, method: MethodId) -> Result<ReplayReport> {
        crate::instrument::replay_report(&*self.backend, method)
    }
}
