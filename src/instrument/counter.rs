//! Call-Counting Interceptor
//!
//! Persists a per-method invocation counter in the backend.

use tracing::debug;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::{CallContext, CallInterceptor, ProceedFn};

// == Call Counter ==
/// Counts invocations of the wrapped method.
///
/// The counter lives in the backend under the method's stable name, so counts
/// accumulate across handles and process restarts until the backend is
/// flushed. The increment uses the backend's atomic primitive and happens
/// before delegation: a call that fails downstream still counts as attempted.
#[derive(Debug, Default)]
pub struct CallCounter;

impl CallCounter {
    /// Creates a call-counting interceptor.
    pub fn new() -> Self {
        Self
    }
}

impl CallInterceptor for CallCounter {
    fn around(
        &self,
        backend: &dyn KeyValueBackend,
        ctx: &CallContext<'_>,
        proceed: &mut ProceedFn<'_>,
    ) -> Result<String> {
        let count = backend.increment(ctx.method.name())?;
        debug!(method = ctx.method.name(), count, "call counted");
        proceed()
    }
}
