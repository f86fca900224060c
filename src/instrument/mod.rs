//! Instrumentation Module
//!
//! Cross-cutting call instrumentation for cache methods, built as explicit
//! interceptor composition rather than closure wrapping. Each interceptor sees
//! the call context and a `proceed` continuation, and the chain composes them
//! in a fixed, visible order.

mod counter;
mod history;
mod replay;

pub use counter::CallCounter;
pub use history::CallHistory;
pub use replay::{replay_report, CallPair, ReplayReport};

use crate::backend::KeyValueBackend;
use crate::error::Result;

// == Method Identity ==
/// Stable identity of an instrumented cache method.
///
/// The textual name namespaces the method's counter and history keys in the
/// backend. It is fixed at compile time, so counts and history survive process
/// restarts and never depend on runtime name introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodId {
    /// `Cache::store`
    Store,
    /// `Cache::get`
    Get,
}

impl MethodId {
    /// Stable name used as the call-counter key.
    pub fn name(&self) -> &'static str {
        match self {
            MethodId::Store => "cache.store",
            MethodId::Get => "cache.get",
        }
    }

    /// Backend key of the recorded-inputs list.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.name())
    }

    /// Backend key of the recorded-outputs list.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.name())
    }
}

// == Call Context ==
/// One invocation of an instrumented method, as seen by interceptors.
#[derive(Debug)]
pub struct CallContext<'a> {
    /// Which method is being invoked
    pub method: MethodId,
    /// Textual renderings of the positional arguments, receiver excluded
    pub args: &'a [String],
}

// == Proceed Continuation ==
/// Continuation handed to an interceptor: runs the rest of the chain and the
/// base operation, yielding the textual rendering of the call's output.
pub type ProceedFn<'a> = dyn FnMut() -> Result<String> + 'a;

// == Interceptor Trait ==
/// A cross-cutting concern wrapped around a cache method call.
///
/// Implementations may touch the backend before and after delegating through
/// `proceed`, and must return the output rendering unchanged so outer layers
/// and the caller observe the same result.
pub trait CallInterceptor: Send + Sync {
    /// Wraps one invocation.
    ///
    /// # Arguments
    /// * `backend` - The store shared with the cache, for counters and history
    /// * `ctx` - The invocation being wrapped
    /// * `proceed` - Continuation running the remaining layers and the operation
    fn around(
        &self,
        backend: &dyn KeyValueBackend,
        ctx: &CallContext<'_>,
        proceed: &mut ProceedFn<'_>,
    ) -> Result<String>;
}

// == Interceptor Chain ==
/// Ordered composition of interceptors around a base operation.
///
/// Dispatch walks the layers front to back, so the first interceptor is the
/// outermost wrapper. The default cache composition is counting outermost,
/// history innermost.
#[derive(Default)]
pub struct InterceptorChain {
    layers: Vec<Box<dyn CallInterceptor>>,
}

impl InterceptorChain {
    // == Constructor ==
    /// Creates an empty chain: calls pass straight through to the operation.
    pub fn new() -> Self {
        Self::default()
    }

    // == With ==
    /// Appends an interceptor as the new innermost layer.
    pub fn with(mut self, layer: impl CallInterceptor + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    // == Length ==
    /// Returns the number of installed layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no interceptors are installed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // == Dispatch ==
    /// Runs `operation` wrapped by every installed layer.
    ///
    /// The operation closure performs the real work and returns the textual
    /// rendering of its output; interceptors observe that rendering on the way
    /// back out.
    pub fn dispatch(
        &self,
        backend: &dyn KeyValueBackend,
        ctx: &CallContext<'_>,
        operation: &mut ProceedFn<'_>,
    ) -> Result<String> {
        Self::run(&self.layers, backend, ctx, operation)
    }

    fn run(
        layers: &[Box<dyn CallInterceptor>],
        backend: &dyn KeyValueBackend,
        ctx: &CallContext<'_>,
        operation: &mut ProceedFn<'_>,
    ) -> Result<String> {
        match layers.split_first() {
            None => operation(),
            Some((outer, rest)) => {
                let mut proceed = || Self::run(rest, backend, ctx, &mut *operation);
                outer.around(backend, ctx, &mut proceed)
            }
        }
    }
}
