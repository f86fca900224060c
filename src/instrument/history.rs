//! Call-History Interceptor
//!
//! Records the arguments and result of every wrapped call in two append-only
//! backend lists, one entry per call in each.

use tracing::debug;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::{CallContext, CallInterceptor, ProceedFn};

// == Call History ==
/// Appends each call's rendered arguments and output to the method's
/// `:inputs` and `:outputs` lists.
///
/// The input entry is written before delegation and the output entry after,
/// so for call *i* the *i*-th element of each list belongs to the same
/// invocation. If delegation fails, the output append never happens and the
/// lists diverge in length; replay pairs entries positionally and simply
/// truncates to the shorter list.
#[derive(Debug, Default)]
pub struct CallHistory;

impl CallHistory {
    /// Creates a call-history interceptor.
    pub fn new() -> Self {
        Self
    }

    /// Renders positional arguments as a single history entry.
    fn render_args(args: &[String]) -> String {
        args.join(", ")
    }
}

impl CallInterceptor for CallHistory {
    fn around(
        &self,
        backend: &dyn KeyValueBackend,
        ctx: &CallContext<'_>,
        proceed: &mut ProceedFn<'_>,
    ) -> Result<String> {
        let rendered_args = Self::render_args(ctx.args);
        backend.push_to_list(&ctx.method.inputs_key(), rendered_args.as_bytes())?;

        let output = proceed()?;

        backend.push_to_list(&ctx.method.outputs_key(), output.as_bytes())?;
        debug!(
            method = ctx.method.name(),
            input = %rendered_args,
            output = %output,
            "call recorded"
        );
        Ok(output)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::CacheError;
    use crate::instrument::MethodId;

    fn ctx_with<'a>(args: &'a [String]) -> CallContext<'a> {
        CallContext {
            method: MethodId::Store,
            args,
        }
    }

    #[test]
    fn test_history_records_input_and_output() {
        let backend = MemoryBackend::new();
        let history = CallHistory::new();
        let args = vec!["foo".to_string()];

        history
            .around(&backend, &ctx_with(&args), &mut || Ok("key-1".to_string()))
            .unwrap();

        let inputs = backend.read_list("cache.store:inputs", 0, -1).unwrap();
        let outputs = backend.read_list("cache.store:outputs", 0, -1).unwrap();
        assert_eq!(inputs, vec![b"foo".to_vec()]);
        assert_eq!(outputs, vec![b"key-1".to_vec()]);
    }

    #[test]
    fn test_history_entries_stay_in_lockstep() {
        let backend = MemoryBackend::new();
        let history = CallHistory::new();

        for i in 0..4 {
            let args = vec![format!("arg-{}", i)];
            history
                .around(&backend, &ctx_with(&args), &mut || Ok(format!("out-{}", i)))
                .unwrap();
        }

        let inputs = backend.read_list("cache.store:inputs", 0, -1).unwrap();
        let outputs = backend.read_list("cache.store:outputs", 0, -1).unwrap();
        assert_eq!(inputs.len(), 4);
        assert_eq!(outputs.len(), 4);
        assert_eq!(inputs[2], b"arg-2".to_vec());
        assert_eq!(outputs[2], b"out-2".to_vec());
    }

    #[test]
    fn test_multiple_args_joined() {
        let backend = MemoryBackend::new();
        let history = CallHistory::new();
        let args = vec!["k1".to_string(), "k2".to_string()];

        history
            .around(&backend, &ctx_with(&args), &mut || Ok(String::new()))
            .unwrap();

        let inputs = backend.read_list("cache.store:inputs", 0, -1).unwrap();
        assert_eq!(inputs, vec![b"k1, k2".to_vec()]);
    }

    #[test]
    fn test_failed_call_records_input_but_no_output() {
        let backend = MemoryBackend::new();
        let history = CallHistory::new();
        let args = vec!["doomed".to_string()];

        let result = history.around(&backend, &ctx_with(&args), &mut || {
            Err(CacheError::Backend("store unreachable".to_string()))
        });

        assert!(result.is_err());
        let inputs = backend.read_list("cache.store:inputs", 0, -1).unwrap();
        let outputs = backend.read_list("cache.store:outputs", 0, -1).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(outputs.len(), 0);
    }
}
