//! Replay Module
//!
//! Diagnostic readback of the call counter and history recorded for a method.

use std::fmt;

use serde::Serialize;

use crate::backend::KeyValueBackend;
use crate::error::{CacheError, Result};
use crate::instrument::MethodId;

// == Call Pair ==
/// One recorded invocation: rendered input paired with rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallPair {
    /// Textual rendering of the call's arguments
    pub input: String,
    /// Textual rendering of the call's return value
    pub output: String,
}

// == Replay Report ==
/// Structured view of a method's recorded calls.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Stable name of the method
    pub method: String,
    /// Recorded call count
    pub calls: i64,
    /// Input/output pairs, in call order
    pub pairs: Vec<CallPair>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.method, self.calls)?;
        for pair in &self.pairs {
            writeln!(f, "{}({}) -> {}", self.method, pair.input, pair.output)?;
        }
        Ok(())
    }
}

// == Replay Readback ==
/// Builds a replay report for `method` from the backend's records.
///
/// The call counter must exist; replaying a method that was never counted is
/// an error. Inputs and outputs are paired positionally, so if the two lists
/// differ in length (a recorded call failed mid-flight, or one list was
/// flushed externally), only the shorter list's worth of pairs is reported.
pub fn replay_report(backend: &dyn KeyValueBackend, method: MethodId) -> Result<ReplayReport> {
    let raw_count = backend
        .get(method.name())?
        .ok_or_else(|| CacheError::CounterMissing(method.name().to_string()))?;
    let calls: i64 = String::from_utf8(raw_count)?.parse()?;

    let inputs = backend.read_list(&method.inputs_key(), 0, -1)?;
    let outputs = backend.read_list(&method.outputs_key(), 0, -1)?;

    let mut pairs = Vec::with_capacity(inputs.len().min(outputs.len()));
    for (input, output) in inputs.into_iter().zip(outputs) {
        pairs.push(CallPair {
            input: String::from_utf8(input)?,
            output: String::from_utf8(output)?,
        });
    }

    Ok(ReplayReport {
        method: method.name().to_string(),
        calls,
        pairs,
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_replay_missing_counter_is_error() {
        let backend = MemoryBackend::new();

        let result = replay_report(&backend, MethodId::Store);
        assert!(matches!(result, Err(CacheError::CounterMissing(_))));
    }

    #[test]
    fn test_replay_pairs_inputs_with_outputs() {
        let backend = MemoryBackend::new();
        backend.set("cache.store", b"2").unwrap();
        backend.push_to_list("cache.store:inputs", b"42").unwrap();
        backend.push_to_list("cache.store:inputs", b"3.14").unwrap();
        backend.push_to_list("cache.store:outputs", b"key-a").unwrap();
        backend.push_to_list("cache.store:outputs", b"key-b").unwrap();

        let report = replay_report(&backend, MethodId::Store).unwrap();

        assert_eq!(report.method, "cache.store");
        assert_eq!(report.calls, 2);
        assert_eq!(
            report.pairs,
            vec![
                CallPair {
                    input: "42".to_string(),
                    output: "key-a".to_string()
                },
                CallPair {
                    input: "3.14".to_string(),
                    output: "key-b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_replay_truncates_to_shorter_list() {
        let backend = MemoryBackend::new();
        backend.set("cache.store", b"3").unwrap();
        backend.push_to_list("cache.store:inputs", b"a").unwrap();
        backend.push_to_list("cache.store:inputs", b"b").unwrap();
        backend.push_to_list("cache.store:inputs", b"c").unwrap();
        backend.push_to_list("cache.store:outputs", b"out-a").unwrap();

        let report = replay_report(&backend, MethodId::Store).unwrap();

        assert_eq!(report.calls, 3);
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].input, "a");
    }

    #[test]
    fn test_replay_count_without_history() {
        // History flushed externally: the count line survives, call lines don't.
        let backend = MemoryBackend::new();
        backend.set("cache.get", b"5").unwrap();

        let report = replay_report(&backend, MethodId::Get).unwrap();

        assert_eq!(report.calls, 5);
        assert!(report.pairs.is_empty());
    }

    #[test]
    fn test_replay_non_integer_counter_is_error() {
        let backend = MemoryBackend::new();
        backend.set("cache.store", b"not-a-number").unwrap();

        let result = replay_report(&backend, MethodId::Store);
        assert!(matches!(result, Err(CacheError::InvalidInteger(_))));
    }

    #[test]
    fn test_report_display_format() {
        let report = ReplayReport {
            method: "cache.store".to_string(),
            calls: 2,
            pairs: vec![
                CallPair {
                    input: "foo".to_string(),
                    output: "key-1".to_string(),
                },
                CallPair {
                    input: "bar".to_string(),
                    output: "key-2".to_string(),
                },
            ],
        };

        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "cache.store was called 2 times:");
        assert_eq!(lines[1], "cache.store(foo) -> key-1");
        assert_eq!(lines[2], "cache.store(bar) -> key-2");
    }
}
