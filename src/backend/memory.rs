//! In-Memory Backend Module
//!
//! A process-local data-structure store implementing the backend contract.
//! Stands in for a networked store during development and testing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::backend::KeyValueBackend;
use crate::error::{CacheError, Result};

/// Default maximum value size in bytes (1 MB).
pub const DEFAULT_MAX_VALUE_SIZE: usize = 1024 * 1024;

// == Backend State ==
/// Keyspace of the in-memory store.
///
/// Scalars and lists live in separate maps; a counter is just a scalar
/// holding decimal integer text, the same representation a data-structure
/// server uses for INCR-able keys.
#[derive(Debug, Default)]
struct State {
    scalars: HashMap<String, Vec<u8>>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

// == Memory Backend ==
/// In-memory key-value store with atomic counters and lists.
///
/// Every operation takes the single state lock for its whole duration, so each
/// backend call is one atomic critical section. This mirrors the atomicity a
/// real data-structure server guarantees per command.
#[derive(Debug)]
pub struct MemoryBackend {
    inner: Mutex<State>,
    max_value_size: usize,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend with the default value-size limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_VALUE_SIZE)
    }

    /// Creates an empty backend with an explicit value-size limit.
    ///
    /// # Arguments
    /// * `max_value_size` - Maximum size in bytes accepted by `set`
    pub fn with_limit(max_value_size: usize) -> Self {
        Self {
            inner: Mutex::new(State::default()),
            max_value_size,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.inner
            .lock()
            .map_err(|_| CacheError::Backend("backend state lock poisoned".to_string()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if value.len() > self.max_value_size {
            return Err(CacheError::ValueTooLarge {
                limit: self.max_value_size,
                actual: value.len(),
            });
        }

        let mut state = self.lock()?;
        state.scalars.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.lock()?;
        Ok(state.scalars.get(key).cloned())
    }

    fn increment(&self, name: &str) -> Result<i64> {
        let mut state = self.lock()?;
        let slot = state.scalars.entry(name.to_string()).or_default();

        // Absent counters start from zero; existing bytes must be integer text.
        let current: i64 = if slot.is_empty() {
            0
        } else {
            std::str::from_utf8(slot)
                .ok()
                .and_then(|text| text.parse().ok())
                .ok_or_else(|| {
                    CacheError::Backend(format!("key '{}' holds a non-integer value", name))
                })?
        };

        let next = current + 1;
        *slot = next.to_string().into_bytes();
        Ok(next)
    }

    fn push_to_list(&self, name: &str, value: &[u8]) -> Result<()> {
        let mut state = self.lock()?;
        state
            .lists
            .entry(name.to_string())
            .or_default()
            .push(value.to_vec());
        Ok(())
    }

    fn read_list(&self, name: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let state = self.lock()?;
        let Some(list) = state.lists.get(name) else {
            return Ok(Vec::new());
        };

        let len = list.len() as i64;
        // Negative indices count back from the tail, then the range is
        // clamped to the list bounds. An inverted range reads as empty.
        let resolve = |index: i64| if index < 0 { len + index } else { index };
        let first = resolve(start).max(0);
        let last = resolve(stop).min(len - 1);

        if len == 0 || first > last {
            return Ok(Vec::new());
        }

        Ok(list[first as usize..=last as usize].to_vec())
    }

    fn flush_all(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.scalars.clear();
        state.lists.clear();
        Ok(())
    }
}
