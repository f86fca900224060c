//! Backend Module
//!
//! Defines the key-value store collaborator the cache is built on, plus the
//! in-memory implementation used by default.

mod memory;

pub use memory::{MemoryBackend, DEFAULT_MAX_VALUE_SIZE};

use crate::error::Result;

// == Backend Trait ==
/// The key-value store the cache delegates to.
///
/// Every method is atomic from the caller's perspective: implementations must
/// never expose a partially applied increment or list append, since multiple
/// cache handles (or processes) may share one backend. The cache layer never
/// performs read-modify-write sequences on top of these primitives.
pub trait KeyValueBackend: Send + Sync {
    /// Stores `value` verbatim under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Looks up `key`, returning the raw bytes or `None` if absent.
    ///
    /// A miss is not an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the counter stored under `name` and returns the
    /// new value. An absent counter starts from zero.
    fn increment(&self, name: &str) -> Result<i64>;

    /// Atomically appends `value` to the tail of the list stored under `name`,
    /// creating the list if absent.
    fn push_to_list(&self, name: &str, value: &[u8]) -> Result<()>;

    /// Returns the elements of the list under `name` between `start` and
    /// `stop`, both inclusive. Negative indices count from the end of the
    /// list (`-1` is the last element). An absent list reads as empty.
    fn read_list(&self, name: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Destructively clears every key in the backend.
    fn flush_all(&self) -> Result<()>;
}
