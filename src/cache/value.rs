//! Cache Value Module
//!
//! Defines the scalar value types the cache accepts and how they are rendered
//! into bytes for storage and into text for call history.

use std::fmt;

// == Cache Value ==
/// A scalar value accepted by `Cache::store`.
///
/// The backend stores opaque bytes; numbers are written as their decimal text
/// so they can be read back with `get_str`/`get_int` or a custom decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
}

impl CacheValue {
    // == Byte Rendering ==
    /// Returns the byte sequence written to the backend for this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CacheValue::Text(s) => s.clone().into_bytes(),
            CacheValue::Bytes(b) => b.clone(),
            CacheValue::Int(n) => n.to_string().into_bytes(),
            CacheValue::Float(x) => x.to_string().into_bytes(),
        }
    }
}

// == Text Rendering ==
/// Textual form used for call-history entries. Raw bytes render lossily.
impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Text(s) => f.write_str(s),
            CacheValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            CacheValue::Int(n) => write!(f, "{}", n),
            CacheValue::Float(x) => write!(f, "{}", x),
        }
    }
}

// == Conversions ==
impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}
