//! Errors the cache can report. Normal operation never fails: a missing key is
//! `None`, not an error. What's left is bad configuration and the invariant
//! checker used by the tests.

use thiserror::Error;

/// Returned when a cache is built with parameters it can't honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A cache that holds nothing would evict every entry it was handed.
    #[error("cache max_size must be at least 1")]
    ZeroCapacity,
}

/// Returned by `check_invariants` when the frequency index and the key lookup
/// have drifted apart, or the cache has grown past its bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Which invariant failed.
    pub fn message(&self) -> &str {
        &self.0
    }
}
