//! Error types for the evictkit library.
//!
//! Cache operations themselves never fail: a miss is `None`, and a cache built
//! with zero capacity quietly stores nothing. Errors only come from two places.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: returned when configuration input cannot be understood
//!   (e.g. an unknown policy name passed to `CachePolicy::from_str`).
//! - [`InvariantError`]: returned by `check_invariants` methods when the key
//!   index and the ordering structures disagree. Seeing one means a bug in the
//!   cache, not bad input.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::builder::CachePolicy;
//! use evictkit::error::ConfigError;
//!
//! let policy: Result<CachePolicy, ConfigError> = "lfu".parse();
//! assert_eq!(policy, Ok(CachePolicy::Lfu));
//!
//! let bad = "fifo".parse::<CachePolicy>();
//! assert!(bad.unwrap_err().to_string().contains("fifo"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on the engines
/// (e.g. [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants))
/// and by the list and bucket structures they are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
