//! evictkit: fixed-capacity key-value caches with pluggable eviction policies.
//!
//! The O(1) engines ([`LruCache`](policy::lru::LruCache),
//! [`LfuCache`](policy::lfu::LfuCache), [`MruCache`](policy::mru::MruCache))
//! pair a key index with arena-backed intrusive lists. All engines implement
//! the [`CoreCache`](traits::CoreCache) contract; [`builder`] selects one at
//! runtime.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
