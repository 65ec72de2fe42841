//! # Metrics Trait Hierarchy
//!
//! Recording and reading are split into separate traits so that engines only
//! ever write counters and callers only ever read snapshots.
//!
//! ```text
//!   ┌─────────────────────────────┐        ┌──────────────────────────────┐
//!   │     CoreMetricsRecorder     │        │ MetricsSnapshotProvider<S>   │
//!   │  get_hit/get_miss/insert    │        │ (tests, benches, monitoring) │
//!   │  evict/remove/clear         │        └──────────────────────────────┘
//!   └──────────────┬──────────────┘
//!                  │
//!     ┌────────────┼────────────┬──────────────┐
//!     ▼            ▼            ▼              ▼
//!   LruCache    MruCache     LfuCache     variants
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    /// An overflow eviction was attempted.
    fn record_evict_call(&mut self);
    /// An entry left the cache to make room (overflow or `pop_victim`).
    fn record_evicted_entry(&mut self);
    /// A caller asked to remove a key by name.
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
