//! LRU (Least Recently Used) cache replacement policy.
//!
//! Evicts the entry that has gone longest without a touch. A touch is a `get`
//! hit or a `put` on a key already present.
//!
//! ## Architecture
//!
//! ```text
//!   index: KeyIndex<K>            list: IntrusiveList<Entry<K, V>>
//!   ┌──────┬────────┐
//!   │ Key  │ SlotId │     [head] ◄──► [k3] ◄──► [k1] ◄──► [k2] ◄──► [tail]
//!   ├──────┼────────┤     slot 0      MRU                  LRU      slot 1
//!   │ k1   │ id_3   │                                     EVICT
//!   │ k2   │ id_2   │
//!   │ k3   │ id_4   │     new and touched entries enter at the head side
//!   └──────┴────────┘     overflow takes the entry next to the tail
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                                       |
//! |---------------|------|---------------------------------------------|
//! | `put`         | O(1) | may evict one entry first                   |
//! | `get`         | O(1) | moves the entry to the front                |
//! | `evict`       | O(1) | unlink by handle                            |
//! | `peek`        | O(1) | no reordering                               |
//! | `pop_victim`  | O(1) | removes the least recently touched entry    |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//!
//! cache.get(&1);
//! cache.put(4, "four"); // evicts 2
//!
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.len(), 3);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in a lock for shared use.

use std::hash::Hash;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::recency::{RecencyCore, VictimEnd};
use crate::traits::{CoreCache, VictimCache};

/// Fixed-capacity cache that evicts the least recently touched entry.
#[derive(Debug)]
pub struct LruCache<K, V> {
    core: RecencyCore<K, V>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache. A capacity of 0 yields a cache that stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: RecencyCore::new(capacity, VictimEnd::Back),
        }
    }

    /// Iterates entries from most to least recently touched.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.core.iter()
    }

    /// Verifies that the key index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core.check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.core.metrics_snapshot()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.core.reset_metrics();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        self.core.put(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.core.get(key)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        self.core.evict(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.core.peek(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.core.contains(key)
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn clear(&mut self) {
        self.core.clear();
    }
}

impl<K, V> VictimCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        self.core.peek_victim()
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.core.pop_victim()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
