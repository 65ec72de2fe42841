//! MRU (Most Recently Used) cache replacement policy.
//!
//! Evicts the **most** recently touched entry when capacity is reached. This
//! is the mirror image of LRU and suits cyclic scans, where the item just
//! processed is the one least likely to be needed again soon.
//!
//! ## Architecture
//!
//! ```text
//!   index: KeyIndex<K>            list: IntrusiveList<Entry<K, V>>
//!   ┌──────┬────────┐
//!   │ Key  │ SlotId │     [head] ◄──► [k3] ◄──► [k2] ◄──► [k1] ◄──► [tail]
//!   ├──────┼────────┤     slot 0      MRU                  LRU      slot 1
//!   │ k1   │ id_2   │                 EVICT                KEEP
//!   │ k2   │ id_3   │
//!   │ k3   │ id_4   │     new and touched entries enter at the head side
//!   └──────┴────────┘     overflow takes the entry next to the head
//! ```
//!
//! Insert Flow (new key, cache full)
//! ─────────────────────────────────
//!
//! ```text
//!   put(k4, v):
//!     1. index lookup misses
//!     2. unlink the node after the head sentinel (the MRU entry), unmap its key
//!     3. push k4 after the head sentinel, map k4 → its slot
//! ```
//!
//! A touch (`get` hit or `put` update) moves the entry next to the head, so the
//! entry just read becomes the next victim.
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                                       |
//! |---------------|------|---------------------------------------------|
//! | `put`         | O(1) | may evict the most recent entry first       |
//! | `get`         | O(1) | moves the entry to the front                |
//! | `evict`       | O(1) | unlink by handle                            |
//! | `pop_victim`  | O(1) | removes the most recently touched entry     |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = MruCache::new(3);
//! cache.put(1, 100);
//! cache.put(2, 200);
//! cache.put(3, 300);
//!
//! // Reading 1 makes it the next victim.
//! assert_eq!(cache.get(&1), Some(&100));
//! cache.put(4, 400);
//!
//! assert!(!cache.contains(&1));
//! assert!(cache.contains(&2));
//! assert!(cache.contains(&3));
//! ```
//!
//! ## When to Use
//!
//! **Use MRU when** access patterns are cyclic and predictable, and recently
//! read items are unlikely to be read again soon. **Avoid MRU** for general
//! workloads with temporal locality; LRU fits those.

use std::hash::Hash;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::recency::{RecencyCore, VictimEnd};
use crate::traits::{CoreCache, VictimCache};

/// Fixed-capacity cache that evicts the most recently touched entry.
#[derive(Debug)]
pub struct MruCache<K, V> {
    core: RecencyCore<K, V>,
}

impl<K, V> MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache. A capacity of 0 yields a cache that stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: RecencyCore::new(capacity, VictimEnd::Front),
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

impl<K, V> CoreCache<K, V> for MruCache<K, V>
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

impl<K, V> VictimCache<K, V> for MruCache<K, V>
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
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
