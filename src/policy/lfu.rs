//! LFU (Least Frequently Used) cache replacement policy.
//!
//! Evicts the entry with the lowest access count; among entries with equal
//! counts the one touched longest ago goes first. Every operation is O(1).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         LfuCache<K, V>                              │
//! │                                                                     │
//! │   index: KeyIndex<K>            buckets: FrequencyBuckets<K, V>     │
//! │   ┌──────┬────────┐                                                 │
//! │   │ Key  │ SlotId │             min_freq = 1                        │
//! │   ├──────┼────────┤               │                                 │
//! │   │ k1   │ id_6   │               ▼                                 │
//! │   │ k2   │ id_3   │   freq=1: [head] ◄──► [k2] ◄──► [tail]          │
//! │   │ k3   │ id_9   │   freq=2: [head] ◄──► [k3] ◄──► [tail]          │
//! │   └──────┴────────┘   freq=3: [head] ◄──► [k1] ◄──► [tail]          │
//! │                                                                     │
//! │   victim: entry next to the tail sentinel of bucket min_freq        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency Rules
//!
//! | Event                      | Effect                                             |
//! |----------------------------|----------------------------------------------------|
//! | insert (new key)           | count 1, front of bucket 1, `min_freq = 1`         |
//! | touch (`get` / update)     | count + 1, front of next bucket; floor advances by |
//! |                            | one if the floor bucket emptied                    |
//! | overflow eviction          | oldest entry of the floor bucket; floor untouched  |
//! |                            | because the insert that follows resets it to 1     |
//! | `evict(key)`, `pop_victim` | as touch; if `min_freq + 1` has no bucket the      |
//! |                            | floor is re-derived from the populated buckets     |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(3);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//!
//! cache.get(&1);
//! cache.get(&1);
//! cache.get(&3);
//!
//! cache.put(4, "four"); // evicts 2, the only entry still at count 1
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.frequency(&1), Some(3));
//! assert_eq!(cache.min_frequency(), Some(1));
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in a lock for shared use.

use std::hash::Hash;

use tracing::trace;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::ds::key_index::KeyIndex;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::recency::MAX_PREALLOC;
use crate::traits::{CoreCache, LfuCacheTrait, VictimCache};

/// Fixed-capacity cache that evicts the least frequently touched entry.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    index: KeyIndex<K>,
    buckets: FrequencyBuckets<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache. A capacity of 0 yields a cache that stores nothing.
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            index: KeyIndex::with_capacity(prealloc),
            buckets: FrequencyBuckets::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CoreMetrics::default(),
        }
    }

    /// Number of distinct access counts currently held.
    pub fn bucket_count(&self) -> usize {
        self.buckets.bucket_count()
    }

    /// Keys with access count `freq`, newest first.
    pub fn keys_at(&self, freq: u64) -> impl Iterator<Item = &K> {
        self.buckets.iter_bucket(freq).map(|(_, entry)| &entry.key)
    }

    /// Verifies that the key index, the buckets and `min_freq` agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;
        if self.index.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but buckets hold {} entries",
                self.index.len(),
                self.buckets.len()
            )));
        }
        if self.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len(),
                self.capacity
            )));
        }
        for (key, id) in self.index.iter() {
            match self.buckets.get(id) {
                Some(entry) if entry.key == *key => {}
                _ => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to {:?}, which does not hold it",
                        id
                    )))
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    fn evict_for_insert(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();
        if let Some(entry) = self.buckets.evict_floor() {
            self.index.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(
                policy = "lfu",
                freq = entry.frequency().unwrap_or(0),
                len = self.buckets.len(),
                capacity = self.capacity,
                "evicted entry to make room"
            );
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        if let Some(id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            if let Some(entry) = self.buckets.get_mut(id) {
                entry.replace_value(value);
            }
            self.buckets.touch(id);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.buckets.len() >= self.capacity {
            self.evict_for_insert();
        }

        let id = self.buckets.insert(key.clone(), value);
        self.index.insert(key, id);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.buckets.touch(id);
        self.buckets.get(id).map(|entry| &entry.value)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let id = self.index.remove(key)?;
        let entry = self.buckets.remove(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = self.index.get(key)?;
        self.buckets.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.index.clear();
        self.buckets.clear();
    }
}

impl<K, V> VictimCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        let id = self.buckets.peek_min()?;
        self.buckets.get(id).map(|entry| (&entry.key, &entry.value))
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        let entry = self.buckets.pop_min()?;
        self.index.remove(&entry.key);
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(entry.into_pair())
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn frequency(&self, key: &K) -> Option<u64> {
        let id = self.index.get(key)?;
        self.buckets.frequency(id)
    }

    fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
