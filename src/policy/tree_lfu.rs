//! Ordered-tree LFU.
//!
//! Same eviction order as [`LfuCache`](super::lfu::LfuCache) (lowest count,
//! then oldest touch) kept in a `BTreeMap<(freq, tick), K>` instead of
//! frequency buckets. The victim is always the tree minimum, so there is no
//! floor to maintain; every touch costs O(log n).
//!
//! ```text
//!   map:   FxHashMap<K, TreeSlot { value, freq, tick }>
//!   order: BTreeMap<(freq, tick), K>
//!
//!          (1, 7) → k2     ◄── first entry = victim
//!          (2, 9) → k3
//!          (3, 8) → k1
//! ```
//!
//! `tick` is a per-cache counter bumped on every insert and touch, so within a
//! frequency the smaller tick is the entry that reached that count first.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::recency::MAX_PREALLOC;
use crate::traits::{CoreCache, LfuCacheTrait, VictimCache};

#[derive(Debug)]
struct TreeSlot<V> {
    value: V,
    freq: u64,
    tick: u64,
}

impl<V> TreeSlot<V> {
    fn rank(&self) -> (u64, u64) {
        (self.freq, self.tick)
    }
}

/// LFU cache ordered by a `BTreeMap`; O(log n) per touch.
#[derive(Debug)]
pub struct TreeLfuCache<K, V> {
    map: FxHashMap<K, TreeSlot<V>>,
    order: BTreeMap<(u64, u64), K>,
    tick: u64,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> TreeLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(
                capacity.min(MAX_PREALLOC),
                Default::default(),
            ),
            order: BTreeMap::new(),
            tick: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CoreMetrics::default(),
        }
    }

    /// Verifies that the map and the ordered tree describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but tree holds {} ranks",
                self.map.len(),
                self.order.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for (key, slot) in &self.map {
            if self.order.get(&slot.rank()) != Some(key) {
                return Err(InvariantError::new(format!(
                    "rank ({}, {}) does not point back at its key",
                    slot.freq, slot.tick
                )));
            }
            if slot.tick > self.tick {
                return Err(InvariantError::new(format!(
                    "tick {} is ahead of the clock {}",
                    slot.tick, self.tick
                )));
            }
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn touch(&mut self, key: &K) {
        let tick = self.next_tick();
        if let Some(slot) = self.map.get_mut(key) {
            if let Some(k) = self.order.remove(&slot.rank()) {
                slot.freq = slot.freq.saturating_add(1);
                slot.tick = tick;
                self.order.insert(slot.rank(), k);
            }
        }
    }

    fn remove_first(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let slot = self.map.remove(&key)?;
        Some((key, slot.value))
    }
}

impl<K, V> CoreCache<K, V> for TreeLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        if let Some(slot) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            slot.value = value;
            self.touch(&key);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            if let Some((_, _evicted)) = self.remove_first() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
                trace!(policy = "tree-lfu", capacity = self.capacity, "evicted entry to make room");
            }
        }

        let tick = self.next_tick();
        self.order.insert((1, tick), key.clone());
        self.map.insert(
            key,
            TreeSlot {
                value,
                freq: 1,
                tick,
            },
        );
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.map.contains_key(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.touch(key);
        self.map.get(key).map(|slot| &slot.value)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let slot = self.map.remove(key)?;
        self.order.remove(&slot.rank());
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(slot.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|slot| &slot.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> VictimCache<K, V> for TreeLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        let (_, key) = self.order.first_key_value()?;
        let (key, slot) = self.map.get_key_value(key)?;
        Some((key, &slot.value))
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        let pair = self.remove_first()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(pair)
    }
}

impl<K, V> LfuCacheTrait<K, V> for TreeLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn frequency(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|slot| slot.freq)
    }

    fn min_frequency(&self) -> Option<u64> {
        self.order.first_key_value().map(|((freq, _), _)| *freq)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for TreeLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_lowest_frequency_then_oldest() {
        let mut cache = TreeLfuCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&1);
        cache.get(&1);
        cache.get(&3);
        cache.put(4, "four");

        assert!(!cache.contains(&2));
        assert_eq!(cache.frequency(&1), Some(3));
        assert_eq!(cache.min_frequency(), Some(1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn update_counts_as_touch() {
        let mut cache = TreeLfuCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);
        assert_eq!(cache.frequency(&"a"), Some(2));
        cache.put("c", 3);
        assert!(!cache.contains(&"b"));
        assert_eq!(cache.peek(&"a"), Some(&10));
    }

    #[test]
    fn min_frequency_tracks_tree_minimum_after_evict() {
        let mut cache = TreeLfuCache::new(4);
        cache.put(1, ());
        cache.put(2, ());
        cache.get(&2);
        cache.get(&2);
        assert_eq!(cache.evict(&1), Some(()));
        assert_eq!(cache.evict(&1), None);
        assert_eq!(cache.min_frequency(), Some(3));
        assert_eq!(cache.peek_victim(), Some((&2, &())));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = TreeLfuCache::new(0);
        cache.put(1, 1);
        assert!(cache.is_empty());
        assert_eq!(cache.pop_victim(), None);
        assert_eq!(cache.min_frequency(), None);
    }

    #[test]
    fn clear_empties_both_structures() {
        let mut cache = TreeLfuCache::new(4);
        cache.put(1, 1);
        cache.get(&1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek_victim(), None);
        cache.check_invariants().unwrap();
    }
}
