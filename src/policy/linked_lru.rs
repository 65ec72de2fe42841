//! LRU adapter over the `lru` crate.
//!
//! [`lru::LruCache`] is an access-ordered hash map: `get` and `put` move the
//! key to the most-recent position, and `pop_lru` yields the oldest. This type
//! forwards the [`CoreCache`] contract to it with the same observable order as
//! [`LruCache`](super::lru::LruCache).
//!
//! The inner map is created unbounded and capacity is enforced here, so a
//! zero capacity needs no special inner state and large capacities are not
//! reserved up front.

use std::hash::Hash;

use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::error::InvariantError;
use crate::traits::{CoreCache, VictimCache};

/// Fixed-capacity LRU cache delegating its ordering to [`lru::LruCache`].
pub struct LinkedLruCache<K, V> {
    inner: lru::LruCache<K, V, FxBuildHasher>,
    capacity: usize,
}

impl<K, V> LinkedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: lru::LruCache::unbounded_with_hasher(FxBuildHasher),
            capacity,
        }
    }

    /// Iterates entries from most to least recently touched.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.inner.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.inner.len(),
                self.capacity
            )));
        }
        let walked = self.inner.iter().count();
        if walked != self.inner.len() {
            return Err(InvariantError::new(format!(
                "recency walk found {} entries but map holds {}",
                walked,
                self.inner.len()
            )));
        }
        if self.inner.iter().any(|(key, _)| !self.inner.contains(key)) {
            return Err(InvariantError::new("recency walk yields a key the map cannot find"));
        }
        Ok(())
    }
}

impl<K, V> std::fmt::Debug for LinkedLruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedLruCache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for LinkedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let full = self.inner.len() >= self.capacity;
        if full && !self.inner.contains(&key) && self.inner.pop_lru().is_some() {
            trace!(policy = "linked-lru", capacity = self.capacity, "evicted entry to make room");
        }
        self.inner.put(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        self.inner.pop(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.inner.peek(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<K, V> VictimCache<K, V> for LinkedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        self.inner.peek_lru()
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.inner.pop_lru()
    }
}
