//! Queue-scanning LRU.
//!
//! A hash map for values plus a `VecDeque<K>` holding keys from most to least
//! recently touched. A touch scans the queue to find the key, so `get` and
//! `put`-update are O(n). Observable order is identical to
//! [`LruCache`](super::lru::LruCache); this type exists as a simple reference
//! to check the O(1) engine against.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::InvariantError;
use crate::policy::recency::MAX_PREALLOC;
use crate::traits::{CoreCache, VictimCache};

/// Fixed-capacity LRU cache that keeps its recency order in a scanned queue.
#[derive(Debug)]
pub struct DequeLruCache<K, V> {
    map: FxHashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> DequeLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            map: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            order: VecDeque::with_capacity(prealloc),
            capacity,
        }
    }

    /// Iterates entries from most to least recently touched.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(move |key| self.map.get_key_value(key))
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but queue holds {}",
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
        if let Some(pos) = self.order.iter().position(|key| !self.map.contains_key(key)) {
            return Err(InvariantError::new(format!(
                "queue position {} names a key missing from the map",
                pos
            )));
        }
        Ok(())
    }

    fn move_to_front(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_front(k);
            }
        }
    }

    fn unlink(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

impl<K, V> CoreCache<K, V> for DequeLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            self.move_to_front(&key);
            return;
        }
        if self.map.len() >= self.capacity {
            if let Some(victim) = self.order.pop_back() {
                self.map.remove(&victim);
                trace!(policy = "deque-lru", capacity = self.capacity, "evicted entry to make room");
            }
        }
        self.order.push_front(key.clone());
        self.map.insert(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.map.contains_key(key) {
            return None;
        }
        self.move_to_front(key);
        self.map.get(key)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        self.unlink(key);
        Some(value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
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
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> VictimCache<K, V> for DequeLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        let key = self.order.back()?;
        self.map.get_key_value(key)
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        let value = self.map.remove(&key)?;
        Some((key, value))
    }
}
