//! Recency-ordered engine shared by [`LruCache`](super::lru::LruCache) and
//! [`MruCache`](super::mru::MruCache).
//!
//! Both policies keep one total order, most recently touched at the front.
//! They differ only in which end of the list the overflow victim is taken
//! from, captured here by [`VictimEnd`].

use std::hash::Hash;

use tracing::trace;

use crate::ds::entry::Entry;
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::key_index::KeyIndex;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::CoreMetricsRecorder;

/// Upper bound on slots reserved up front; larger caches grow on demand.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;

/// End of the recency list that supplies the overflow victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VictimEnd {
    /// Adjacent to the tail sentinel: least recently touched (LRU).
    Back,
    /// Adjacent to the head sentinel: most recently touched (MRU).
    Front,
}

impl VictimEnd {
    fn policy_name(self) -> &'static str {
        match self {
            VictimEnd::Back => "lru",
            VictimEnd::Front => "mru",
        }
    }
}

#[derive(Debug)]
pub(crate) struct RecencyCore<K, V> {
    index: KeyIndex<K>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    end: VictimEnd,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> RecencyCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(capacity: usize, end: VictimEnd) -> Self {
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            index: KeyIndex::with_capacity(prealloc),
            list: IntrusiveList::with_capacity(prealloc),
            capacity,
            end,
            #[cfg(feature = "metrics")]
            metrics: CoreMetrics::default(),
        }
    }

    pub(crate) fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        if let Some(id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            if let Some(entry) = self.list.get_mut(id) {
                entry.replace_value(value);
            }
            self.list.move_to_front(id);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.list.len() >= self.capacity {
            self.evict_for_insert();
        }

        let id = self.list.push_front(Entry::recency(key.clone(), value));
        self.index.insert(key, id);
    }

    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
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
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        let id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    pub(crate) fn evict(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.index.clear();
        self.list.clear();
    }

    pub(crate) fn peek_victim(&self) -> Option<(&K, &V)> {
        let id = self.victim_id()?;
        self.list.get(id).map(|entry| (&entry.key, &entry.value))
    }

    pub(crate) fn pop_victim(&mut self) -> Option<(K, V)> {
        let id = self.victim_id()?;
        let entry = self.list.remove(id)?;
        self.index.remove(&entry.key);
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(entry.into_pair())
    }

    /// Entries from most to least recently touched.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
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
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to {:?}, which holds a different key",
                        id
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to {:?}, which is not in the list",
                        id
                    )))
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    fn victim_id(&self) -> Option<SlotId> {
        match self.end {
            VictimEnd::Back => self.list.back_id(),
            VictimEnd::Front => self.list.front_id(),
        }
    }

    fn evict_for_insert(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();
        let Some(id) = self.victim_id() else {
            return;
        };
        if let Some(entry) = self.list.remove(id) {
            self.index.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(
                policy = self.end.policy_name(),
                len = self.list.len(),
                capacity = self.capacity,
                "evicted entry to make room"
            );
        }
    }
}
