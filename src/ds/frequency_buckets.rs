//! Frequency buckets for O(1) LFU ordering.
//!
//! Entries are partitioned by access count. Each distinct count owns one
//! sentinel-delimited list in a shared [`ListArena`]; within a list the front
//! is the most recently promoted entry and the back is the eviction candidate.
//! A scalar `min_freq` names the lowest populated bucket so the victim is
//! found without scanning.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    FrequencyBuckets<K, V>                           │
//! │                                                                     │
//! │   buckets: FxHashMap<u64, ListHandle>      min_freq = 1             │
//! │                                                │                    │
//! │                                                ▼                    │
//! │   freq=1: [head] ◄──► [k4] ◄──► [k2] ◄──► [tail]                    │
//! │                        newest    VICTIM                             │
//! │   freq=2: [head] ◄──► [k3] ◄──► [tail]                              │
//! │   freq=3: [head] ◄──► [k1] ◄──► [tail]                              │
//! │                                                                     │
//! │   nodes: ListArena<Entry<K, V>>   (entries and sentinels)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Floor tracking
//!
//! Counts only ever grow by one, so the populated counts never skip over the
//! floor on a touch: when the last entry leaves bucket `f == min_freq` it lands
//! in `f + 1`, which becomes the new floor. The same advance-by-one rule is
//! applied when an explicit removal empties the floor bucket; there the bucket
//! at `f + 1` may not exist, and only then is the floor re-derived from the
//! populated buckets (O(distinct counts)).
//!
//! [`evict_floor`](FrequencyBuckets::evict_floor) deliberately leaves
//! `min_freq` untouched: the caller inserts a fresh entry right after, which
//! resets the floor to 1.
//!
//! ## Operations
//!
//! | Operation      | Time  | Notes                                      |
//! |----------------|-------|--------------------------------------------|
//! | `insert`       | O(1)  | new entry at count 1, floor reset to 1     |
//! | `touch`        | O(1)  | migrate to bucket `f + 1`                  |
//! | `remove`       | O(1)* | *re-derives floor only across a gap        |
//! | `evict_floor`  | O(1)  | tail of the floor bucket                   |
//! | `pop_min`      | O(1)* | `evict_floor` + floor settle               |

use rustc_hash::FxHashMap;

use crate::ds::entry::Entry;
use crate::ds::intrusive_list::{ListArena, ListHandle, ListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Default bucket pre-allocation; most entries sit at low counts.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// LFU ordering structure over [`Entry`] records addressed by [`SlotId`].
#[derive(Debug)]
pub struct FrequencyBuckets<K, V> {
    nodes: ListArena<Entry<K, V>>,
    buckets: FxHashMap<u64, ListHandle>,
    min_freq: u64,
}

impl<K, V> FrequencyBuckets<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: ListArena::new(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates empty buckets with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: ListArena::with_capacity(
                capacity.saturating_add(2 * DEFAULT_BUCKET_PREALLOC),
            ),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: 0,
        }
    }

    /// Number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of populated buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Lowest populated access count, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(id)
    }

    /// Access count of the entry at `id`.
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.nodes.get(id).and_then(Entry::frequency)
    }

    /// Stores a new entry at count 1 and resets the floor to 1.
    pub fn insert(&mut self, key: K, value: V) -> SlotId {
        let bucket = self.bucket_or_create(1);
        let id = self.nodes.push_front(bucket, Entry::counted(key, value));
        self.min_freq = 1;
        id
    }

    /// Increments the count of `id`, moving it to the front of the next bucket.
    ///
    /// Returns the new count, or `None` if `id` is not a live entry. At
    /// `u64::MAX` the count saturates and the entry is only refreshed within
    /// its bucket.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let freq = self.frequency(id)?;
        let current = *self.buckets.get(&freq)?;

        if freq == u64::MAX {
            self.nodes.move_to_front(current, id);
            return Some(freq);
        }

        let next_freq = freq + 1;
        let target = self.bucket_or_create(next_freq);
        self.nodes.move_to_front(target, id);
        if let Some(entry) = self.nodes.get_mut(id) {
            entry.set_frequency(next_freq);
        }

        if self.nodes.list_is_empty(current) {
            self.drop_bucket(freq, current);
            if freq == self.min_freq {
                self.min_freq = next_freq;
            }
        }
        Some(next_freq)
    }

    /// Removes the entry at `id`.
    ///
    /// If this empties the floor bucket, the floor advances by one (or is
    /// re-derived when the next count has no bucket).
    pub fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let freq = self.frequency(id)?;
        let bucket = *self.buckets.get(&freq)?;
        let entry = self.nodes.remove(id)?;

        if self.nodes.list_is_empty(bucket) {
            self.drop_bucket(freq, bucket);
            if freq == self.min_freq {
                self.advance_floor(freq);
            }
        }
        Some(entry)
    }

    /// Handle of the eviction candidate: the oldest entry in the floor bucket.
    pub fn peek_min(&self) -> Option<SlotId> {
        if self.is_empty() {
            return None;
        }
        let bucket = match self.buckets.get(&self.min_freq) {
            Some(bucket) => *bucket,
            None => *self.buckets.get(&self.lowest_populated()?)?,
        };
        self.nodes.back_id(bucket)
    }

    /// Removes the oldest entry of the floor bucket without moving the floor.
    ///
    /// Used on the overflow path, where an insert at count 1 follows at once.
    pub fn evict_floor(&mut self) -> Option<Entry<K, V>> {
        if self.is_empty() {
            return None;
        }
        if !self.buckets.contains_key(&self.min_freq) {
            self.min_freq = self.lowest_populated()?;
        }
        let freq = self.min_freq;
        let bucket = *self.buckets.get(&freq)?;
        let id = self.nodes.back_id(bucket)?;
        let entry = self.nodes.remove(id)?;
        if self.nodes.list_is_empty(bucket) {
            self.drop_bucket(freq, bucket);
        }
        Some(entry)
    }

    /// Removes the eviction candidate and leaves the floor accurate.
    pub fn pop_min(&mut self) -> Option<Entry<K, V>> {
        let entry = self.evict_floor()?;
        if !self.buckets.contains_key(&self.min_freq) {
            let vacated = self.min_freq;
            self.advance_floor(vacated);
        }
        Some(entry)
    }

    /// Iterates `(SlotId, &Entry)` of one bucket from newest to oldest.
    pub fn iter_bucket(&self, freq: u64) -> impl Iterator<Item = (SlotId, &Entry<K, V>)> + '_ {
        let list: Option<ListIter<'_, Entry<K, V>>> =
            self.buckets.get(&freq).map(|bucket| self.nodes.iter(*bucket));
        list.into_iter().flatten()
    }

    /// Populated counts in ascending order.
    pub fn frequencies(&self) -> Vec<u64> {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable();
        freqs
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Verifies bucket membership, list links and floor accuracy.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut total = 0usize;
        for (&freq, &bucket) in &self.buckets {
            let count = self.nodes.check_list(bucket)?;
            if count == 0 {
                return Err(InvariantError::new(format!("bucket {} is empty", freq)));
            }
            for (id, entry) in self.nodes.iter(bucket) {
                if entry.frequency() != Some(freq) {
                    return Err(InvariantError::new(format!(
                        "entry {:?} has frequency {:?} but sits in bucket {}",
                        id,
                        entry.frequency(),
                        freq
                    )));
                }
            }
            total += count;
        }
        if total != self.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {} entries but arena holds {}",
                total,
                self.len()
            )));
        }
        if self.nodes.list_count() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} lists allocated for {} buckets",
                self.nodes.list_count(),
                self.buckets.len()
            )));
        }
        if let Some(lowest) = self.lowest_populated() {
            if self.min_freq != lowest {
                return Err(InvariantError::new(format!(
                    "min_freq is {} but lowest populated bucket is {}",
                    self.min_freq, lowest
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if [`check_invariants`](Self::check_invariants) fails (debug/test only).
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency buckets invariant violated: {}", err);
        }
    }

    fn bucket_or_create(&mut self, freq: u64) -> ListHandle {
        if let Some(bucket) = self.buckets.get(&freq) {
            return *bucket;
        }
        let bucket = self.nodes.create_list();
        self.buckets.insert(freq, bucket);
        bucket
    }

    fn drop_bucket(&mut self, freq: u64, bucket: ListHandle) {
        self.buckets.remove(&freq);
        self.nodes.release_list(bucket);
    }

    fn advance_floor(&mut self, vacated: u64) {
        if self.is_empty() {
            self.min_freq = 0;
            return;
        }
        let candidate = vacated.saturating_add(1);
        self.min_freq = if self.buckets.contains_key(&candidate) {
            candidate
        } else {
            self.lowest_populated().unwrap_or(0)
        };
    }

    fn lowest_populated(&self) -> Option<u64> {
        self.buckets.keys().copied().min()
    }
}

impl<K, V> Default for FrequencyBuckets<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
