//! Key → arena handle index.
//!
//! Every engine pairs one of these with its ordering structure. The index owns
//! a clone of each key so that lookups never touch the arena; the arena entry
//! keeps its own copy so an evicted victim can be unmapped by key.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct KeyIndex<K> {
    map: FxHashMap<K, SlotId>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Maps `key` to `id`, returning the handle it previously mapped to.
    #[inline]
    pub fn insert(&mut self, key: K, id: SlotId) -> Option<SlotId> {
        self.map.insert(key, id)
    }

    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<SlotId> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, SlotId)> {
        self.map.iter().map(|(key, id)| (key, *id))
    }
}

impl<K> Default for KeyIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut index = KeyIndex::new();
        assert_eq!(index.insert("a", SlotId(2)), None);
        assert_eq!(index.insert("a", SlotId(3)), Some(SlotId(2)));
        assert_eq!(index.get(&"a"), Some(SlotId(3)));
        assert!(index.contains(&"a"));
        assert_eq!(index.len(), 1);

        assert_eq!(index.remove(&"a"), Some(SlotId(3)));
        assert_eq!(index.remove(&"a"), None);
        assert!(index.is_empty());
    }
}
