//! Cache entry record shared by every arena-backed policy.
//!
//! One record type serves all three engines; the policy-specific part is the
//! [`EntryMeta`] tag. Recency policies need nothing beyond the entry's position
//! in its list, while LFU carries an access counter.

/// Policy-specific metadata carried by an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMeta {
    /// Ordering is fully described by list position (LRU, MRU).
    Recency,
    /// Access count, starting at 1 on insert (LFU).
    Frequency(u64),
}

/// Key, value and policy metadata for one cached item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub meta: EntryMeta,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry for a recency-ordered list.
    #[inline]
    pub fn recency(key: K, value: V) -> Self {
        Self {
            key,
            value,
            meta: EntryMeta::Recency,
        }
    }

    /// Creates an entry with an access count of 1.
    #[inline]
    pub fn counted(key: K, value: V) -> Self {
        Self {
            key,
            value,
            meta: EntryMeta::Frequency(1),
        }
    }

    /// Returns the access count, or `None` for recency entries.
    #[inline]
    pub fn frequency(&self) -> Option<u64> {
        match self.meta {
            EntryMeta::Frequency(freq) => Some(freq),
            EntryMeta::Recency => None,
        }
    }

    /// Sets the access count, turning the entry into a counted one.
    #[inline]
    pub fn set_frequency(&mut self, freq: u64) {
        self.meta = EntryMeta::Frequency(freq);
    }

    /// Swaps in a new value and returns the old one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_entry_has_no_frequency() {
        let entry = Entry::recency(1, "one");
        assert_eq!(entry.frequency(), None);
        assert_eq!(entry.meta, EntryMeta::Recency);
    }

    #[test]
    fn counted_entry_starts_at_one() {
        let mut entry = Entry::counted("k", 10);
        assert_eq!(entry.frequency(), Some(1));
        entry.set_frequency(4);
        assert_eq!(entry.frequency(), Some(4));
    }

    #[test]
    fn replace_value_returns_previous() {
        let mut entry = Entry::recency("k", 1);
        assert_eq!(entry.replace_value(2), 1);
        assert_eq!(entry.into_pair(), ("k", 2));
    }
}
