//! # Cache Trait Hierarchy
//!
//! One contract for every eviction engine in the crate, plus two refinements
//! for engines that can name their next victim and for frequency-ordered
//! engines.
//!
//! ## Architecture
//!
//! ```text
//!            ┌─────────────────────────────────────────┐
//!            │            CoreCache<K, V>              │
//!            │                                         │
//!            │  put(&mut, K, V)                        │
//!            │  get(&mut, &K) → Option<&V>             │
//!            │  evict(&mut, &K) → Option<V>            │
//!            │  peek(&, &K) → Option<&V>               │
//!            │  contains / len / is_empty / capacity   │
//!            │  clear(&mut)                            │
//!            └──────────────────┬──────────────────────┘
//!                               │
//!                               ▼
//!            ┌─────────────────────────────────────────┐
//!            │          VictimCache<K, V>              │
//!            │                                         │
//!            │  peek_victim(&) → Option<(&K, &V)>      │
//!            │  pop_victim(&mut) → Option<(K, V)>      │
//!            └──────────────────┬──────────────────────┘
//!                               │
//!                               ▼
//!            ┌─────────────────────────────────────────┐
//!            │          LfuCacheTrait<K, V>            │
//!            │                                         │
//!            │  frequency(&, &K) → Option<u64>         │
//!            │  min_frequency(&) → Option<u64>         │
//!            └─────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait            | Extends       | Implemented by                              |
//! |------------------|---------------|---------------------------------------------|
//! | `CoreCache`      | -             | every engine and [`Cache`](crate::builder::Cache) |
//! | `VictimCache`    | `CoreCache`   | every engine and [`Cache`](crate::builder::Cache) |
//! | `LfuCacheTrait`  | `VictimCache` | `LfuCache`, `TreeLfuCache`                  |
//!
//! ## Touch Semantics
//!
//! A *touch* is a `get` hit or a `put` on a key that is already present. Each
//! policy defines what a touch does to the entry's eviction rank:
//!
//! | Policy | Touch effect                      | Overflow victim              |
//! |--------|-----------------------------------|------------------------------|
//! | LRU    | move to most-recent position      | least recently touched       |
//! | MRU    | move to most-recent position      | most recently touched        |
//! | LFU    | frequency + 1, newest in group    | lowest frequency, oldest     |
//!
//! `peek`, `contains` and `peek_victim` never touch.
//!
//! ## Thread Safety
//!
//! Engines are plain single-threaded data structures. They are `Send` and
//! `Sync` whenever `K` and `V` are; wrap them in a lock to share them.

/// Core operations every cache supports.
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`.
    ///
    /// Updating an existing key replaces its value and counts as a touch. A
    /// new key in a full cache first evicts one victim chosen by the policy.
    /// With zero capacity this does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.put(1, "first");
    /// cache.put(1, "second");
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.get(&1), Some(&"second"));
    /// ```
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key`, touching it on a hit.
    ///
    /// Use [`peek`](Self::peek) to read without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes `key` and hands back its value. Absent keys are a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// cache.put("a", 1);
    /// assert_eq!(cache.evict(&"a"), Some(1));
    /// assert_eq!(cache.evict(&"a"), None);
    /// ```
    fn evict(&mut self, key: &K) -> Option<V>;

    /// Returns the value for `key` without touching it.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks whether `key` is present without touching it.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries the cache admits.
    fn capacity(&self) -> usize;

    /// Removes every entry. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that can name (and give up) the entry the next overflow would evict.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, VictimCache};
/// use evictkit::policy::mru::MruCache;
///
/// let mut cache = MruCache::new(3);
/// cache.put(1, "one");
/// cache.put(2, "two");
///
/// // MRU: the most recently touched entry goes first.
/// assert_eq!(cache.peek_victim(), Some((&2, &"two")));
/// assert_eq!(cache.pop_victim(), Some((2, "two")));
/// assert_eq!(cache.len(), 1);
/// ```
pub trait VictimCache<K, V>: CoreCache<K, V> {
    /// The entry the next overflow would evict. Does not touch.
    fn peek_victim(&self) -> Option<(&K, &V)>;

    /// Removes and returns the entry the next overflow would evict.
    fn pop_victim(&mut self) -> Option<(K, V)>;
}

/// Frequency-ordered caches.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LfuCacheTrait};
/// use evictkit::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(10);
/// cache.put(1, "value");
/// assert_eq!(cache.frequency(&1), Some(1));
///
/// cache.get(&1);
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.min_frequency(), Some(2));
/// assert_eq!(cache.frequency(&99), None);
/// ```
pub trait LfuCacheTrait<K, V>: VictimCache<K, V> {
    /// Access count of `key`; 1 right after insertion.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Lowest access count among live entries, or `None` when empty.
    fn min_frequency(&self) -> Option<u64>;
}
