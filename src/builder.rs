//! Unified cache builder for all eviction policies.
//!
//! Picks an engine by [`CachePolicy`] and hides it behind one [`Cache`] type,
//! so callers can switch policy from configuration without changing code.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let policy: CachePolicy = "lru".parse().unwrap();
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(policy);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```
//!
//! ## Signed capacities
//!
//! [`CacheBuilder::from_signed`] accepts capacities from sources that may be
//! negative (config files, command lines). A negative value is clamped to 0,
//! which builds a valid cache that admits nothing.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ConfigError, InvariantError};
use crate::policy::deque_lru::DequeLruCache;
use crate::policy::lfu::LfuCache;
use crate::policy::linked_lru::LinkedLruCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::policy::tree_lfu::TreeLfuCache;
use crate::traits::{CoreCache, VictimCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used, O(1) arena engine.
    Lru,
    /// Least Frequently Used, O(1) frequency buckets.
    Lfu,
    /// Most Recently Used, O(1) arena engine.
    Mru,
    /// Least Recently Used over the `lru` crate.
    LinkedLru,
    /// Least Recently Used with a scanned queue, O(n) touches.
    DequeLru,
    /// Least Frequently Used over an ordered tree, O(log n) touches.
    TreeLfu,
}

impl CachePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [CachePolicy; 6] = [
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Mru,
        CachePolicy::LinkedLru,
        CachePolicy::DequeLru,
        CachePolicy::TreeLfu,
    ];

    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Mru => "mru",
            CachePolicy::LinkedLru => "linked-lru",
            CachePolicy::DequeLru => "deque-lru",
            CachePolicy::TreeLfu => "tree-lfu",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "unknown cache policy `{}` (expected one of: lru, lfu, mru, linked-lru, deque-lru, tree-lfu)",
                    wanted
                ))
            })
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Mru(MruCache<K, V>),
    LinkedLru(LinkedLruCache<K, V>),
    DequeLru(DequeLruCache<K, V>),
    TreeLfu(TreeLfuCache<K, V>),
}

/// Runs `$body` with `$cache` bound to whichever engine `$inner` holds.
macro_rules! dispatch {
    ($inner:expr, $cache:ident => $body:expr) => {
        match $inner {
            CacheInner::Lru($cache) => $body,
            CacheInner::Lfu($cache) => $body,
            CacheInner::Mru($cache) => $body,
            CacheInner::LinkedLru($cache) => $body,
            CacheInner::DequeLru($cache) => $body,
            CacheInner::TreeLfu($cache) => $body,
        }
    };
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::LinkedLru(_) => CachePolicy::LinkedLru,
            CacheInner::DequeLru(_) => CachePolicy::DequeLru,
            CacheInner::TreeLfu(_) => CachePolicy::TreeLfu,
        }
    }

    /// Runs the wrapped engine's consistency checks.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        dispatch!(&self.inner, cache => cache.check_invariants())
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        dispatch!(&mut self.inner, cache => cache.put(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(&mut self.inner, cache => cache.get(key))
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        dispatch!(&mut self.inner, cache => cache.evict(key))
    }

    fn peek(&self, key: &K) -> Option<&V> {
        dispatch!(&self.inner, cache => cache.peek(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(&self.inner, cache => cache.contains(key))
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, cache => cache.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(&self.inner, cache => cache.capacity())
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, cache => cache.clear())
    }
}

impl<K, V> VictimCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_victim(&self) -> Option<(&K, &V)> {
        dispatch!(&self.inner, cache => cache.peek_victim())
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        dispatch!(&mut self.inner, cache => cache.pop_victim())
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Create a builder from a signed capacity; negative values become 0.
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = CacheBuilder::from_signed(-5).build::<u32, u32>(CachePolicy::Lfu);
    /// cache.put(1, 1);
    /// assert_eq!(cache.capacity(), 0);
    /// assert_eq!(cache.get(&1), None);
    /// ```
    pub fn from_signed(capacity: i64) -> Self {
        let clamped = if capacity < 0 {
            debug!(requested = capacity, "negative cache capacity clamped to 0");
            0
        } else {
            usize::try_from(capacity).unwrap_or(usize::MAX)
        };
        Self { capacity: clamped }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// assert_eq!(lfu.policy(), CachePolicy::Lfu);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        debug!(policy = %policy, capacity = self.capacity, "building cache");
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::Mru => CacheInner::Mru(MruCache::new(self.capacity)),
            CachePolicy::LinkedLru => CacheInner::LinkedLru(LinkedLruCache::new(self.capacity)),
            CachePolicy::DequeLru => CacheInner::DequeLru(DequeLruCache::new(self.capacity)),
            CachePolicy::TreeLfu => CacheInner::TreeLfu(TreeLfuCache::new(self.capacity)),
        };

        Cache { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(10).build::<u64, String>(policy);
            assert_eq!(cache.policy(), policy);

            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());

            assert_eq!(cache.get(&1), Some(&"one".to_string()));
            assert_eq!(cache.get(&2), Some(&"two".to_string()));
            assert_eq!(cache.get(&3), None);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&99));
            assert_eq!(cache.len(), 2);

            cache.put(1, "ONE".to_string());
            assert_eq!(cache.peek(&1), Some(&"ONE".to_string()));
            assert_eq!(cache.len(), 2);

            assert_eq!(cache.evict(&2), Some("two".to_string()));
            assert_eq!(cache.evict(&2), None);

            cache.clear();
            assert!(cache.is_empty(), "{} not empty after clear", policy);
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut cache = CacheBuilder::new(2).build::<u64, String>(CachePolicy::Lru);

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string()); // evicts key 1

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_victims_differ_by_policy() {
        let victim = |policy| {
            let mut cache = CacheBuilder::new(3).build::<u32, ()>(policy);
            cache.put(1, ());
            cache.put(2, ());
            cache.put(3, ());
            cache.get(&1);
            cache.get(&1);
            cache.get(&3);
            cache.peek_victim().map(|(k, _)| *k)
        };
        assert_eq!(victim(CachePolicy::Lru), Some(2));
        assert_eq!(victim(CachePolicy::LinkedLru), Some(2));
        assert_eq!(victim(CachePolicy::DequeLru), Some(2));
        assert_eq!(victim(CachePolicy::Lfu), Some(2));
        assert_eq!(victim(CachePolicy::TreeLfu), Some(2));
        assert_eq!(victim(CachePolicy::Mru), Some(3));
    }

    #[test]
    fn test_debug_formatting_for_every_policy() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(2).build::<u32, &str>(policy);
            cache.put(1, "one");
            let rendered = format!("{:?}", cache);
            assert!(rendered.starts_with("Cache"), "{}: {}", policy, rendered);
        }

        let linked = CacheBuilder::new(2).build::<u32, &str>(CachePolicy::LinkedLru);
        assert!(format!("{:?}", linked).contains("LinkedLruCache"));
    }

    mod policy_parsing {
        use super::*;

        #[test]
        fn parses_canonical_names_case_insensitively() {
            assert_eq!("lru".parse(), Ok(CachePolicy::Lru));
            assert_eq!("LFU".parse(), Ok(CachePolicy::Lfu));
            assert_eq!(" Mru ".parse(), Ok(CachePolicy::Mru));
            assert_eq!("Linked-LRU".parse(), Ok(CachePolicy::LinkedLru));
            assert_eq!("deque-lru".parse(), Ok(CachePolicy::DequeLru));
            assert_eq!("tree-lfu".parse(), Ok(CachePolicy::TreeLfu));
        }

        #[test]
        fn display_round_trips_through_from_str() {
            for policy in CachePolicy::ALL {
                assert_eq!(policy.to_string().parse(), Ok(policy));
            }
        }

        #[test]
        fn unknown_name_is_config_error() {
            let err = "arc".parse::<CachePolicy>().unwrap_err();
            assert!(err.message().contains("`arc`"));
        }
    }

    mod signed_capacity {
        use super::*;

        #[test]
        fn negative_clamps_to_zero() {
            assert_eq!(CacheBuilder::from_signed(-1).capacity(), 0);
            assert_eq!(CacheBuilder::from_signed(i64::MIN).capacity(), 0);
        }

        #[test]
        fn non_negative_is_kept() {
            assert_eq!(CacheBuilder::from_signed(0).capacity(), 0);
            assert_eq!(CacheBuilder::from_signed(42).capacity(), 42);
        }

        #[test]
        fn clamped_cache_admits_nothing() {
            for policy in CachePolicy::ALL {
                let mut cache = CacheBuilder::from_signed(-3).build::<u8, u8>(policy);
                cache.put(1, 1);
                assert_eq!(cache.get(&1), None);
                assert_eq!(cache.evict(&1), None);
                assert!(cache.is_empty());
            }
        }
    }
}
