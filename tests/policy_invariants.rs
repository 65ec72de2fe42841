// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Random operation sequences run against every engine. Each engine must keep
// its own invariants, and engines implementing the same policy must agree on
// every observable result.

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::policy::deque_lru::DequeLruCache;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::linked_lru::LinkedLruCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::tree_lfu::TreeLfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait, VictimCache};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u32),
    Get(u8),
    Peek(u8),
    Evict(u8),
    PopVictim,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..16, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        5 => (0u8..16).prop_map(Op::Get),
        1 => (0u8..16).prop_map(Op::Peek),
        2 => (0u8..16).prop_map(Op::Evict),
        1 => Just(Op::PopVictim),
        1 => Just(Op::Clear),
    ]
}

/// Observable result of one operation.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Unit,
    Value(Option<u32>),
    Pair(Option<(u8, u32)>),
}

fn apply<C: VictimCache<u8, u32>>(cache: &mut C, op: &Op) -> Outcome {
    match *op {
        Op::Put(k, v) => {
            cache.put(k, v);
            Outcome::Unit
        }
        Op::Get(k) => Outcome::Value(cache.get(&k).copied()),
        Op::Peek(k) => Outcome::Value(cache.peek(&k).copied()),
        Op::Evict(k) => Outcome::Value(cache.evict(&k)),
        Op::PopVictim => Outcome::Pair(cache.pop_victim()),
        Op::Clear => {
            cache.clear();
            Outcome::Unit
        }
    }
}

fn victim<C: VictimCache<u8, u32>>(cache: &C) -> Option<(u8, u32)> {
    cache.peek_victim().map(|(k, v)| (*k, *v))
}

// ==============================================
// Per-Engine Invariants
// ==============================================

mod engine_invariants {
    use super::*;

    proptest! {
        /// Property: capacity bound and internal consistency after every op
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_hold_for_every_policy(
            capacity in 0usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            for policy in CachePolicy::ALL {
                let mut cache = CacheBuilder::new(capacity).build::<u8, u32>(policy);
                for op in &ops {
                    apply(&mut cache, op);
                    prop_assert!(cache.len() <= capacity, "{} over capacity", policy);
                    let checked = cache.check_invariants();
                    prop_assert!(checked.is_ok(), "{}: {:?}", policy, checked);
                }
            }
        }

        /// Property: an evicted key reads as absent until it is put again
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_absent_after_evict(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..100),
            key in 0u8..16
        ) {
            for policy in CachePolicy::ALL {
                let mut cache = CacheBuilder::new(capacity).build::<u8, u32>(policy);
                for op in &ops {
                    apply(&mut cache, op);
                }
                cache.evict(&key);
                prop_assert!(!cache.contains(&key));
                prop_assert_eq!(cache.get(&key), None);
                prop_assert_eq!(cache.evict(&key), None);
            }
        }

        /// Property: put on a present key keeps len and stores the new value
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_update_preserves_len(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..100),
            key in 0u8..16,
            v1 in any::<u32>(),
            v2 in any::<u32>()
        ) {
            for policy in CachePolicy::ALL {
                let mut cache = CacheBuilder::new(capacity).build::<u8, u32>(policy);
                for op in &ops {
                    apply(&mut cache, op);
                }
                cache.put(key, v1);
                let len = cache.len();
                cache.put(key, v2);
                prop_assert_eq!(cache.len(), len);
                prop_assert_eq!(cache.get(&key), Some(&v2));
            }
        }

        /// Property: zero capacity never admits anything
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_zero_capacity_is_always_empty(
            ops in prop::collection::vec(op_strategy(), 0..100)
        ) {
            for policy in CachePolicy::ALL {
                let mut cache = CacheBuilder::new(0).build::<u8, u32>(policy);
                for op in &ops {
                    match apply(&mut cache, op) {
                        Outcome::Unit => {}
                        Outcome::Value(v) => prop_assert_eq!(v, None),
                        Outcome::Pair(p) => prop_assert_eq!(p, None),
                    }
                    prop_assert!(cache.is_empty());
                }
            }
        }
    }
}

// ==============================================
// LRU Equivalence
// ==============================================

mod lru_equivalence {
    use super::*;

    fn order<'a>(iter: impl Iterator<Item = (&'a u8, &'a u32)>) -> Vec<(u8, u32)> {
        iter.map(|(k, v)| (*k, *v)).collect()
    }

    proptest! {
        /// Property: the adapter and the queue-scanning LRU match the arena engine
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_lru_variants_agree(
            capacity in 0usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let mut core = LruCache::new(capacity);
            let mut linked = LinkedLruCache::new(capacity);
            let mut deque = DequeLruCache::new(capacity);

            for op in &ops {
                let expected = apply(&mut core, op);
                prop_assert_eq!(&apply(&mut linked, op), &expected, "linked-lru diverged on {:?}", op);
                prop_assert_eq!(&apply(&mut deque, op), &expected, "deque-lru diverged on {:?}", op);

                let want = order(core.iter());
                prop_assert_eq!(order(linked.iter()), want.clone());
                prop_assert_eq!(order(deque.iter()), want);
                prop_assert_eq!(victim(&linked), victim(&core));
                prop_assert_eq!(victim(&deque), victim(&core));
            }
        }
    }
}

// ==============================================
// LFU Equivalence
// ==============================================

mod lfu_equivalence {
    use super::*;

    proptest! {
        /// Property: the ordered-tree LFU matches the bucket engine, including victims
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_lfu_variants_agree(
            capacity in 0usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let mut core = LfuCache::new(capacity);
            let mut tree = TreeLfuCache::new(capacity);

            for op in &ops {
                let expected = apply(&mut core, op);
                prop_assert_eq!(&apply(&mut tree, op), &expected, "tree-lfu diverged on {:?}", op);

                prop_assert_eq!(tree.len(), core.len());
                prop_assert_eq!(tree.min_frequency(), core.min_frequency());
                prop_assert_eq!(victim(&tree), victim(&core));
                for key in 0u8..16 {
                    prop_assert_eq!(tree.frequency(&key), core.frequency(&key));
                }
            }
        }

        /// Property: min_frequency is the smallest live frequency after every op
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_min_frequency_is_smallest_live_count(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let mut cache = LfuCache::new(capacity);
            for op in &ops {
                apply(&mut cache, op);
                let lowest = (0u8..16).filter_map(|k| cache.frequency(&k)).min();
                prop_assert_eq!(cache.min_frequency(), lowest);
                if let Some((k, _)) = victim(&cache) {
                    prop_assert_eq!(cache.frequency(&k), lowest);
                }
            }
        }
    }
}
