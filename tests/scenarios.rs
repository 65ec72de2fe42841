// ==============================================
// EVICTION SCENARIOS (integration)
// ==============================================
//
// Fixed call sequences with a known victim, run through the public API of
// each engine and through the builder.

use evictkit::prelude::*;

fn survivors<C: CoreCache<i32, &'static str>>(cache: &C) -> Vec<i32> {
    (1..=4).filter(|k| cache.contains(k)).collect()
}

mod lru_scenarios {
    use super::*;

    #[test]
    fn touched_entry_survives_overflow() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        assert_eq!(cache.get(&1), Some(&"one"));
        cache.put(4, "four");

        assert_eq!(survivors(&cache), vec![1, 3, 4]);
        assert_eq!(cache.get(&2), None);
    }

    #[test]
    fn builder_variants_pick_same_victim() {
        for policy in [CachePolicy::Lru, CachePolicy::LinkedLru, CachePolicy::DequeLru] {
            let mut cache = CacheBuilder::new(3).build::<i32, &'static str>(policy);
            cache.put(1, "one");
            cache.put(2, "two");
            cache.put(3, "three");
            cache.get(&1);
            cache.put(4, "four");
            assert_eq!(survivors(&cache), vec![1, 3, 4], "{}", policy);
        }
    }
}

mod mru_scenarios {
    use super::*;

    #[test]
    fn entry_read_last_is_evicted() {
        let mut cache = MruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&3);
        cache.put(4, "four");

        assert_eq!(survivors(&cache), vec![1, 2, 4]);
    }

    #[test]
    fn reading_an_old_entry_makes_it_the_victim() {
        let mut cache = CacheBuilder::new(3).build::<i32, &'static str>(CachePolicy::Mru);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&1);
        cache.put(4, "four");

        assert_eq!(survivors(&cache), vec![2, 3, 4]);
    }
}

mod lfu_scenarios {
    use super::*;

    #[test]
    fn lowest_frequency_is_evicted() {
        for policy in [CachePolicy::Lfu, CachePolicy::TreeLfu] {
            let mut cache = CacheBuilder::new(3).build::<i32, &'static str>(policy);
            cache.put(1, "one");
            cache.put(2, "two");
            cache.put(3, "three");
            cache.get(&1);
            cache.get(&1);
            cache.get(&3);
            cache.put(4, "four");

            assert_eq!(survivors(&cache), vec![1, 3, 4], "{}", policy);
        }
    }

    #[test]
    fn frequencies_are_reported() {
        let mut cache = LfuCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&1);
        cache.get(&1);
        cache.get(&3);
        cache.put(4, "four");

        assert_eq!(cache.frequency(&1), Some(3));
        assert_eq!(cache.frequency(&3), Some(2));
        assert_eq!(cache.frequency(&4), Some(1));
        assert_eq!(cache.frequency(&2), None);
        assert_eq!(cache.min_frequency(), Some(1));
    }

    #[test]
    fn explicit_eviction_of_floor_keeps_victim_choice_right() {
        let mut cache = LfuCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        for _ in 0..3 {
            cache.get(&2);
        }
        cache.get(&3);
        cache.evict(&1);
        // Counts are now 2 → 4, 3 → 2; bucket 2 is the floor.
        assert_eq!(cache.min_frequency(), Some(2));
        cache.put(4, "four");
        cache.put(1, "one");
        assert_eq!(survivors(&cache), vec![1, 2, 3]);
    }
}

mod shared_contract {
    use super::*;

    #[test]
    fn zero_capacity_never_stores() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(0).build::<i32, &'static str>(policy);
            cache.put(1, "one");
            assert_eq!(cache.get(&1), None, "{}", policy);
            assert_eq!(cache.len(), 0);
        }
    }

    #[test]
    fn evict_twice_equals_evict_once() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(4).build::<i32, &'static str>(policy);
            cache.put(1, "one");
            cache.put(2, "two");
            assert_eq!(cache.evict(&1), Some("one"));
            assert_eq!(cache.evict(&1), None);
            assert_eq!(survivors(&cache), vec![2], "{}", policy);
        }
    }

    #[test]
    fn update_keeps_identity() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(4).build::<i32, &'static str>(policy);
            cache.put(1, "v1");
            cache.put(1, "v2");
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1), Some(&"v2"), "{}", policy);
        }
    }
}
