use evictkit::policy::lru::LruCache;
use evictkit::traits::{CoreCache, VictimCache};

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    if let Some((key, value)) = cache.peek_victim() {
        println!("next victim: {} => {}", key, value);
    }
}

// Expected output:
// hit 1: alpha
// contains 2? false
// next victim: 1 => alpha
//
// Explanation: capacity=2; after get(&1), key 1 is most recent and key 2 is
// least recent. Putting key 3 evicts key 2, leaving key 1 as the oldest.
