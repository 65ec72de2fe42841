//! LFU cache with eviction tracing.
//!
//! Run with: RUST_LOG=evictkit=trace cargo run --example basic_lfu

use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evictkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    cache.put("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("frequency of a: {:?}", cache.frequency(&"a"));
    println!("min frequency: {:?}", cache.min_frequency());
}

// Expected output:
// contains a? true
// contains b? false
// frequency of a: Some(2)
// min frequency: Some(1)
//
// Explanation: capacity=2; "a" is read before "c" arrives, so "b" is the only
// entry left at count 1 and is evicted. "c" enters at count 1.
