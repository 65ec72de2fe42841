//! MRU (Most Recently Used) cache, selected through the builder.
//!
//! MRU evicts the **most** recently touched entry when capacity is reached.
//! It fits cyclic scans, not general workloads.
//!
//! Run with: cargo run --example basic_mru

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::traits::CoreCache;

fn main() {
    println!("=== MRU Cache Example ===\n");

    let policy: CachePolicy = "mru".parse().unwrap_or(CachePolicy::Mru);
    let mut cache = CacheBuilder::new(5).build::<u32, String>(policy);
    println!("Created {} cache: capacity={}\n", cache.policy(), cache.capacity());

    for i in 1..=5 {
        cache.put(i, format!("value-{}", i));
    }
    println!("Inserted keys 1-5");

    cache.get(&5);
    cache.put(6, "value-6".to_string());
    println!("Read key 5, then inserted key 6");
    println!("  contains 5? {} (read last, evicted)", cache.contains(&5));
    println!("  contains 1? {} (oldest, kept)", cache.contains(&1));
    println!("  len: {}", cache.len());

    println!("\n=== Cyclic Scan ===\n");

    let mut cache = CacheBuilder::new(3).build::<u32, String>(CachePolicy::Mru);
    for round in 0..2 {
        for page in 1..=4 {
            if cache.get(&page).is_none() {
                cache.put(page, format!("page-{}", page));
            }
        }
        let held: Vec<_> = (1..=4).filter(|p| cache.contains(p)).collect();
        println!("after pass {}: holding {:?}", round + 1, held);
    }
}

// Expected output:
// === MRU Cache Example ===
//
// Created mru cache: capacity=5
//
// Inserted keys 1-5
// Read key 5, then inserted key 6
//   contains 5? false (read last, evicted)
//   contains 1? true (oldest, kept)
//   len: 5
//
// === Cyclic Scan ===
//
// after pass 1: holding [1, 2, 4]
// after pass 2: holding [1, 3, 4]
