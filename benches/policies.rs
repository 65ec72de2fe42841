use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, VictimCache};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

const CAPACITY: usize = 1024;
const UNIVERSE: u64 = 16 * 1024;
const OPS: usize = 4096;

fn zipf_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(42);
    let zipf = Zipf::new(UNIVERSE as f64, 1.0).unwrap();
    (0..count)
        .map(|_| {
            let sample: f64 = zipf.sample(&mut rng);
            (sample as u64).saturating_sub(1).min(UNIVERSE - 1)
        })
        .collect()
}

fn uniform_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(7);
    (0..count).map(|_| rng.random::<u64>() % UNIVERSE).collect()
}

fn warmed(policy: CachePolicy) -> Cache<u64, u64> {
    let mut cache = CacheBuilder::new(CAPACITY).build(policy);
    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }
    cache
}

/// Read-through loop: get, and put on miss.
fn bench_read_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_through_zipf");
    group.throughput(Throughput::Elements(OPS as u64));
    let keys = zipf_keys(OPS);

    for policy in CachePolicy::ALL {
        // O(n) touches; keep the run short.
        if policy == CachePolicy::DequeLru {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(policy), &keys, |b, keys| {
            b.iter_batched(
                || warmed(policy),
                |mut cache| {
                    for &key in keys {
                        if cache.get(&std::hint::black_box(key)).is_none() {
                            cache.put(key, key);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Every put is a new key, so every put evicts.
fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(OPS as u64));

    for policy in [CachePolicy::Lru, CachePolicy::Mru, CachePolicy::Lfu, CachePolicy::TreeLfu] {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warmed(policy),
                |mut cache| {
                    for i in 0..OPS as u64 {
                        cache.put(std::hint::black_box(i + UNIVERSE), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// LFU: mixed touches and explicit removals that keep moving the floor.
fn bench_lfu_floor_churn(c: &mut Criterion) {
    let keys = uniform_keys(OPS);
    c.bench_function("lfu_floor_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for (n, &key) in keys.iter().enumerate() {
                    match n % 4 {
                        0 => {
                            cache.evict(&(key % CAPACITY as u64));
                        }
                        1 => {
                            let _ = std::hint::black_box(cache.pop_victim());
                        }
                        _ => {
                            if cache.get(&key).is_none() {
                                cache.put(key, key);
                            }
                        }
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_read_through, bench_insert_evict, bench_lfu_floor_churn);
criterion_main!(benches);
