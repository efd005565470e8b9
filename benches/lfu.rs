use freqcache::{BuildIdentityHasher, HashTieBreak, LfuCache, LfuCacheBuilder};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};

type IntCache = LfuCache<u64, u64, HashTieBreak<BuildIdentityHasher>>;

fn full_cache(max_size: u64) -> IntCache {
    let mut cache: IntCache = LfuCacheBuilder::new(max_size as usize)
        .tiebreak(HashTieBreak::with_hash_builder(BuildIdentityHasher))
        .build()
        .unwrap();
    for i in 0..max_size {
        cache.insert(i, i);
    }
    cache
}

fn bench_insert_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_insert");
    for max_size in [1024u64, 16 * 1024] {
        group.throughput(Throughput::Elements(max_size));
        group.bench_function(criterion::BenchmarkId::from_parameter(max_size), |b| {
            b.iter_batched(
                || full_cache(max_size),
                |mut cache| {
                    for i in 0..max_size {
                        cache.insert(std::hint::black_box(i + max_size), i);
                    }
                    cache
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_get_promotion(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_get");
    let max_size = 4096u64;
    group.throughput(Throughput::Elements(max_size));
    group.bench_function("promote_all", |b| {
        b.iter_batched(
            || full_cache(max_size),
            |mut cache| {
                for i in 0..max_size {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_insert_with_eviction, bench_get_promotion);
criterion_main!(benches);
