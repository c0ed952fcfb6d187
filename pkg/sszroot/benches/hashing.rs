use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sszroot::{default_pool, Hasher};

fn merkleize_packed_uint64s(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkleize_packed_uint64s");

    for count in [64u64, 1024, 16_384] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut hasher: Hasher = Hasher::new();

            b.iter(|| {
                hasher.reset();
                let index = hasher.index();
                for value in 0..count {
                    hasher.pack_uint64(value);
                }
                hasher.fill_up_to_32();
                hasher.merkleize(index);
                black_box(hasher.hash_root().unwrap())
            });
        });
    }

    group.finish();
}

fn pooled_uint64_list_root(c: &mut Criterion) {
    let values: Vec<u64> = (0..1024).collect();

    c.bench_function("pooled_uint64_list_root", |b| {
        b.iter(|| {
            let mut hasher = default_pool().get();
            hasher.put_uint64_array(&values, Some(2048)).unwrap();
            black_box(hasher.hash_root().unwrap())
        });
    });
}

fn root_vector_with_mixin(c: &mut Criterion) {
    let roots: Vec<[u8; 32]> = (0..512u16)
        .map(|i| {
            let mut root = [0u8; 32];
            root[..2].copy_from_slice(&i.to_le_bytes());
            root
        })
        .collect();

    c.bench_function("root_vector_with_mixin", |b| {
        b.iter(|| {
            let mut hasher = default_pool().get();
            hasher.put_root_vector(&roots, Some(4096)).unwrap();
            black_box(hasher.hash_root().unwrap())
        });
    });
}

criterion_group!(
    benches,
    merkleize_packed_uint64s,
    pooled_uint64_list_root,
    root_vector_with_mixin
);
criterion_main!(benches);
