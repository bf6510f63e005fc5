// Bloom filter benchmarks for bitsieve

use bitsieve::{BloomFilter, Filter, FilterConfig, HashType};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;

const HASH_TYPES: [HashType; 3] = [HashType::Jenkins, HashType::Murmur, HashType::Fnv];

fn filter_for(hash_type: HashType, num_keys: usize) -> BloomFilter {
    let config = FilterConfig::for_capacity(num_keys, 0.01).with_hash_type(hash_type);
    BloomFilter::new(Arc::new(config))
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let size = 10_000;
    let keys: Vec<String> = (0..size).map(|i| format!("key{:08}", i)).collect();

    group.throughput(Throughput::Elements(size as u64));
    for hash_type in HASH_TYPES {
        group.bench_with_input(BenchmarkId::from_parameter(hash_type), &hash_type, |b, &hash_type| {
            b.iter(|| {
                let mut filter = filter_for(hash_type, size);
                for key in &keys {
                    filter.add(key.as_bytes()).unwrap();
                }
                black_box(filter);
            });
        });
    }

    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("may_contain");
    let size = 10_000;

    for hash_type in HASH_TYPES {
        let mut filter = filter_for(hash_type, size);
        for i in 0..size {
            filter.add(format!("key{:08}", i).as_bytes()).unwrap();
        }
        // Half present, half absent
        let probes: Vec<String> = (size / 2..size + size / 2).map(|i| format!("key{:08}", i)).collect();

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hash_type), &hash_type, |b, _| {
            b.iter(|| {
                for probe in &probes {
                    black_box(filter.may_contain(probe.as_bytes()).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for size in [1_000, 100_000].iter() {
        let mut filter = filter_for(HashType::Murmur, *size);
        for i in 0..*size {
            filter.add(format!("key{:08}", i).as_bytes()).unwrap();
        }
        let encoded = filter.encode();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &filter, |b, filter| {
            b.iter(|| black_box(filter.encode()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(BloomFilter::decode(encoded).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_query, benchmark_codec);
criterion_main!(benches);
