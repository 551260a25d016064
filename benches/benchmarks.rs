//! Benchmarks for scale/bias chunk reads and writes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scale_bias_chunk::{ExpandedChunk, ScaleBiasChunk};

fn generate_chunk(size: usize) -> ScaleBiasChunk {
    let values: Vec<Option<i64>> = (0..size)
        .map(|i| {
            if i % 97 == 0 {
                None
            } else {
                Some((i as i64 % 5000) - 2500)
            }
        })
        .collect();
    ScaleBiasChunk::from_integers(&values, 0, 0.01).unwrap()
}

fn bench_get_float(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_float");

    for size in [1000, 10000, 100000] {
        let chunk = generate_chunk(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &chunk, |b, chunk| {
            b.iter(|| {
                let mut sum = 0.0;
                for i in 0..chunk.len() {
                    let v = chunk.get_float(black_box(i));
                    if !v.is_nan() {
                        sum += v;
                    }
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_decode_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_range");

    for size in [1000, 10000, 100000] {
        let chunk = generate_chunk(size);
        let mut out = vec![0.0; size];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &chunk, |b, chunk| {
            b.iter(|| chunk.decode_range(black_box(&mut out), 0, size, f64::NAN))
        });
    }

    group.finish();
}

fn bench_decode_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_indices");

    for size in [1000, 10000, 100000] {
        let chunk = generate_chunk(size);
        let ids: Vec<usize> = (0..size).map(|i| (i * 7919) % size).collect();
        let mut out = vec![0.0; size];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ids, |b, ids| {
            b.iter(|| chunk.decode_indices(black_box(&mut out), ids))
        });
    }

    group.finish();
}

fn bench_set_integer(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_integer");

    for size in [1000, 10000, 100000] {
        let mut chunk = ScaleBiasChunk::with_len(size, 0, 0.01).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                for i in 0..size {
                    chunk.set_integer(i, black_box(i as i64 - 500));
                }
            })
        });
    }

    group.finish();
}

fn bench_expand_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_range");

    for size in [1000, 10000, 100000] {
        let chunk = generate_chunk(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &chunk, |b, chunk| {
            b.iter(|| {
                let mut nc = ExpandedChunk::with_capacity(size);
                chunk.expand_range(&mut nc, 0, size);
                nc
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get_float,
    bench_decode_range,
    bench_decode_indices,
    bench_set_integer,
    bench_expand_range
);
criterion_main!(benches);
