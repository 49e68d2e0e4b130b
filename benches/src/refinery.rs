mod common;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lead_refinery::prelude::*;

use common::{generate_source_a, generate_source_b, gosom_mapping, source_tags};

/// Benchmark consolidation throughput with one in four B rows duplicating an A row
fn bench_consolidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate");
    let (tag_a, tag_b) = source_tags();
    let mapping = gosom_mapping();
    let keys = vec!["name".to_string()];

    for count in [100, 1_000, 10_000] {
        let a = generate_source_a(count);
        let b = generate_source_b(count, 4);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| {
                black_box(consolidate(
                    SourceRows::new(&tag_a, &a),
                    SourceRows::new(&tag_b, &b),
                    &keys,
                    &tag_b,
                    &mapping,
                ))
            });
        });
    }

    group.finish();
}

/// Benchmark chunking at the default and maximum chunk sizes
fn bench_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk");
    let records = generate_source_a(10_000);
    let columns = vec!["id".to_string(), "name".to_string(), "phone".to_string()];

    for size in [50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, &size| {
            bench.iter(|| black_box(chunk(&records, size, &columns)));
        });
    }

    group.finish();
}

/// Benchmark CSV rendering of consolidated output
fn bench_to_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_csv");
    let (tag_a, tag_b) = source_tags();

    for count in [1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, &count| {
            bench.iter_batched(
                || {
                    let a = generate_source_a(count);
                    let b = generate_source_b(count, 4);
                    consolidate(
                        SourceRows::new(&tag_a, &a),
                        SourceRows::new(&tag_b, &b),
                        &["name".to_string()],
                        &tag_b,
                        &gosom_mapping(),
                    )
                },
                |records| black_box(to_csv(&records, None).ok()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_consolidate, bench_chunk, bench_to_csv);
criterion_main!(benches);
