//! Performance benchmarks for the similarity and clustering pipelines
//!
//! Run with: cargo bench --bench pipeline_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matriz_core::{
    analyze, ColorCatalog, ColorRecord, SequenceCatalog, SequenceRecord, SimilarityTable,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WORDS: [&str; 12] = [
    "passion", "calm", "energy", "trust", "growth", "mystery", "warmth", "clarity", "depth",
    "purity", "power", "harmony",
];

fn synthetic_catalog(size: usize) -> ColorCatalog {
    let mut rng = StdRng::seed_from_u64(7);
    let records = (0..size)
        .map(|i| {
            let words: Vec<&str> = (0..3).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect();
            ColorRecord::new(
                format!("color{i}"),
                Some(rng.gen_range(0.0..256.0)),
                Some(rng.gen_range(0.0..256.0)),
                Some(rng.gen_range(0.0..256.0)),
                words.join(", "),
            )
        })
        .collect();
    ColorCatalog::from_records(records)
}

fn synthetic_sequences(catalog_size: usize, count: usize) -> SequenceCatalog {
    let mut rng = StdRng::seed_from_u64(11);
    let records = (0..count)
        .map(|_| {
            let names: Vec<String> = (0..6)
                .map(|_| format!("color{}", rng.gen_range(0..catalog_size)))
                .collect();
            SequenceRecord::new(names.join(","))
        })
        .collect();
    SequenceCatalog::from_records(records)
}

/// Benchmark all-pairs dot product precomputation
fn bench_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_precompute");

    for size in [50, 200, 800].iter() {
        let catalog = synthetic_catalog(*size);
        group.bench_with_input(BenchmarkId::new("colors", size), size, |b, _| {
            b.iter(|| black_box(SimilarityTable::precompute(&catalog)));
        });
    }

    group.finish();
}

/// Benchmark point lookups against a built table
fn bench_lookup(c: &mut Criterion) {
    let catalog = synthetic_catalog(200);
    let table = SimilarityTable::precompute(&catalog);

    c.bench_function("similarity_lookup", |b| {
        b.iter(|| black_box(table.lookup("Color17", " color142 ")));
    });
}

/// Benchmark the full clustering pipeline at different catalog sizes
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_analysis");
    group.sample_size(20);

    for size in [50, 200].iter() {
        let catalog = synthetic_catalog(*size);
        let sequences = synthetic_sequences(*size, 100);
        group.bench_with_input(BenchmarkId::new("k5", size), size, |b, _| {
            b.iter(|| black_box(analyze(&catalog, &sequences, None, 5).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_precompute, bench_lookup, bench_analyze);
criterion_main!(benches);
