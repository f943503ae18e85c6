//! Benchmark for the quality-check hot paths
//!
//! Run with: cargo bench --bench quality_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use loansift::pipeline::{
    find_duplicate_keys, outlier_indices, outlier_profile, sentinel_counts,
    DEFAULT_DUPLICATE_KEYS,
};

/// Generate numeric columns with rare extreme values so the outlier scan
/// has real work to do
fn generate_numeric_dataframe(n_rows: usize, n_cols: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(n_cols);
    for i in 0..n_cols {
        let values: Vec<f64> = (0..n_rows)
            .map(|_| {
                if rng.gen::<f64>() < 0.001 {
                    rng.gen::<f64>() * 100_000.0
                } else {
                    rng.gen::<f64>() * 100.0
                }
            })
            .collect();
        columns.push(Column::new(format!("amount_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Generate text columns sprinkled with the NA sentinel and its
/// trailing-space variants
fn generate_text_dataframe(n_rows: usize, n_cols: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let states = ["DC", "VA", "MD", "CA", "TX", "NY"];

    let mut columns: Vec<Column> = Vec::with_capacity(n_cols);
    for i in 0..n_cols {
        let values: Vec<&str> = (0..n_rows)
            .map(|_| {
                let roll = rng.gen::<f64>();
                if roll < 0.03 {
                    "NA "
                } else if roll < 0.06 {
                    "NA"
                } else {
                    states[rng.gen_range(0..states.len())]
                }
            })
            .collect();
        columns.push(Column::new(format!("field_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Generate the four-column loan key layout with engineered collisions
fn generate_key_dataframe(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let years: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(2012..2015)).collect();
    let agencies: Vec<String> = (0..n_rows)
        .map(|_| rng.gen_range(1u8..9).to_string())
        .collect();
    let respondents: Vec<String> = (0..n_rows)
        .map(|_| format!("R{:04}", rng.gen_range(0u32..500)))
        .collect();
    // Half the sequence space guarantees repeats
    let sequences: Vec<i64> = (0..n_rows)
        .map(|_| rng.gen_range(0..(n_rows as i64 / 2).max(1)))
        .collect();

    df! {
        "As_of_Year" => years,
        "Agency_Code" => agencies,
        "Respondent_ID" => respondents,
        "Sequence_Number" => sequences,
    }
    .expect("Failed to create DataFrame")
}

fn benchmark_outlier_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("outlier_scan");
    group.sample_size(20);

    for n_rows in [10_000, 100_000] {
        let n_cols = 8;
        let df = generate_numeric_dataframe(n_rows, n_cols, 42);
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        group.throughput(Throughput::Elements((n_rows * n_cols) as u64));
        group.bench_with_input(
            BenchmarkId::new("profile", n_rows),
            &(&df, &columns),
            |b, (df, columns)| {
                b.iter(|| {
                    let _ = outlier_profile(black_box(*df), black_box(*columns));
                });
            },
        );
    }

    // Single-column kernel without the frame plumbing
    let values: Vec<f64> = {
        let mut rng = StdRng::seed_from_u64(7);
        (0..100_000).map(|_| rng.gen::<f64>() * 100.0).collect()
    };
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("indices_100k", |b| {
        b.iter(|| {
            let _ = outlier_indices(black_box(&values));
        });
    });

    group.finish();
}

fn benchmark_sentinel_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentinel_scan");
    group.sample_size(30);

    for n_rows in [10_000, 100_000] {
        let n_cols = 6;
        let df = generate_text_dataframe(n_rows, n_cols, 42);
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        group.throughput(Throughput::Elements((n_rows * n_cols) as u64));
        group.bench_with_input(
            BenchmarkId::new("counts", n_rows),
            &(&df, &columns),
            |b, (df, columns)| {
                b.iter(|| {
                    let _ = sentinel_counts(black_box(*df), black_box(*columns));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_duplicate_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_scan");
    group.sample_size(20);

    for n_rows in [10_000, 100_000] {
        let df = generate_key_dataframe(n_rows, 42);

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::new("keys", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = find_duplicate_keys(black_box(df), black_box(&DEFAULT_DUPLICATE_KEYS));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_outlier_scan,
    benchmark_sentinel_scan,
    benchmark_duplicate_scan,
);
criterion_main!(benches);
