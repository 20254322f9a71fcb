//! Criterion benchmarks for ensemble execution.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mcsl_bench::{galton_ensemble, REFERENCE_STEPS, REFERENCE_TRAJECTORIES};
use mcsl_engine::{EnsembleRunner, ExecutionMode};
use mcsl_test_utils::fixtures::{random_walk_callbacks, random_walk_config};

/// Benchmark: reference Galton board run on the calling thread.
fn bench_galton_sequential(c: &mut Criterion) {
    let mut board = galton_ensemble(
        REFERENCE_TRAJECTORIES,
        REFERENCE_STEPS,
        42,
        ExecutionMode::Sequential,
    )
    .unwrap();
    c.bench_function("galton_1000x100_sequential", |b| {
        b.iter(|| {
            board.run().unwrap();
            black_box(board.trajectories().unwrap().len());
        });
    });
}

/// Benchmark: reference Galton board run on an auto-sized worker pool.
fn bench_galton_pooled(c: &mut Criterion) {
    let mut board = galton_ensemble(
        REFERENCE_TRAJECTORIES,
        REFERENCE_STEPS,
        42,
        ExecutionMode::Pool { workers: None },
    )
    .unwrap();
    c.bench_function("galton_1000x100_pooled", |b| {
        b.iter(|| {
            board.run().unwrap();
            black_box(board.trajectories().unwrap().len());
        });
    });
}

/// Benchmark: many short trajectories, dominated by per-trajectory setup.
fn bench_short_walks(c: &mut Criterion) {
    let mut ensemble = EnsembleRunner::new(random_walk_config(4096, 4, 7)).unwrap();
    c.bench_function("walk_4096x4_sequential", |b| {
        b.iter(|| {
            ensemble.run_with(random_walk_callbacks()).unwrap();
            black_box(ensemble.has_run());
        });
    });
}

criterion_group!(
    benches,
    bench_galton_sequential,
    bench_galton_pooled,
    bench_short_walks
);
criterion_main!(benches);
