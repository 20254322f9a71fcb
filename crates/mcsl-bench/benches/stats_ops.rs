//! Criterion benchmarks for table construction, reductions, and histograms.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mcsl_bench::{galton_ensemble, REFERENCE_STEPS, REFERENCE_TRAJECTORIES};
use mcsl_engine::{EnsembleRunner, ExecutionMode};
use mcsl_stats::{Axis, Statistic, StatisticsReducer};

fn reference_board() -> EnsembleRunner {
    let mut board = galton_ensemble(
        REFERENCE_TRAJECTORIES,
        REFERENCE_STEPS,
        42,
        ExecutionMode::Pool { workers: None },
    )
    .unwrap();
    board.run().unwrap();
    board
}

/// Benchmark: read 1000 × 100 integer history into a dense table.
fn bench_table_build(c: &mut Criterion) {
    let board = reference_board();
    let stats = StatisticsReducer::new(&board);
    c.bench_function("table_build_1000x100", |b| {
        b.iter(|| black_box(stats.table("x").unwrap().values().len()));
    });
}

/// Benchmark: every statistic along every axis on a prebuilt table.
fn bench_reductions(c: &mut Criterion) {
    let board = reference_board();
    let table = StatisticsReducer::new(&board).table("x").unwrap();
    let mut group = c.benchmark_group("reduce_1000x100");
    for axis in [Axis::PerStep, Axis::PerTrajectory, Axis::Scalar] {
        for stat in Statistic::ALL {
            group.bench_function(format!("{stat}/{axis:?}"), |b| {
                b.iter(|| black_box(table.reduce(stat, axis)));
            });
        }
    }
    group.finish();
}

/// Benchmark: 50-bin density histogram over every step.
fn bench_histogram(c: &mut Criterion) {
    let board = reference_board();
    let table = StatisticsReducer::new(&board).table("x").unwrap();
    c.bench_function("histogram_1000x100_50bins", |b| {
        b.iter(|| black_box(table.histogram(50, true).unwrap()));
    });
}

criterion_group!(benches, bench_table_build, bench_reductions, bench_histogram);
criterion_main!(benches);
