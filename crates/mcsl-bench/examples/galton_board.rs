//! Galton board example.
//!
//! Drops 1000 balls through 100 rows of pegs, then prints the spread of
//! the ensemble at every row and the distribution of final slots.

use mcsl_bench::{galton_ensemble, REFERENCE_STEPS, REFERENCE_TRAJECTORIES};
use mcsl_engine::ExecutionMode;
use mcsl_stats::{Axis, StatisticsReducer};

fn main() {
    println!("=== mcsl Galton Board ===\n");

    let mut board = galton_ensemble(
        REFERENCE_TRAJECTORIES,
        REFERENCE_STEPS,
        42,
        ExecutionMode::Pool { workers: None },
    )
    .unwrap();
    board.run().unwrap();

    let stats = StatisticsReducer::new(&board);
    let mean = stats.mean("x", Axis::PerStep).unwrap().into_vec();
    let std = stats.std("x", Axis::PerStep).unwrap().into_vec();

    println!("{:>5} {:>9} {:>9} {:>9}", "row", "mean", "std", "sqrt(n)");
    for (step, (m, s)) in mean.iter().zip(&std).enumerate() {
        if step % 10 == 9 || step == 0 {
            let expected = ((step + 1) as f64).sqrt();
            println!("{:>5} {m:>9.3} {s:>9.3} {expected:>9.3}", step + 1);
        }
    }

    let bins = 21;
    let hist = stats.histogram("x", bins, false).unwrap();
    let last = hist.step(REFERENCE_STEPS - 1).unwrap_or_default();
    let tallest = last.iter().copied().fold(0.0, f64::max).max(1.0);

    println!("\nFinal slot distribution ({bins} bins):");
    for (bin, count) in last.iter().enumerate() {
        let lo = hist.edges()[bin];
        let hi = hist.edges()[bin + 1];
        let bar = "#".repeat((count / tallest * 50.0).round() as usize);
        println!("[{lo:>7.2}, {hi:>7.2}) {count:>5} {bar}");
    }
}
