//! Bounded worker pool for running trajectories concurrently.
//!
//! Runners are dispatched by value over a crossbeam channel to scoped
//! worker threads and returned, with their outcome, over a second
//! channel. Each runner owns all of its mutable state, so workers share
//! nothing but the channels and an abort flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::debug;

use crate::trajectory::{TrajectoryError, TrajectoryRunner};

/// What happened to one trajectory during an ensemble run.
#[derive(Debug)]
pub(crate) enum Outcome {
    Completed,
    Failed(TrajectoryError),
    /// Not started because an earlier trajectory failed.
    Skipped,
}

fn run_one(runner: &mut TrajectoryRunner, steps: usize, abort: &AtomicBool) -> Outcome {
    if abort.load(Ordering::Relaxed) {
        return Outcome::Skipped;
    }
    match runner.run_steps(steps) {
        Ok(()) => Outcome::Completed,
        Err(e) => {
            abort.store(true, Ordering::Relaxed);
            Outcome::Failed(e)
        }
    }
}

/// Run every runner on the calling thread, in index order.
pub(crate) fn run_sequential(
    runners: Vec<TrajectoryRunner>,
    steps: usize,
) -> Vec<(TrajectoryRunner, Outcome)> {
    let abort = AtomicBool::new(false);
    runners
        .into_iter()
        .map(|mut runner| {
            let outcome = run_one(&mut runner, steps, &abort);
            (runner, outcome)
        })
        .collect()
}

/// Run every runner on `workers` scoped threads.
///
/// Results come back in index order regardless of completion order. A
/// panicking callback propagates out of the scope.
pub(crate) fn run_pooled(
    runners: Vec<TrajectoryRunner>,
    steps: usize,
    workers: usize,
) -> Vec<(TrajectoryRunner, Outcome)> {
    let count = runners.len();
    let (task_tx, task_rx) = crossbeam_channel::unbounded::<(usize, TrajectoryRunner)>();
    let (done_tx, done_rx) = crossbeam_channel::unbounded();

    for task in runners.into_iter().enumerate() {
        // task_rx is alive until the end of this function.
        let _ = task_tx.send(task);
    }
    drop(task_tx);

    let abort = AtomicBool::new(false);
    thread::scope(|scope| {
        for worker in 0..workers {
            let task_rx = task_rx.clone();
            let done_tx = done_tx.clone();
            let abort = &abort;
            scope.spawn(move || {
                debug!(worker, "worker started");
                while let Ok((index, mut runner)) = task_rx.recv() {
                    let outcome = run_one(&mut runner, steps, abort);
                    let _ = done_tx.send((index, runner, outcome));
                }
                // Channel drained; worker exits cleanly.
            });
        }
    });
    drop(done_tx);

    let mut slots: Vec<Option<(TrajectoryRunner, Outcome)>> = (0..count).map(|_| None).collect();
    for (index, runner, outcome) in done_rx.iter() {
        slots[index] = Some((runner, outcome));
    }
    slots.into_iter().flatten().collect()
}
