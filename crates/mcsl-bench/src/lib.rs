//! Benchmark profiles and utilities for the mcsl Monte Carlo framework.
//!
//! Provides a pre-built Galton board ensemble for benchmarking and examples:
//!
//! - [`galton_begin`] / [`galton_step`]: ±1 peg deflections on an integer `x`
//! - [`galton_ensemble`]: the board with both callbacks registered
//! - [`REFERENCE_TRAJECTORIES`] × [`REFERENCE_STEPS`]: the reference size

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mcsl_core::{CallbackError, VariableDef};
use mcsl_engine::{ConfigError, EnsembleConfig, EnsembleRunner, ExecutionMode, TrajectoryContext};
use mcsl_random::DiscreteRandomVariable;

/// Auxiliary name of the peg each ball bounces off.
pub const PEG: &str = "peg";

/// Trajectories in the reference profile.
pub const REFERENCE_TRAJECTORIES: usize = 1000;

/// Steps in the reference profile.
pub const REFERENCE_STEPS: usize = 100;

/// Drop the ball at slot 0 and store a fair peg.
pub fn galton_begin(ctx: &mut TrajectoryContext<'_>) -> Result<(), CallbackError> {
    let peg = DiscreteRandomVariable::new([(-1_i64, 0.5), (1, 0.5)])
        .map_err(CallbackError::failed)?;
    ctx.set_aux(PEG, peg)?;
    ctx.set("x", 0)?;
    Ok(())
}

/// Deflect the ball one slot left or right.
pub fn galton_step(ctx: &mut TrajectoryContext<'_>, _step: usize) -> Result<(), CallbackError> {
    let (peg, rng) = ctx.aux_with_rng::<DiscreteRandomVariable<i64>>(PEG)?;
    let d = *peg.evaluate(rng);
    ctx.update::<i64, _>("x", |x| x + d)?;
    Ok(())
}

/// Build a Galton board ensemble with both callbacks registered.
pub fn galton_ensemble(
    trajectories: usize,
    steps: usize,
    seed: u64,
    execution: ExecutionMode,
) -> Result<EnsembleRunner, ConfigError> {
    let config = EnsembleConfig::new(vec![VariableDef::integer("x", 0)], trajectories, steps)
        .with_seed(seed)
        .with_execution(execution);
    let mut ensemble = EnsembleRunner::new(config)?;
    ensemble.set_begin(galton_begin);
    ensemble.set_step(galton_step);
    Ok(ensemble)
}
