//! Reusable ensemble fixtures.
//!
//! - [`random_walk_config`]: one integer `x`, seeded, sequential.
//! - [`random_walk_callbacks`]: ±1 walk drawn from a stored coin.
//! - [`failing_callbacks`]: counts up, then fails at a fixed step.

use mcsl_core::{CallbackError, VariableDef};
use mcsl_engine::{Callbacks, EnsembleConfig};
use mcsl_random::DiscreteRandomVariable;

/// Auxiliary name the walk fixtures store their coin under.
pub const COIN: &str = "coin";

/// Config for an integer random walk on `x` starting at 0.
pub fn random_walk_config(trajectories: usize, steps: usize, seed: u64) -> EnsembleConfig {
    EnsembleConfig::new(vec![VariableDef::integer("x", 0)], trajectories, steps).with_seed(seed)
}

/// Begin stores a fair ±1 coin in the auxiliary store; each step adds
/// one draw to `x`.
pub fn random_walk_callbacks() -> Callbacks {
    Callbacks::new(
        |ctx| {
            let coin = DiscreteRandomVariable::new([(-1_i64, 1.0), (1, 1.0)])
                .map_err(CallbackError::failed)?;
            ctx.set("x", 0)?;
            ctx.set_aux(COIN, coin)?;
            Ok(())
        },
        |ctx, _| {
            let (coin, rng) = ctx.aux_with_rng::<DiscreteRandomVariable<i64>>(COIN)?;
            let d = *coin.evaluate(rng);
            ctx.update::<i64, _>("x", |x| x + d)?;
            Ok(())
        },
    )
}

/// Increments `x` every step and fails at step `fail_at`.
pub fn failing_callbacks(fail_at: usize) -> Callbacks {
    Callbacks::new(
        |_| Ok(()),
        move |ctx, step| {
            if step == fail_at {
                return Err(CallbackError::failed(format!("planned failure at step {step}")));
            }
            ctx.update::<i64, _>("x", |x| x + 1)?;
            Ok(())
        },
    )
}
