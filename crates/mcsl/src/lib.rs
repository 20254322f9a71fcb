//! mcsl: Monte Carlo simulation over ensembles of stochastic trajectories.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! mcsl sub-crates. For most users, adding `mcsl` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mcsl::prelude::*;
//!
//! // 100 random walks of 50 steps on an integer `x`.
//! let config = EnsembleConfig::new(vec![VariableDef::integer("x", 0)], 100, 50)
//!     .with_seed(7)
//!     .with_execution(ExecutionMode::Pool { workers: Some(4) });
//! let mut ensemble = EnsembleRunner::new(config).unwrap();
//!
//! ensemble.set_begin(|ctx| {
//!     let coin = DiscreteRandomVariable::new([(-1_i64, 1.0), (1, 1.0)])
//!         .map_err(CallbackError::failed)?;
//!     ctx.set_aux("coin", coin)?;
//!     Ok(())
//! });
//! ensemble.set_step(|ctx, _step| {
//!     let (coin, rng) = ctx.aux_with_rng::<DiscreteRandomVariable<i64>>("coin")?;
//!     let d = *coin.evaluate(rng);
//!     ctx.update::<i64, _>("x", |x| x + d)?;
//!     Ok(())
//! });
//! ensemble.run().unwrap();
//!
//! let stats = StatisticsReducer::new(&ensemble);
//! let spread = stats.std("x", Axis::PerStep).unwrap().into_vec();
//! assert_eq!(spread.len(), 50);
//! let hist = stats.histogram("x", 10, true).unwrap();
//! assert_eq!(hist.edges().len(), 11);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mcsl-core` | Values, variable schema, errors, `HistorySource` |
//! | [`engine`] | `mcsl-engine` | Trajectory and ensemble runners, callback context |
//! | [`stats`] | `mcsl-stats` | History tables, reductions, histograms |
//! | [`random`] | `mcsl-random` | Weighted discrete choice, Markov chains |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`mcsl-core`).
///
/// Contains [`types::Value`], the [`types::VariableSchema`] and the
/// [`types::HistorySource`] trait the statistics layer reads through.
pub use mcsl_core as types;

/// Trajectory and ensemble runners (`mcsl-engine`).
///
/// [`engine::EnsembleRunner`] runs N trajectories sequentially or on a
/// worker pool; [`engine::TrajectoryContext`] is what callbacks see.
pub use mcsl_engine as engine;

/// Cross-trajectory statistics (`mcsl-stats`).
///
/// [`stats::StatisticsReducer`] reduces a variable along an
/// [`stats::Axis`] or bins it into a [`stats::Histogram`].
pub use mcsl_stats as stats;

/// Random helpers for use inside callbacks (`mcsl-random`).
pub use mcsl_random as random;

/// Common imports for typical mcsl usage.
///
/// ```rust
/// use mcsl::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mcsl_core::{HistorySource, Value, ValueKind, VariableDef, VariableSchema};

    // Errors
    pub use mcsl_core::{AccessError, CallbackError, SchemaError};
    pub use mcsl_engine::{ConfigError, RunError, TrajectoryError};
    pub use mcsl_random::RandomError;
    pub use mcsl_stats::StatsError;

    // Engine
    pub use mcsl_engine::{
        Callbacks, EnsembleConfig, EnsembleRunner, ExecutionMode, PastSnapshot, TrajectoryContext,
        TrajectoryRunner,
    };

    // Statistics
    pub use mcsl_stats::{Axis, Histogram, HistoryTable, Reduced, Statistic, StatisticsReducer};

    // Random helpers
    pub use mcsl_random::{DiscreteRandomVariable, SimpleMarkovChain};
}
