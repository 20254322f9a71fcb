//! Trajectory and ensemble runners for mcsl Monte Carlo simulations.
//!
//! A [`TrajectoryRunner`] owns one trajectory's live state, auxiliary
//! store, random stream and append-only history, and drives the
//! begin/step callback protocol through a fresh [`TrajectoryContext`]
//! per invocation. An [`EnsembleRunner`] owns N trajectories sharing one
//! schema and one callback pair, and executes them either sequentially
//! or on a bounded worker pool.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod auxiliary;
pub mod callback;
pub mod config;
pub mod context;
pub mod ensemble;
mod pool;
pub mod trajectory;

pub use auxiliary::AuxStore;
pub use callback::{BeginFn, CallbackSlot, Callbacks, StepFn};
pub use config::{trajectory_rng, ConfigError, EnsembleConfig, ExecutionMode};
pub use context::{PastSnapshot, TrajectoryContext};
pub use ensemble::{EnsembleRunner, RunError};
pub use trajectory::{TrajectoryError, TrajectoryRunner};
