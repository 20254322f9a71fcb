//! Ensemble of independent trajectories sharing one schema and callback pair.
//!
//! [`EnsembleRunner`] is the primary user-facing API. Construct it from
//! an [`EnsembleConfig`], register the begin and step callbacks (each
//! slot holds one callback; registering again replaces it), then call
//! [`run()`](EnsembleRunner::run). Trajectories are retained afterwards
//! for inspection and feed the statistics layer through
//! [`HistorySource`].
//!
//! # Example
//!
//! ```
//! use mcsl_core::VariableDef;
//! use mcsl_engine::{EnsembleConfig, EnsembleRunner};
//! use rand::Rng;
//!
//! let config = EnsembleConfig::new(vec![VariableDef::integer("x", 0)], 4, 10);
//! let mut ensemble = EnsembleRunner::new(config).unwrap();
//! ensemble.set_begin(|ctx| Ok(ctx.set("x", 0)?));
//! ensemble.set_step(|ctx, _step| {
//!     let d = if ctx.rng().random_bool(0.5) { 1 } else { -1 };
//!     ctx.update::<i64, _>("x", |x| x + d)?;
//!     Ok(())
//! });
//! ensemble.run().unwrap();
//! assert_eq!(ensemble.get_trajectory(3).unwrap().steps_taken(), 10);
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use mcsl_core::{CallbackError, HistorySource, Value, VariableSchema};
use tracing::{debug, info, warn};

use crate::callback::{BeginFn, CallbackSlot, Callbacks, StepFn};
use crate::config::{trajectory_rng, ConfigError, EnsembleConfig, ExecutionMode};
use crate::context::TrajectoryContext;
use crate::pool::{self, Outcome};
use crate::trajectory::{TrajectoryError, TrajectoryRunner};

// ── Error type ──────────────────────────────────────────────────

/// Errors from running or inspecting an ensemble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// A callback slot is empty.
    CallbackNotSet {
        /// The empty slot.
        slot: CallbackSlot,
    },
    /// The ensemble has not been run yet.
    NotRun,
    /// Trajectory index outside `[0, trajectory_count)`.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of trajectories.
        trajectory_count: usize,
    },
    /// A variable name is not declared in the schema.
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },
    /// A trajectory's callback failed. The lowest failing index is reported.
    TrajectoryFailed {
        /// Index of the failing trajectory.
        trajectory: usize,
        /// The trajectory-level error.
        error: TrajectoryError,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallbackNotSet { slot } => write!(f, "{slot} callback is not set"),
            Self::NotRun => write!(f, "ensemble has not been run"),
            Self::IndexOutOfRange {
                index,
                trajectory_count,
            } => write!(
                f,
                "trajectory index {index} out of range (trajectory_count={trajectory_count})"
            ),
            Self::UnknownVariable { name } => write!(f, "variable '{name}' does not exist"),
            Self::TrajectoryFailed { trajectory, error } => {
                write!(f, "trajectory {trajectory}: {error}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TrajectoryFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ── EnsembleRunner ──────────────────────────────────────────────

/// N independent trajectories run under one schema and callback pair.
pub struct EnsembleRunner {
    schema: Arc<VariableSchema>,
    trajectory_count: usize,
    step_count: usize,
    seed: u64,
    execution: ExecutionMode,
    begin: Option<Arc<BeginFn>>,
    step: Option<Arc<StepFn>>,
    trajectories: Option<Vec<TrajectoryRunner>>,
}

impl EnsembleRunner {
    /// Validate `config` and create an ensemble with empty callback slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid declarations or zero counts.
    pub fn new(config: EnsembleConfig) -> Result<Self, ConfigError> {
        let schema = config.validate()?;
        Ok(Self {
            schema: Arc::new(schema),
            trajectory_count: config.trajectory_count,
            step_count: config.step_count,
            seed: config.seed,
            execution: config.execution,
            begin: None,
            step: None,
            trajectories: None,
        })
    }

    /// Register the begin callback, replacing any previous one.
    pub fn set_begin<B>(&mut self, begin: B)
    where
        B: Fn(&mut TrajectoryContext<'_>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.begin = Some(Arc::new(begin));
    }

    /// Register the step callback, replacing any previous one.
    pub fn set_step<S>(&mut self, step: S)
    where
        S: Fn(&mut TrajectoryContext<'_>, usize) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.step = Some(Arc::new(step));
    }

    /// Whether both callback slots are filled.
    pub fn is_ready(&self) -> bool {
        self.begin.is_some() && self.step.is_some()
    }

    /// Run every trajectory to `step_count` steps with the registered callbacks.
    ///
    /// Any previous results are discarded first. Trajectories are
    /// retained afterwards, including after a failure, in which case
    /// the failing trajectory's history stops at its last completed
    /// step and trajectories not yet started stay empty.
    ///
    /// # Errors
    ///
    /// [`RunError::CallbackNotSet`] before anything runs if a slot is
    /// empty; [`RunError::TrajectoryFailed`] if a callback fails.
    pub fn run(&mut self) -> Result<(), RunError> {
        let begin = self.begin.clone().ok_or(RunError::CallbackNotSet {
            slot: CallbackSlot::Begin,
        })?;
        let step = self.step.clone().ok_or(RunError::CallbackNotSet {
            slot: CallbackSlot::Step,
        })?;
        self.execute(Callbacks::from_shared(begin, step))
    }

    /// Run with an explicit callback pair, leaving the slots untouched.
    pub fn run_with(&mut self, callbacks: Callbacks) -> Result<(), RunError> {
        self.execute(callbacks)
    }

    fn execute(&mut self, callbacks: Callbacks) -> Result<(), RunError> {
        self.trajectories = None;
        let runners: Vec<TrajectoryRunner> = (0..self.trajectory_count)
            .map(|i| {
                TrajectoryRunner::new(
                    Arc::clone(&self.schema),
                    callbacks.clone(),
                    trajectory_rng(self.seed, i),
                )
            })
            .collect();

        let workers = self.execution.resolved_worker_count(self.trajectory_count);
        info!(
            trajectories = self.trajectory_count,
            steps = self.step_count,
            workers,
            "ensemble run starting"
        );

        let results = match self.execution {
            ExecutionMode::Sequential => pool::run_sequential(runners, self.step_count),
            ExecutionMode::Pool { .. } => pool::run_pooled(runners, self.step_count, workers),
        };

        let mut first_failure = None;
        let mut trajectories = Vec::with_capacity(results.len());
        for (index, (runner, outcome)) in results.into_iter().enumerate() {
            match outcome {
                Outcome::Completed => debug!(trajectory = index, "trajectory completed"),
                Outcome::Skipped => debug!(trajectory = index, "trajectory skipped"),
                Outcome::Failed(error) => {
                    warn!(trajectory = index, %error, "trajectory failed");
                    if first_failure.is_none() {
                        first_failure = Some(RunError::TrajectoryFailed {
                            trajectory: index,
                            error,
                        });
                    }
                }
            }
            trajectories.push(runner);
        }
        self.trajectories = Some(trajectories);

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("ensemble run complete");
                Ok(())
            }
        }
    }

    // ── Inspection ──────────────────────────────────────────────

    /// The shared schema.
    pub fn schema(&self) -> &VariableSchema {
        &self.schema
    }

    /// Number of trajectories.
    pub fn trajectory_count(&self) -> usize {
        self.trajectory_count
    }

    /// Steps per trajectory.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether [`run()`](Self::run) has produced trajectories.
    pub fn has_run(&self) -> bool {
        self.trajectories.is_some()
    }

    /// All trajectories, in index order.
    pub fn trajectories(&self) -> Result<&[TrajectoryRunner], RunError> {
        self.trajectories.as_deref().ok_or(RunError::NotRun)
    }

    /// One trajectory by index.
    pub fn get_trajectory(&self, index: usize) -> Result<&TrajectoryRunner, RunError> {
        let trajectories = self.trajectories()?;
        trajectories.get(index).ok_or(RunError::IndexOutOfRange {
            index,
            trajectory_count: self.trajectory_count,
        })
    }

    /// Every trajectory's copy of one variable's history, in index order.
    pub fn variable_histories(&self, name: &str) -> Result<Vec<Vec<Value>>, RunError> {
        if !self.schema.contains(name) {
            return Err(RunError::UnknownVariable { name: name.into() });
        }
        Ok(self
            .trajectories()?
            .iter()
            .filter_map(|t| t.variable_history(name).map(<[Value]>::to_vec))
            .collect())
    }
}

impl HistorySource for EnsembleRunner {
    fn schema(&self) -> &VariableSchema {
        &self.schema
    }

    fn trajectory_count(&self) -> usize {
        self.trajectory_count
    }

    fn step_count(&self) -> usize {
        self.step_count
    }

    fn trajectory_history(&self, trajectory: usize, name: &str) -> Option<&[Value]> {
        self.trajectories.as_ref()?.get(trajectory)?.variable_history(name)
    }
}

impl fmt::Debug for EnsembleRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnsembleRunner")
            .field("trajectory_count", &self.trajectory_count)
            .field("step_count", &self.step_count)
            .field("seed", &self.seed)
            .field("execution", &self.execution)
            .field("ready", &self.is_ready())
            .field("has_run", &self.has_run())
            .finish_non_exhaustive()
    }
}
