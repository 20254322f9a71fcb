//! Ensemble configuration, validation, and error types.
//!
//! [`EnsembleConfig`] is the builder-input for an
//! [`EnsembleRunner`](crate::EnsembleRunner). [`validate()`](EnsembleConfig::validate)
//! checks the variable declarations and counts once, before any
//! trajectory exists.

use std::error::Error;
use std::fmt;

use mcsl_core::{SchemaError, VariableDef, VariableSchema};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── ExecutionMode ──────────────────────────────────────────────────

/// How an ensemble executes its trajectories.
///
/// Trajectories share no mutable state, so both modes produce the same
/// histories for the same seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One trajectory after another on the calling thread.
    #[default]
    Sequential,
    /// A bounded pool of worker threads.
    Pool {
        /// Number of workers. `None` = auto-detect
        /// (`available_parallelism`, clamped to `[1, 64]`).
        workers: Option<usize>,
    },
}

impl ExecutionMode {
    /// Resolve the number of threads used for `trajectory_count` trajectories.
    ///
    /// Explicit counts are clamped to `[1, 64]` and never exceed the
    /// number of trajectories. Sequential mode always resolves to 1.
    pub fn resolved_worker_count(&self, trajectory_count: usize) -> usize {
        let workers = match self {
            Self::Sequential => 1,
            Self::Pool { workers: Some(n) } => (*n).clamp(1, 64),
            Self::Pool { workers: None } => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        };
        workers.min(trajectory_count.max(1))
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EnsembleConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable declarations are invalid.
    Schema(SchemaError),
    /// `trajectory_count` is zero.
    ZeroTrajectories,
    /// `step_count` is zero.
    ZeroSteps,
    /// `ExecutionMode::Pool` was given an explicit worker count of zero.
    InvalidWorkerCount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "schema: {e}"),
            Self::ZeroTrajectories => write!(f, "trajectory_count must be at least 1"),
            Self::ZeroSteps => write!(f, "step_count must be at least 1"),
            Self::InvalidWorkerCount => write!(f, "worker count must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for ConfigError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

// ── EnsembleConfig ─────────────────────────────────────────────────

/// Everything needed to build an ensemble, except the callbacks.
#[derive(Clone, Debug)]
pub struct EnsembleConfig {
    /// Ordered variable declarations shared by every trajectory.
    pub variables: Vec<VariableDef>,
    /// Number of independent trajectories. Must be positive.
    pub trajectory_count: usize,
    /// Steps per trajectory. Must be positive.
    pub step_count: usize,
    /// Master seed. Trajectory `i` draws from [`trajectory_rng`]`(seed, i)`.
    pub seed: u64,
    /// Sequential or pooled execution.
    pub execution: ExecutionMode,
}

impl EnsembleConfig {
    /// Sequential config with seed 0.
    pub fn new(variables: Vec<VariableDef>, trajectory_count: usize, step_count: usize) -> Self {
        Self {
            variables,
            trajectory_count,
            step_count,
            seed: 0,
            execution: ExecutionMode::Sequential,
        }
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the execution mode.
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Check counts and declarations, returning the validated schema.
    pub fn validate(&self) -> Result<VariableSchema, ConfigError> {
        if self.trajectory_count == 0 {
            return Err(ConfigError::ZeroTrajectories);
        }
        if self.step_count == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.execution == (ExecutionMode::Pool { workers: Some(0) }) {
            return Err(ConfigError::InvalidWorkerCount);
        }
        Ok(VariableSchema::new(self.variables.clone())?)
    }
}

/// The random stream owned by trajectory `index` under master `seed`.
///
/// Every trajectory gets its own ChaCha8 stream of the same key, so
/// draws depend only on `(seed, index)`, never on execution order or
/// worker count.
pub fn trajectory_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}
