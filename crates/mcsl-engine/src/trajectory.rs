//! One trajectory: live state, auxiliary store and append-only history.
//!
//! [`TrajectoryRunner`] drives the begin/step protocol. The begin
//! callback runs once, before any step. After every step callback
//! returns, each schema variable's current value is appended to its
//! history column and `steps_taken` advances, so history length and
//! `steps_taken` always agree.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use mcsl_core::{AccessError, CallbackError, Value, ValueKind, VariableSchema};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::auxiliary::AuxStore;
use crate::callback::Callbacks;
use crate::context::TrajectoryContext;

// ── Error type ──────────────────────────────────────────────────

/// Errors from [`TrajectoryRunner::run_steps`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrajectoryError {
    /// `run_steps(0)` was requested.
    ZeroSteps,
    /// The begin callback failed; no step ran.
    BeginFailed(CallbackError),
    /// A step callback failed. History stops at the last completed step.
    StepFailed {
        /// Index of the step whose callback failed.
        step: usize,
        /// The callback's error.
        error: CallbackError,
    },
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSteps => write!(f, "step count must be positive"),
            Self::BeginFailed(e) => write!(f, "begin callback: {e}"),
            Self::StepFailed { step, error } => write!(f, "step {step}: {error}"),
        }
    }
}

impl Error for TrajectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZeroSteps => None,
            Self::BeginFailed(e) => Some(e),
            Self::StepFailed { error, .. } => Some(error),
        }
    }
}

// ── TrajectoryRunner ────────────────────────────────────────────

/// Owner of one trajectory's state and history.
///
/// Holds shared references to the immutable schema and callback pair;
/// everything else (current values, auxiliary store, random stream,
/// history) is exclusively owned, so runners can move across threads
/// without locking.
pub struct TrajectoryRunner {
    schema: Arc<VariableSchema>,
    callbacks: Callbacks,
    state: Vec<Value>,
    aux: AuxStore,
    /// `history[var][step]`, one column per schema variable.
    history: Vec<Vec<Value>>,
    steps_taken: usize,
    begun: bool,
    rng: ChaCha8Rng,
}

// Runners are handed to pool workers by value.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TrajectoryRunner>();
    }
};

impl TrajectoryRunner {
    /// Create a runner with default values and an empty history.
    pub fn new(schema: Arc<VariableSchema>, callbacks: Callbacks, rng: ChaCha8Rng) -> Self {
        let state = schema.defaults();
        let history = vec![Vec::new(); schema.len()];
        Self {
            schema,
            callbacks,
            state,
            aux: AuxStore::new(),
            history,
            steps_taken: 0,
            begun: false,
            rng,
        }
    }

    /// Run `n` more steps.
    ///
    /// The first call runs the begin callback before stepping. Step
    /// indices continue from `steps_taken`, so a fresh runner sees
    /// `0..n`.
    ///
    /// # Errors
    ///
    /// [`TrajectoryError::ZeroSteps`] if `n == 0`. A failing callback
    /// aborts the run; history keeps every step completed before it.
    pub fn run_steps(&mut self, n: usize) -> Result<(), TrajectoryError> {
        if n == 0 {
            return Err(TrajectoryError::ZeroSteps);
        }

        let callbacks = self.callbacks.clone();
        if !self.begun {
            let mut ctx = self.context();
            callbacks
                .begin(&mut ctx)
                .map_err(TrajectoryError::BeginFailed)?;
            self.begun = true;
        }

        for _ in 0..n {
            let step = self.steps_taken;
            let mut ctx = self.context();
            callbacks
                .step(&mut ctx, step)
                .map_err(|error| TrajectoryError::StepFailed { step, error })?;
            self.record();
            trace!(step, "step recorded");
        }
        Ok(())
    }

    fn context(&mut self) -> TrajectoryContext<'_> {
        TrajectoryContext::new(
            &self.schema,
            &mut self.state,
            &self.history,
            &mut self.aux,
            &mut self.rng,
            self.steps_taken,
        )
    }

    fn record(&mut self) {
        for (column, value) in self.history.iter_mut().zip(&self.state) {
            column.push(value.clone());
        }
        self.steps_taken += 1;
    }

    // ── Introspection ───────────────────────────────────────────

    /// The schema this trajectory runs under.
    pub fn schema(&self) -> &VariableSchema {
        &self.schema
    }

    /// Number of completed steps (equals every history column's length).
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Whether the begin callback has completed.
    pub fn has_begun(&self) -> bool {
        self.begun
    }

    /// Variable names in declaration order.
    pub fn variable_names(&self) -> Vec<String> {
        self.schema.names().map(str::to_owned).collect()
    }

    /// Declared kind of every variable.
    pub fn variable_kinds(&self) -> IndexMap<String, ValueKind> {
        self.schema
            .iter()
            .map(|def| (def.name.clone(), def.kind))
            .collect()
    }

    /// Declared kind of one variable.
    pub fn variable_kind(&self, name: &str) -> Result<ValueKind, AccessError> {
        self.schema
            .kind_of(name)
            .ok_or_else(|| AccessError::UnknownVariable { name: name.into() })
    }

    /// Copy of every variable's current value.
    pub fn variable_states(&self) -> IndexMap<String, Value> {
        self.schema
            .names()
            .map(str::to_owned)
            .zip(self.state.iter().cloned())
            .collect()
    }

    /// Current value of one variable.
    pub fn variable_state(&self, name: &str) -> Result<&Value, AccessError> {
        self.schema
            .index_of(name)
            .map(|i| &self.state[i])
            .ok_or_else(|| AccessError::UnknownVariable { name: name.into() })
    }

    /// Names held in the auxiliary store.
    pub fn auxiliary_names(&self) -> Vec<String> {
        self.aux.names().map(str::to_owned).collect()
    }

    /// The auxiliary store, read-only.
    pub fn auxiliary(&self) -> &AuxStore {
        &self.aux
    }

    // ── History ─────────────────────────────────────────────────

    /// Copy of one variable's recorded history, oldest first.
    pub fn get_variable_history(&self, name: &str) -> Result<Vec<Value>, AccessError> {
        self.variable_history(name)
            .map(<[Value]>::to_vec)
            .ok_or_else(|| AccessError::UnknownVariable { name: name.into() })
    }

    /// Copy of the full history, keyed by variable name.
    pub fn get_history(&self) -> IndexMap<String, Vec<Value>> {
        self.schema
            .names()
            .map(str::to_owned)
            .zip(self.history.iter().cloned())
            .collect()
    }

    /// Borrowed history of one variable.
    pub fn variable_history(&self, name: &str) -> Option<&[Value]> {
        self.schema
            .index_of(name)
            .map(|i| self.history[i].as_slice())
    }
}

impl fmt::Debug for TrajectoryRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrajectoryRunner")
            .field("steps_taken", &self.steps_taken)
            .field("begun", &self.begun)
            .field("state", &self.state)
            .field("aux", &self.aux)
            .finish_non_exhaustive()
    }
}
