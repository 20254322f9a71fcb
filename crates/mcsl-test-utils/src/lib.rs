//! Test utilities and mock types for mcsl development.
//!
//! Provides [`MockHistory`], an in-memory [`HistorySource`] for testing
//! the statistics layer without running an ensemble, and reusable
//! ensemble fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use mcsl_core::{HistorySource, Value, ValueKind, VariableDef, VariableSchema};

/// In-memory [`HistorySource`] holding a single variable.
///
/// Push one history per trajectory with
/// [`push_trajectory`](MockHistory::push_trajectory) or
/// [`push_values`](MockHistory::push_values). The reported trajectory
/// count follows the number pushed unless overridden with
/// [`set_trajectory_count`](MockHistory::set_trajectory_count), which
/// lets tests simulate trajectories that never recorded anything.
pub struct MockHistory {
    schema: VariableSchema,
    name: String,
    steps: usize,
    histories: Vec<Vec<Value>>,
    trajectory_count: Option<usize>,
}

impl MockHistory {
    /// A mock for one variable of `kind`, expecting `steps` steps.
    ///
    /// # Panics
    ///
    /// If `name` is not a valid variable name.
    pub fn new(name: &str, kind: ValueKind, steps: usize) -> Self {
        let default = match kind {
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Real => Value::Real(0.0),
            ValueKind::Boolean => Value::Boolean(false),
            ValueKind::Text => Value::Text(String::new()),
        };
        let schema = VariableSchema::new(vec![VariableDef::new(name, kind, default)])
            .expect("mock variable name must be valid");
        Self {
            schema,
            name: name.to_owned(),
            steps,
            histories: Vec::new(),
            trajectory_count: None,
        }
    }

    /// Shorthand for an integer variable.
    pub fn integer(name: &str, steps: usize) -> Self {
        Self::new(name, ValueKind::Integer, steps)
    }

    /// Shorthand for a real variable.
    pub fn real(name: &str, steps: usize) -> Self {
        Self::new(name, ValueKind::Real, steps)
    }

    /// Append an integer trajectory.
    pub fn push_trajectory(&mut self, values: &[i64]) {
        self.histories
            .push(values.iter().copied().map(Value::Integer).collect());
    }

    /// Append a real trajectory.
    pub fn push_reals(&mut self, values: &[f64]) {
        self.histories
            .push(values.iter().copied().map(Value::Real).collect());
    }

    /// Append a trajectory of arbitrary values.
    pub fn push_values(&mut self, values: Vec<Value>) {
        self.histories.push(values);
    }

    /// Override the reported trajectory count.
    pub fn set_trajectory_count(&mut self, count: usize) {
        self.trajectory_count = Some(count);
    }
}

impl HistorySource for MockHistory {
    fn schema(&self) -> &VariableSchema {
        &self.schema
    }

    fn trajectory_count(&self) -> usize {
        self.trajectory_count.unwrap_or(self.histories.len())
    }

    fn step_count(&self) -> usize {
        self.steps
    }

    fn trajectory_history(&self, trajectory: usize, name: &str) -> Option<&[Value]> {
        if name != self.name {
            return None;
        }
        self.histories.get(trajectory).map(Vec::as_slice)
    }
}
