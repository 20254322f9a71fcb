//! Begin/step callback types shared by every trajectory of an ensemble.

use std::fmt;
use std::sync::Arc;

use mcsl_core::CallbackError;

use crate::context::TrajectoryContext;

/// Callback run once per trajectory before its first step.
pub type BeginFn = dyn Fn(&mut TrajectoryContext<'_>) -> Result<(), CallbackError> + Send + Sync;

/// Callback run once per step with the zero-based step index.
pub type StepFn =
    dyn Fn(&mut TrajectoryContext<'_>, usize) -> Result<(), CallbackError> + Send + Sync;

/// Identifies one of the two callback slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackSlot {
    /// The begin callback.
    Begin,
    /// The step callback.
    Step,
}

impl fmt::Display for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("begin"),
            Self::Step => f.write_str("step"),
        }
    }
}

/// An immutable, cheaply clonable begin/step pair.
///
/// Cloning shares the underlying closures; trajectories hold clones
/// and never mutate them.
#[derive(Clone)]
pub struct Callbacks {
    begin: Arc<BeginFn>,
    step: Arc<StepFn>,
}

impl Callbacks {
    /// Wrap a begin and a step closure.
    pub fn new<B, S>(begin: B, step: S) -> Self
    where
        B: Fn(&mut TrajectoryContext<'_>) -> Result<(), CallbackError> + Send + Sync + 'static,
        S: Fn(&mut TrajectoryContext<'_>, usize) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            begin: Arc::new(begin),
            step: Arc::new(step),
        }
    }

    /// Build from already shared closures.
    pub fn from_shared(begin: Arc<BeginFn>, step: Arc<StepFn>) -> Self {
        Self { begin, step }
    }

    pub(crate) fn begin(&self, ctx: &mut TrajectoryContext<'_>) -> Result<(), CallbackError> {
        (self.begin)(ctx)
    }

    pub(crate) fn step(
        &self,
        ctx: &mut TrajectoryContext<'_>,
        step_index: usize,
    ) -> Result<(), CallbackError> {
        (self.step)(ctx, step_index)
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}
