//! Core abstraction traits for reading recorded ensemble history.

use crate::schema::VariableSchema;
use crate::value::Value;

/// Read-only access to the per-trajectory history of an ensemble.
///
/// This trait decouples statistics from the engine: reducers read
/// through `&dyn HistorySource` (or a generic bound) rather than
/// referencing the ensemble runner directly.
pub trait HistorySource {
    /// The schema every trajectory was run under.
    fn schema(&self) -> &VariableSchema;

    /// Number of trajectories in the ensemble.
    fn trajectory_count(&self) -> usize;

    /// Number of steps each trajectory is expected to record.
    fn step_count(&self) -> usize;

    /// Recorded values of `name` for one trajectory, oldest first.
    ///
    /// Returns `None` if the trajectory has not been created or the
    /// name is not declared.
    fn trajectory_history(&self, trajectory: usize, name: &str) -> Option<&[Value]>;
}
