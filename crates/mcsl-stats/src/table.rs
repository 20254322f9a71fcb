//! Dense step × trajectory numeric tables.

use mcsl_core::HistorySource;
use tracing::debug;

use crate::error::StatsError;

/// One variable's values across an ensemble, as `f64`.
///
/// Stored row-major: row `s` holds every trajectory's value at step
/// `s`. Booleans read as `0.0` / `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryTable {
    name: String,
    steps: usize,
    trajectories: usize,
    data: Vec<f64>,
}

impl HistoryTable {
    /// Read variable `name` out of a history source.
    ///
    /// # Errors
    ///
    /// [`StatsError::UnknownVariable`] for an undeclared name,
    /// [`StatsError::UnsupportedType`] for text variables,
    /// [`StatsError::NoHistory`] / [`StatsError::RaggedHistory`] when a
    /// trajectory did not record exactly `step_count` steps.
    pub fn from_source<H: HistorySource + ?Sized>(
        source: &H,
        name: &str,
    ) -> Result<Self, StatsError> {
        let kind = source
            .schema()
            .kind_of(name)
            .ok_or_else(|| StatsError::UnknownVariable { name: name.into() })?;
        if !kind.is_numeric() {
            return Err(StatsError::UnsupportedType {
                name: name.into(),
                kind,
            });
        }

        let steps = source.step_count();
        let trajectories = source.trajectory_count();
        if steps == 0 || trajectories == 0 {
            return Err(StatsError::MalformedTable {
                reason: format!("{steps} steps x {trajectories} trajectories"),
            });
        }
        let mut data = vec![0.0; steps * trajectories];
        for t in 0..trajectories {
            let history = source
                .trajectory_history(t, name)
                .ok_or(StatsError::NoHistory { trajectory: t })?;
            if history.len() != steps {
                return Err(StatsError::RaggedHistory {
                    trajectory: t,
                    len: history.len(),
                    expected: steps,
                });
            }
            for (s, value) in history.iter().enumerate() {
                // Kind was checked above; every value of a numeric kind reads.
                data[s * trajectories + t] = value.as_f64().unwrap_or(f64::NAN);
            }
        }
        debug!(variable = name, steps, trajectories, "history table built");
        Ok(Self {
            name: name.into(),
            steps,
            trajectories,
            data,
        })
    }

    /// Build from explicit step rows, each holding one value per trajectory.
    pub fn from_step_rows(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Result<Self, StatsError> {
        let steps = rows.len();
        let trajectories = rows.first().map_or(0, Vec::len);
        if steps == 0 || trajectories == 0 {
            return Err(StatsError::MalformedTable {
                reason: "table needs at least one step and one trajectory".into(),
            });
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != trajectories) {
            return Err(StatsError::MalformedTable {
                reason: format!(
                    "row {bad} has {} values, expected {trajectories}",
                    rows[bad].len()
                ),
            });
        }
        Ok(Self {
            name: name.into(),
            steps,
            trajectories,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// The variable this table was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of step rows.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of trajectory columns.
    pub fn trajectories(&self) -> usize {
        self.trajectories
    }

    /// Value at `(step, trajectory)`.
    pub fn get(&self, step: usize, trajectory: usize) -> Option<f64> {
        if step < self.steps && trajectory < self.trajectories {
            Some(self.data[step * self.trajectories + trajectory])
        } else {
            None
        }
    }

    /// Every trajectory's value at one step.
    pub fn step_row(&self, step: usize) -> Option<&[f64]> {
        let start = step.checked_mul(self.trajectories)?;
        self.data.get(start..start + self.trajectories)
    }

    /// Step rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.trajectories)
    }

    /// One trajectory's values across all steps.
    pub fn trajectory_column(&self, trajectory: usize) -> Option<Vec<f64>> {
        if trajectory >= self.trajectories {
            return None;
        }
        Some(self.rows().map(|row| row[trajectory]).collect())
    }

    /// The flat row-major buffer.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Copy out as `rows[step][trajectory]`.
    pub fn to_step_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcsl_core::{Value, ValueKind};
    use mcsl_test_utils::MockHistory;

    #[test]
    fn transposes_trajectory_histories_into_step_rows() {
        let mut mock = MockHistory::integer("x", 3);
        mock.push_trajectory(&[1, 2, 3]);
        mock.push_trajectory(&[10, 20, 30]);
        let table = HistoryTable::from_source(&mock, "x").unwrap();
        assert_eq!(table.steps(), 3);
        assert_eq!(table.trajectories(), 2);
        assert_eq!(table.step_row(1).unwrap(), &[2.0, 20.0]);
        assert_eq!(table.trajectory_column(1).unwrap(), vec![10.0, 20.0, 30.0]);
        assert_eq!(table.get(2, 0), Some(3.0));
        assert_eq!(table.get(3, 0), None);
        assert!(table.step_row(3).is_none());
    }

    #[test]
    fn booleans_become_zero_one() {
        let mut mock = MockHistory::new("flag", ValueKind::Boolean, 2);
        mock.push_values(vec![Value::Boolean(true), Value::Boolean(false)]);
        let table = HistoryTable::from_source(&mock, "flag").unwrap();
        assert_eq!(table.values(), &[1.0, 0.0]);
    }

    #[test]
    fn rejects_text_and_unknown() {
        let mock = MockHistory::new("label", ValueKind::Text, 1);
        assert_eq!(
            HistoryTable::from_source(&mock, "label").unwrap_err(),
            StatsError::UnsupportedType {
                name: "label".into(),
                kind: ValueKind::Text
            }
        );
        assert_eq!(
            HistoryTable::from_source(&mock, "other").unwrap_err(),
            StatsError::UnknownVariable {
                name: "other".into()
            }
        );
    }

    #[test]
    fn ragged_history_rejected() {
        let mut mock = MockHistory::integer("x", 3);
        mock.push_trajectory(&[1, 2, 3]);
        mock.push_trajectory(&[1]);
        assert_eq!(
            HistoryTable::from_source(&mock, "x").unwrap_err(),
            StatsError::RaggedHistory {
                trajectory: 1,
                len: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn missing_trajectory_is_no_history() {
        let mut mock = MockHistory::integer("x", 2);
        mock.push_trajectory(&[1, 2]);
        mock.set_trajectory_count(2);
        assert_eq!(
            HistoryTable::from_source(&mock, "x").unwrap_err(),
            StatsError::NoHistory { trajectory: 1 }
        );
    }

    #[test]
    fn step_rows_must_be_rectangular() {
        assert!(HistoryTable::from_step_rows("x", vec![]).is_err());
        assert!(HistoryTable::from_step_rows("x", vec![vec![1.0], vec![1.0, 2.0]]).is_err());
        let t = HistoryTable::from_step_rows("x", vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(t.to_step_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}
