//! Axis-aware reductions over a [`HistoryTable`].
//!
//! Every statistic is computed over a multiset of reals with the usual
//! population definitions. Mean and variance use Welford's online
//! update, which stays stable for long tables.

use std::fmt;

use crate::table::HistoryTable;

/// The dimension a statistic is computed along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Reduce across trajectories: one value per step.
    PerStep,
    /// Reduce across steps: one value per trajectory.
    PerTrajectory,
    /// Reduce the whole table to one value.
    Scalar,
}

/// A supported reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Arithmetic mean.
    Mean,
    /// Middle value; the mean of the two middle values for even counts.
    Median,
    /// Population variance (divides by `n`).
    Variance,
    /// Population standard deviation.
    StdDev,
    /// Smallest value. NaNs are ignored.
    Min,
    /// Largest value. NaNs are ignored.
    Max,
    /// Sum.
    Sum,
}

impl Statistic {
    /// Every statistic, in declaration order.
    pub const ALL: [Statistic; 7] = [
        Self::Mean,
        Self::Median,
        Self::Variance,
        Self::StdDev,
        Self::Min,
        Self::Max,
        Self::Sum,
    ];

    /// Apply to a multiset of values.
    ///
    /// Returns NaN for an empty input. With an infinite value present,
    /// the mean is the plain `sum / n` (so `±inf`, or NaN when both
    /// signs occur) and the variance and standard deviation are NaN.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Self::Mean if values.iter().any(|v| v.is_infinite()) => {
                values.iter().sum::<f64>() / values.len() as f64
            }
            Self::Mean => Welford::from_values(values).mean,
            Self::Variance => Welford::from_values(values).variance(),
            Self::StdDev => Welford::from_values(values).variance().sqrt(),
            Self::Median => median(values),
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Sum => values.iter().sum(),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Variance => "variance",
            Self::StdDev => "std",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
        };
        f.write_str(name)
    }
}

/// Running mean and sum of squared deviations.
#[derive(Clone, Copy, Debug, Default)]
struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn from_values(values: &[f64]) -> Self {
        let mut acc = Self::default();
        for &v in values {
            acc.push(v);
        }
        acc
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Result of a reduction: a series for per-step or per-trajectory
/// axes, a single value for [`Axis::Scalar`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced {
    /// One value per step or per trajectory.
    Series(Vec<f64>),
    /// One value for the whole table.
    Scalar(f64),
}

impl Reduced {
    /// The series, if this is one.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Series(_) => None,
        }
    }

    /// Flatten into a vector (a scalar becomes a one-element vector).
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Self::Series(v) => v,
            Self::Scalar(v) => vec![v],
        }
    }
}

impl HistoryTable {
    /// Reduce along `axis`.
    pub fn reduce(&self, statistic: Statistic, axis: Axis) -> Reduced {
        match axis {
            Axis::PerStep => Reduced::Series(self.rows().map(|row| statistic.apply(row)).collect()),
            Axis::PerTrajectory => Reduced::Series(
                (0..self.trajectories())
                    .filter_map(|t| self.trajectory_column(t))
                    .map(|column| statistic.apply(&column))
                    .collect(),
            ),
            Axis::Scalar => Reduced::Scalar(statistic.apply(self.values())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn textbook_values() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(close(Statistic::Mean.apply(&v), 5.0));
        assert!(close(Statistic::Variance.apply(&v), 4.0));
        assert!(close(Statistic::StdDev.apply(&v), 2.0));
        assert_eq!(Statistic::Median.apply(&v), 4.5);
        assert_eq!(Statistic::Min.apply(&v), 2.0);
        assert_eq!(Statistic::Max.apply(&v), 9.0);
        assert_eq!(Statistic::Sum.apply(&v), 40.0);
    }

    #[test]
    fn odd_median_is_middle_value() {
        assert_eq!(Statistic::Median.apply(&[9.0, -1.0, 3.0]), 3.0);
    }

    #[test]
    fn empty_input_is_nan() {
        for stat in Statistic::ALL {
            assert!(stat.apply(&[]).is_nan(), "{stat}");
        }
    }

    #[test]
    fn infinite_values_follow_plain_definitions() {
        assert_eq!(Statistic::Mean.apply(&[f64::INFINITY, 1.0]), f64::INFINITY);
        assert_eq!(Statistic::Mean.apply(&[f64::INFINITY, f64::INFINITY]), f64::INFINITY);
        assert_eq!(Statistic::Mean.apply(&[f64::NEG_INFINITY, 2.0]), f64::NEG_INFINITY);
        assert!(Statistic::Mean.apply(&[f64::INFINITY, f64::NEG_INFINITY]).is_nan());
        assert!(Statistic::Variance.apply(&[f64::INFINITY, 1.0]).is_nan());
        assert!(Statistic::StdDev.apply(&[f64::INFINITY, 1.0]).is_nan());
        assert_eq!(Statistic::Sum.apply(&[f64::INFINITY, 1.0]), f64::INFINITY);
        assert_eq!(Statistic::Max.apply(&[f64::INFINITY, 1.0]), f64::INFINITY);
    }

    #[test]
    fn axes_have_expected_shapes() {
        // 3 steps x 2 trajectories.
        let table = HistoryTable::from_step_rows(
            "x",
            vec![vec![1.0, 3.0], vec![2.0, 6.0], vec![3.0, 9.0]],
        )
        .unwrap();
        assert_eq!(
            table.reduce(Statistic::Mean, Axis::PerStep),
            Reduced::Series(vec![2.0, 4.0, 6.0])
        );
        assert_eq!(
            table.reduce(Statistic::Sum, Axis::PerTrajectory),
            Reduced::Series(vec![6.0, 18.0])
        );
        assert_eq!(
            table.reduce(Statistic::Max, Axis::Scalar),
            Reduced::Scalar(9.0)
        );
        assert_eq!(table.reduce(Statistic::Median, Axis::Scalar).as_scalar(), Some(3.0));
    }

    proptest! {
        #[test]
        fn welford_matches_two_pass(values in proptest::collection::vec(-1e3f64..1e3, 1..64)) {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            prop_assert!(close(Statistic::Mean.apply(&values), mean));
            prop_assert!(close(Statistic::Variance.apply(&values), var));
        }

        #[test]
        fn location_statistics_lie_within_bounds(values in proptest::collection::vec(-1e6f64..1e6, 1..64)) {
            let min = Statistic::Min.apply(&values);
            let max = Statistic::Max.apply(&values);
            for stat in [Statistic::Mean, Statistic::Median] {
                let v = stat.apply(&values);
                prop_assert!(v >= min - 1e-6 && v <= max + 1e-6);
            }
            prop_assert!(Statistic::Variance.apply(&values) >= 0.0);
        }
    }
}
