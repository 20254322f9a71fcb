//! Per-step histograms over one shared range.
//!
//! The bin range is the global minimum and maximum of the whole table,
//! not of each step, so bin `b` covers the same interval at every step
//! and rows can be compared or stacked into a heat map directly.

use crate::error::StatsError;
use crate::table::HistoryTable;

/// Bin counts (or densities) for every step over shared edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    rows: Vec<Vec<f64>>,
    density: bool,
}

impl Histogram {
    /// The `bins + 1` bin edges, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Whether rows hold densities rather than counts.
    pub fn is_density(&self) -> bool {
        self.density
    }

    /// Bin values for one step.
    pub fn step(&self, step: usize) -> Option<&[f64]> {
        self.rows.get(step).map(Vec::as_slice)
    }

    /// Bin values for every step, `rows[step][bin]`.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Global `[lo, hi]` over finite values, widened when degenerate.
fn global_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        // No finite values at all.
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

impl HistoryTable {
    /// Histogram every step over the table's global range.
    ///
    /// Bins are half-open `[a, b)` except the last, which also includes
    /// the global maximum. Non-finite values are not binned. With
    /// `density`, each step's counts are divided by that step's binned
    /// total times the bin width, so each row integrates to 1; a step
    /// with no finite values has nothing to normalise and its density
    /// row is all NaN.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidBins`] if `bins == 0`.
    pub fn histogram(&self, bins: usize, density: bool) -> Result<Histogram, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidBins { bins });
        }
        let (lo, hi) = global_range(self.values());
        // Halved so ranges spanning most of f64 do not overflow.
        let half_span = hi / 2.0 - lo / 2.0;
        let width = half_span / bins as f64 * 2.0;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                if i == bins {
                    hi
                } else {
                    let f = i as f64 / bins as f64;
                    lo * (1.0 - f) + hi * f
                }
            })
            .collect();

        let rows = self
            .rows()
            .map(|row| {
                let mut counts = vec![0.0; bins];
                let mut total = 0.0;
                for &v in row.iter().filter(|v| v.is_finite()) {
                    let position = (v / 2.0 - lo / 2.0) / half_span;
                    let bin = (position * bins as f64) as usize;
                    counts[bin.min(bins - 1)] += 1.0;
                    total += 1.0;
                }
                if density {
                    for c in &mut counts {
                        *c /= total * width;
                    }
                }
                counts
            })
            .collect();

        Ok(Histogram {
            edges,
            rows,
            density,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: Vec<Vec<f64>>) -> HistoryTable {
        HistoryTable::from_step_rows("x", rows).unwrap()
    }

    #[test]
    fn zero_bins_rejected() {
        let t = table(vec![vec![1.0]]);
        assert_eq!(
            t.histogram(0, false).unwrap_err(),
            StatsError::InvalidBins { bins: 0 }
        );
    }

    #[test]
    fn range_is_shared_across_steps() {
        let t = table(vec![vec![0.0, 1.0], vec![3.0, 4.0]]);
        let h = t.histogram(4, false).unwrap();
        assert_eq!(h.edges(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.step(0).unwrap(), &[1.0, 1.0, 0.0, 0.0]);
        // The global maximum falls in the last bin.
        assert_eq!(h.step(1).unwrap(), &[0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn single_bin_counts_every_trajectory() {
        let t = table(vec![vec![-3.0, 2.0, 7.0], vec![1.0, 1.0, 1.0]]);
        let h = t.histogram(1, false).unwrap();
        assert_eq!(h.rows(), &[vec![3.0], vec![3.0]]);
    }

    #[test]
    fn constant_table_widens_range() {
        let t = table(vec![vec![5.0, 5.0]]);
        let h = t.histogram(2, false).unwrap();
        assert_eq!(h.edges(), &[4.5, 5.0, 5.5]);
        assert_eq!(h.step(0).unwrap(), &[0.0, 2.0]);
    }

    #[test]
    fn density_rows_integrate_to_one() {
        let t = table(vec![vec![0.0, 1.0, 1.0, 2.0], vec![2.0, 2.0, 2.0, 0.0]]);
        let h = t.histogram(4, true).unwrap();
        assert!(h.is_density());
        let width = h.edges()[1] - h.edges()[0];
        for row in h.rows() {
            let area: f64 = row.iter().map(|d| d * width).sum();
            assert!((area - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn extreme_finite_range_keeps_edges_finite() {
        let t = table(vec![vec![-1e308, 1e308, 0.0]]);
        let h = t.histogram(2, false).unwrap();
        assert_eq!(h.edges(), &[-1e308, 0.0, 1e308]);
        assert_eq!(h.step(0).unwrap(), &[1.0, 2.0]);

        let t = table(vec![vec![-f64::MAX, f64::MAX], vec![f64::MAX, f64::MAX]]);
        let h = t.histogram(4, false).unwrap();
        assert!(h.edges().iter().all(|e| e.is_finite()));
        assert_eq!(h.edges()[0], -f64::MAX);
        assert_eq!(h.edges()[4], f64::MAX);
        assert_eq!(h.step(0).unwrap(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.step(1).unwrap(), &[0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let t = table(vec![vec![f64::NAN, f64::INFINITY], vec![1.0, 3.0]]);
        let counts = t.histogram(2, false).unwrap();
        assert_eq!(counts.edges(), &[1.0, 2.0, 3.0]);
        assert_eq!(counts.step(0).unwrap(), &[0.0, 0.0]);
        assert_eq!(counts.step(1).unwrap(), &[1.0, 1.0]);

        // Nothing to normalise in the first step.
        let density = t.histogram(2, true).unwrap();
        assert!(density.step(0).unwrap().iter().all(|d| d.is_nan()));
        assert_eq!(density.step(1).unwrap(), &[0.5, 0.5]);
    }

    proptest! {
        #[test]
        fn counts_sum_to_trajectory_count(
            rows in proptest::collection::vec(proptest::collection::vec(-50.0f64..50.0, 5), 1..8),
            bins in 1usize..20,
        ) {
            let t = table(rows);
            let h = t.histogram(bins, false).unwrap();
            prop_assert_eq!(h.bins(), bins);
            for row in h.rows() {
                prop_assert_eq!(row.iter().sum::<f64>(), 5.0);
            }
        }
    }
}
