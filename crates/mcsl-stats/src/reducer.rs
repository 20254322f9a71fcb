//! Named reductions over any [`HistorySource`].

use mcsl_core::HistorySource;

use crate::error::StatsError;
use crate::histogram::Histogram;
use crate::reduce::{Axis, Reduced, Statistic};
use crate::table::HistoryTable;

/// Borrowing front end that looks variables up by name.
///
/// Each call builds a fresh [`HistoryTable`] from the source. Callers
/// computing several statistics over one variable can build the table
/// once with [`table()`](Self::table) and reduce it directly.
pub struct StatisticsReducer<'a, H: HistorySource + ?Sized> {
    source: &'a H,
}

impl<H: HistorySource + ?Sized> Clone for StatisticsReducer<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: HistorySource + ?Sized> Copy for StatisticsReducer<'_, H> {}

impl<'a, H: HistorySource + ?Sized> StatisticsReducer<'a, H> {
    /// Wrap a history source.
    pub fn new(source: &'a H) -> Self {
        Self { source }
    }

    /// Read one variable into a dense table.
    pub fn table(&self, name: &str) -> Result<HistoryTable, StatsError> {
        HistoryTable::from_source(self.source, name)
    }

    /// Apply `statistic` to variable `name` along `axis`.
    pub fn reduce(&self, name: &str, statistic: Statistic, axis: Axis) -> Result<Reduced, StatsError> {
        Ok(self.table(name)?.reduce(statistic, axis))
    }

    /// Arithmetic mean.
    pub fn mean(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Mean, axis)
    }

    /// Median.
    pub fn median(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Median, axis)
    }

    /// Population variance.
    pub fn variance(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Variance, axis)
    }

    /// Population standard deviation.
    pub fn std(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::StdDev, axis)
    }

    /// Minimum.
    pub fn min(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Min, axis)
    }

    /// Maximum.
    pub fn max(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Max, axis)
    }

    /// Sum.
    pub fn sum(&self, name: &str, axis: Axis) -> Result<Reduced, StatsError> {
        self.reduce(name, Statistic::Sum, axis)
    }

    /// Per-step histogram of `name` over the shared global range.
    pub fn histogram(&self, name: &str, bins: usize, density: bool) -> Result<Histogram, StatsError> {
        self.table(name)?.histogram(bins, density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcsl_core::ValueKind;
    use mcsl_test_utils::MockHistory;

    fn walk() -> MockHistory {
        let mut mock = MockHistory::integer("x", 3);
        mock.push_trajectory(&[1, 2, 3]);
        mock.push_trajectory(&[-1, 0, -1]);
        mock
    }

    #[test]
    fn convenience_methods_match_reduce() {
        let mock = walk();
        let reducer = StatisticsReducer::new(&mock);
        assert_eq!(
            reducer.mean("x", Axis::PerStep).unwrap(),
            Reduced::Series(vec![0.0, 1.0, 1.0])
        );
        assert_eq!(
            reducer.sum("x", Axis::PerTrajectory).unwrap(),
            Reduced::Series(vec![6.0, -2.0])
        );
        assert_eq!(reducer.min("x", Axis::Scalar).unwrap(), Reduced::Scalar(-1.0));
        assert_eq!(reducer.max("x", Axis::Scalar).unwrap(), Reduced::Scalar(3.0));
        assert_eq!(
            reducer.median("x", Axis::PerStep).unwrap(),
            reducer.mean("x", Axis::PerStep).unwrap()
        );
        assert_eq!(
            reducer.variance("x", Axis::PerStep).unwrap(),
            Reduced::Series(vec![1.0, 1.0, 4.0])
        );
        assert_eq!(
            reducer.std("x", Axis::PerStep).unwrap(),
            Reduced::Series(vec![1.0, 1.0, 2.0])
        );
    }

    #[test]
    fn errors_surface_from_lookup() {
        let mock = MockHistory::new("label", ValueKind::Text, 2);
        let reducer = StatisticsReducer::new(&mock);
        assert!(matches!(
            reducer.mean("label", Axis::Scalar),
            Err(StatsError::UnsupportedType { .. })
        ));
        assert!(matches!(
            reducer.histogram("nope", 3, false),
            Err(StatsError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn histogram_over_source() {
        let mock = walk();
        let h = StatisticsReducer::new(&mock).histogram("x", 1, false).unwrap();
        assert_eq!(h.rows(), &[vec![2.0], vec![2.0], vec![2.0]]);
        assert_eq!(h.edges(), &[-1.0, 3.0]);
    }
}
