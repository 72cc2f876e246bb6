//! Filter Module
//! Narrows the dataset by location set and inclusive date interval.

use crate::data::{Dataset, Metric, Observation};
use chrono::NaiveDate;

/// Current filter selections, rebuilt from widget values each render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub fips: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub metric: Metric,
}

impl FilterState {
    /// Default selections for a freshly loaded dataset: first five distinct
    /// locations, the full observed date span, the first metric.
    pub fn defaults(dataset: &Dataset) -> Option<Self> {
        let (start, end) = dataset.date_bounds()?;
        Some(Self {
            fips: dataset.default_fips(),
            start,
            end,
            metric: Metric::default(),
        })
    }

    fn matches(&self, row: &Observation) -> bool {
        self.fips.iter().any(|f| f == &row.fips)
            && row.date >= self.start
            && row.date <= self.end
    }

    /// Rows with `fips` in the selected set and `date` in `[start, end]`,
    /// in dataset order. An empty set or an inverted interval yields an
    /// empty view, never an error.
    pub fn apply(&self, rows: &[Observation]) -> Vec<Observation> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
