//! Dataset Types
//! Typed rows, metric enumeration and derived accessors over the loaded table.

use chrono::NaiveDate;

/// Number of locations selected by default after a load.
pub const DEFAULT_FIPS_COUNT: usize = 5;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date")
}

/// Days since 1970-01-01, the numeric form dates take on sliders and plot axes.
pub fn days_from_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch()).num_days()
}

/// Inverse of [`days_from_epoch`]; `None` outside chrono's representable range.
pub fn date_from_days(days: i64) -> Option<NaiveDate> {
    epoch().checked_add_signed(chrono::Duration::days(days))
}

/// One observation row: a location, a date and the five climate metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub fips: String,
    pub date: NaiveDate,
    pub prectot: f64,
    pub t2m: f64,
    pub t2m_max: f64,
    pub t2m_min: f64,
    pub ws10m: f64,
}

impl Observation {
    /// Value of the given metric for this row.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Prectot => self.prectot,
            Metric::T2m => self.t2m,
            Metric::T2mMax => self.t2m_max,
            Metric::T2mMin => self.t2m_min,
            Metric::Ws10m => self.ws10m,
        }
    }
}

/// Selectable climate metric. Order matters: the first entry is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Prectot,
    T2m,
    T2mMax,
    T2mMin,
    Ws10m,
}

/// All metrics in selection order.
pub const METRICS: [Metric; 5] = [
    Metric::Prectot,
    Metric::T2m,
    Metric::T2mMax,
    Metric::T2mMin,
    Metric::Ws10m,
];

impl Default for Metric {
    fn default() -> Self {
        METRICS[0]
    }
}

impl Metric {
    /// CSV column name.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Prectot => "PRECTOT",
            Metric::T2m => "T2M",
            Metric::T2mMax => "T2M_MAX",
            Metric::T2mMin => "T2M_MIN",
            Metric::Ws10m => "WS10M",
        }
    }

    /// Human-readable label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Prectot => "Precipitation",
            Metric::T2m => "Mean Temperature",
            Metric::T2mMax => "Max Temperature",
            Metric::T2mMin => "Min Temperature",
            Metric::Ws10m => "Wind Speed at 10m",
        }
    }
}

/// The full loaded dataset. Rows stay in file-encounter order and are never
/// mutated after load; the app shares this behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct fips codes in file-encounter order.
    pub fn unique_fips(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|f| f == &row.fips) {
                seen.push(row.fips.clone());
            }
        }
        seen
    }

    /// The first `DEFAULT_FIPS_COUNT` distinct fips codes in encounter order.
    pub fn default_fips(&self) -> Vec<String> {
        let mut fips = self.unique_fips();
        fips.truncate(DEFAULT_FIPS_COUNT);
        fips
    }

    /// Observed min/max date over all rows, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(fips: &str, date: NaiveDate, t2m: f64) -> Observation {
        Observation {
            fips: fips.to_string(),
            date,
            prectot: 0.0,
            t2m,
            t2m_max: 0.0,
            t2m_min: 0.0,
            ws10m: 0.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unique_fips_encounter_order() {
        let ds = Dataset::new(vec![
            obs("06037", date(2020, 1, 1), 1.0),
            obs("06037", date(2020, 1, 2), 2.0),
            obs("01001", date(2020, 1, 1), 3.0),
            obs("06037", date(2020, 1, 3), 4.0),
            obs("48201", date(2020, 1, 1), 5.0),
        ]);
        assert_eq!(ds.unique_fips(), vec!["06037", "01001", "48201"]);
    }

    #[test]
    fn test_default_fips_first_five() {
        let rows: Vec<Observation> = (0..8)
            .map(|i| obs(&format!("{:05}", i), date(2020, 1, 1), 0.0))
            .collect();
        let ds = Dataset::new(rows);
        let defaults = ds.default_fips();
        assert_eq!(
            defaults,
            vec!["00000", "00001", "00002", "00003", "00004"]
        );
    }

    #[test]
    fn test_default_fips_fewer_than_five() {
        let ds = Dataset::new(vec![
            obs("A", date(2020, 1, 1), 0.0),
            obs("B", date(2020, 1, 2), 0.0),
        ]);
        assert_eq!(ds.default_fips(), vec!["A", "B"]);
    }

    #[test]
    fn test_date_bounds() {
        let ds = Dataset::new(vec![
            obs("A", date(2020, 3, 15), 0.0),
            obs("A", date(2019, 12, 31), 0.0),
            obs("B", date(2021, 6, 1), 0.0),
        ]);
        assert_eq!(ds.date_bounds(), Some((date(2019, 12, 31), date(2021, 6, 1))));
    }

    #[test]
    fn test_date_bounds_empty() {
        assert_eq!(Dataset::default().date_bounds(), None);
    }

    #[test]
    fn test_metric_order_and_default() {
        assert_eq!(Metric::default(), Metric::Prectot);
        let columns: Vec<&str> = METRICS.iter().map(|m| m.column()).collect();
        assert_eq!(columns, vec!["PRECTOT", "T2M", "T2M_MAX", "T2M_MIN", "WS10M"]);
    }

    #[test]
    fn test_day_offset_round_trip() {
        let d = date(2020, 2, 29);
        assert_eq!(date_from_days(days_from_epoch(d)), Some(d));
        assert_eq!(days_from_epoch(date(1970, 1, 1)), 0);
        assert_eq!(days_from_epoch(date(1969, 12, 31)), -1);
    }

    #[test]
    fn test_observation_metric_value() {
        let mut row = obs("A", date(2020, 1, 1), 12.5);
        row.prectot = 3.25;
        assert_eq!(row.value(Metric::T2m), 12.5);
        assert_eq!(row.value(Metric::Prectot), 3.25);
    }
}
