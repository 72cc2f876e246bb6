//! CSV Data Loader Module
//! Reads the observation CSV into typed rows using Polars.

use crate::data::{Dataset, Observation, METRICS};
use log::info;
use polars::prelude::*;
use std::sync::Arc;
use thiserror::Error;

/// Columns every source file must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "fips", "date", "PRECTOT", "T2M", "T2M_MAX", "T2M_MIN", "WS10M",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: missing or non-numeric value in column '{column}'")]
    MissingValue { column: String, row: usize },
    #[error("Row {row}: unparseable date")]
    BadDate { row: usize },
}

/// Loads the observation CSV with Polars. A load either yields the complete
/// typed dataset or fails; there is no partial result and no retry.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and extract typed observation rows in file order.
    pub fn load_csv(file_path: &str) -> Result<Dataset, LoaderError> {
        // fips is a categorical key; forcing String keeps leading zeros.
        let fips_schema = Schema::from_iter([Field::new("fips".into(), DataType::String)]);

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_try_parse_dates(true)
            .with_dtype_overwrite(Some(Arc::new(fips_schema)))
            .finish()?
            .collect()?;

        let columns = df.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let fips_col = df.column("fips")?.cast(&DataType::String)?;
        let fips_ca = fips_col.str()?;

        let date_col = df.column("date")?.cast(&DataType::Date)?;
        let dates: Vec<Option<chrono::NaiveDate>> = date_col.date()?.as_date_iter().collect();

        // One Float64 column per metric, in METRICS order.
        let mut metric_cols = Vec::with_capacity(METRICS.len());
        for metric in METRICS {
            let cast = df.column(metric.column())?.cast(&DataType::Float64)?;
            metric_cols.push(cast);
        }

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let fips = fips_ca
                .get(i)
                .ok_or_else(|| LoaderError::MissingValue {
                    column: "fips".to_string(),
                    row: i,
                })?
                .to_string();

            let date = dates
                .get(i)
                .copied()
                .flatten()
                .ok_or(LoaderError::BadDate { row: i })?;

            let mut values = [0.0f64; 5];
            for (slot, (metric, col)) in values
                .iter_mut()
                .zip(METRICS.iter().zip(metric_cols.iter()))
            {
                *slot = col
                    .f64()?
                    .get(i)
                    .ok_or_else(|| LoaderError::MissingValue {
                        column: metric.column().to_string(),
                        row: i,
                    })?;
            }

            rows.push(Observation {
                fips,
                date,
                prectot: values[0],
                t2m: values[1],
                t2m_max: values[2],
                t2m_min: values[3],
                ws10m: values[4],
            });
        }

        info!("loaded {} rows from {}", rows.len(), file_path);
        Ok(Dataset::new(rows))
    }
}
