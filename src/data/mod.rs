//! Data module - CSV loading, typed rows and filtering

mod dataset;
mod filter;
mod loader;

pub use dataset::{date_from_days, days_from_epoch, Dataset, Metric, Observation, METRICS};
pub use filter::FilterState;
pub use loader::{DataLoader, LoaderError};
