// Chart engine library root

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod indicators;
pub mod validation;

pub use chart::{compose, ChartComposer};
pub use config::ChartSettings;
pub use error::ChartError;
pub use export::{export_csv, DownloadHost, DownloadRequest};
pub use validation::{validate_parameters, ErrorDisplay};
