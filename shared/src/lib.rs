// Data models shared by the chart engine and the front end.
pub mod chart;
pub mod models;
pub mod utils;

pub use chart::{ChartDescription, PanelKind, Rgba};
pub use models::{PriceTable, TableError, TimeKey};
