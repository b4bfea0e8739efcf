// Technical indicators module
// Values arrive precomputed as table columns; this module only decides where they are drawn.
pub mod classification;

pub use classification::{classify, is_band_component, IndicatorSelection, IndicatorTarget};
