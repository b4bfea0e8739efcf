// Chart composition: price table + indicator request -> chart description
pub mod composer;

pub use composer::{compose, ChartComposer};
