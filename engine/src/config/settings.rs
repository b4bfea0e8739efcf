// Chart layout and styling, loadable from the front end's JSON config
use serde::{Deserialize, Serialize};
use shared::chart::Rgba;

use crate::error::ChartError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub height: u32,
    /// Price, volume, indicator.
    pub row_heights: [f64; 3],
    pub vertical_spacing: f64,
    pub subplot_titles: [String; 3],
    pub show_legend: bool,
    pub range_slider_visible: bool,
    pub band_fill_color: Rgba,
    pub band_line_width: f64,
    pub volume_color: Rgba,
    pub subplot_line_color: Rgba,
    pub subplot_line_width: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            title: "Stock Chart with Technical Indicators".to_string(),
            height: 800,
            row_heights: [0.6, 0.2, 0.2],
            vertical_spacing: 0.05,
            subplot_titles: [
                "CandleStick Chart".to_string(),
                "Volume".to_string(),
                "Indicators".to_string(),
            ],
            show_legend: true,
            range_slider_visible: false,
            band_fill_color: Rgba::new(173, 216, 230, 0.5),
            band_line_width: 1.5,
            volume_color: Rgba::new(0, 0, 255, 0.5),
            subplot_line_color: Rgba::new(255, 0, 0, 0.7),
            subplot_line_width: 1.5,
        }
    }
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.height == 0 {
            return Err(ChartError::ConfigError("height must be greater than 0".to_string()));
        }

        if self.row_heights.iter().any(|h| !h.is_finite() || *h < 0.0) {
            return Err(ChartError::ConfigError(format!(
                "row heights must be finite and non-negative, got {:?}",
                self.row_heights
            )));
        }
        if self.row_heights.iter().sum::<f64>() <= 0.0 {
            return Err(ChartError::ConfigError("row heights must not all be zero".to_string()));
        }

        if !(0.0..1.0).contains(&self.vertical_spacing) {
            return Err(ChartError::ConfigError(format!(
                "vertical spacing must be in [0, 1), got {}",
                self.vertical_spacing
            )));
        }

        for (name, width) in [
            ("band_line_width", self.band_line_width),
            ("subplot_line_width", self.subplot_line_width),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::ConfigError(format!("{} must be positive, got {}", name, width)));
            }
        }

        Ok(())
    }
}
