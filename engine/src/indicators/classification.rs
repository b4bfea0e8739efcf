// Fixed split of known indicator names between the price panel and the indicator panel.
use serde::Serialize;

pub const OVERLAY_INDICATORS: [&str; 6] = ["SMA", "EMA", "WMA", "BB_Upper", "BB_Lower", "BB_Mid"];

pub const SUBPLOT_INDICATORS: [&str; 9] = [
    "RSI",
    "MACD",
    "MACD_Signal",
    "MACD_Hist",
    "Stoch_K",
    "Stoch_D",
    "ATR",
    "OBV",
    "CMF",
];

const BAND_PREFIX: &str = "BB_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorTarget {
    /// Drawn on the price panel.
    Overlay,
    /// Drawn on the indicator panel.
    Subplot,
    /// Never drawn.
    Unknown,
}

/// Exact, case-sensitive lookup.
pub fn classify(name: &str) -> IndicatorTarget {
    if OVERLAY_INDICATORS.contains(&name) {
        IndicatorTarget::Overlay
    } else if SUBPLOT_INDICATORS.contains(&name) {
        IndicatorTarget::Subplot
    } else {
        IndicatorTarget::Unknown
    }
}

/// Bollinger band components are shaded against the previous line.
pub fn is_band_component(name: &str) -> bool {
    name.starts_with(BAND_PREFIX)
}

/// A request split by target, deduplicated, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorSelection {
    pub overlays: Vec<String>,
    pub subplots: Vec<String>,
    pub ignored: Vec<String>,
}

impl IndicatorSelection {
    pub fn from_request<S: AsRef<str>>(request: &[S]) -> Self {
        let mut selection = IndicatorSelection::default();

        for name in request.iter().map(AsRef::as_ref) {
            let bucket = match classify(name) {
                IndicatorTarget::Overlay => &mut selection.overlays,
                IndicatorTarget::Subplot => &mut selection.subplots,
                IndicatorTarget::Unknown => &mut selection.ignored,
            };
            if !bucket.iter().any(|existing| existing == name) {
                bucket.push(name.to_string());
            }
        }

        selection
    }
}
