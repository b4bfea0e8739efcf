//! Builds the three-panel chart description from a price table.
//!
//! Panel layout, top to bottom:
//! 1. price: candlestick plus overlay indicators (moving averages, bands)
//! 2. volume: one bar trace
//! 3. indicator: subplot indicators (oscillators and friends)

use shared::chart::{
    BandFill, ChartDescription, LineStyle, Panel, PanelKind, Series, TimeAxis, Trace, TraceKind,
};
use shared::models::{PriceTable, CLOSE, HIGH, LOW, OPEN, VOLUME};

use crate::config::ChartSettings;
use crate::error::ChartError;
use crate::indicators::{is_band_component, IndicatorSelection};

const CANDLESTICK_NAME: &str = "Candlestick";
const PRICE_AXIS_TITLE: &str = "Price";
const VOLUME_AXIS_TITLE: &str = "Volume";
const INDICATOR_AXIS_TITLE: &str = "Indicator value";
const TIME_AXIS_TITLE: &str = "Date";

/// Composes charts with the default settings.
pub fn compose<S: AsRef<str>>(table: &PriceTable, request: &[S]) -> Result<ChartDescription, ChartError> {
    ChartComposer::default().compose(table, request)
}

#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    settings: ChartSettings,
}

impl ChartComposer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    /// Fails only when an OHLCV column is missing. Requested indicators that
    /// are unknown or have no column are left out of the chart.
    pub fn compose<S: AsRef<str>>(&self, table: &PriceTable, request: &[S]) -> Result<ChartDescription, ChartError> {
        let missing = table.missing_required_columns();
        if !missing.is_empty() {
            return Err(ChartError::InvalidInput(format!(
                "table is missing required columns: {}",
                missing.join(", ")
            )));
        }

        let selection = IndicatorSelection::from_request(request);
        if !selection.ignored.is_empty() {
            tracing::debug!(ignored = ?selection.ignored, "Ignoring unclassified indicators");
        }

        let mut price_traces = vec![Trace {
            name: CANDLESTICK_NAME.to_string(),
            show_legend: true,
            kind: TraceKind::Candlestick {
                open: series(table, OPEN)?,
                high: series(table, HIGH)?,
                low: series(table, LOW)?,
                close: series(table, CLOSE)?,
            },
        }];
        price_traces.extend(self.overlay_traces(table, &selection.overlays));

        let volume_traces = vec![Trace {
            name: VOLUME.to_string(),
            show_legend: false,
            kind: TraceKind::Bar {
                y: series(table, VOLUME)?,
                marker_color: self.settings.volume_color,
            },
        }];

        let indicator_traces = self.subplot_traces(table, &selection.subplots);

        let [price_title, volume_title, indicator_title] = self.settings.subplot_titles.clone();
        let [price_height, volume_height, indicator_height] = self.settings.row_heights;

        let chart = ChartDescription {
            title: self.settings.title.clone(),
            height: self.settings.height,
            show_legend: self.settings.show_legend,
            vertical_spacing: self.settings.vertical_spacing,
            time_axis: TimeAxis {
                title: Some(TIME_AXIS_TITLE.to_string()),
                range_slider_visible: self.settings.range_slider_visible,
                values: table.index().to_vec(),
            },
            panels: vec![
                Panel {
                    kind: PanelKind::Price,
                    row: 1,
                    height_ratio: price_height,
                    subtitle: price_title,
                    value_axis_title: Some(PRICE_AXIS_TITLE.to_string()),
                    traces: price_traces,
                },
                Panel {
                    kind: PanelKind::Volume,
                    row: 2,
                    height_ratio: volume_height,
                    subtitle: volume_title,
                    value_axis_title: Some(VOLUME_AXIS_TITLE.to_string()),
                    traces: volume_traces,
                },
                Panel {
                    kind: PanelKind::Indicator,
                    row: 3,
                    height_ratio: indicator_height,
                    subtitle: indicator_title,
                    value_axis_title: Some(INDICATOR_AXIS_TITLE.to_string()),
                    traces: indicator_traces,
                },
            ],
        };

        tracing::info!(
            rows = table.len(),
            overlays = chart.panels[0].traces.len() - 1,
            subplots = chart.panels[2].traces.len(),
            "Composed chart"
        );
        Ok(chart)
    }

    fn overlay_traces(&self, table: &PriceTable, overlays: &[String]) -> Vec<Trace> {
        overlays
            .iter()
            .filter_map(|name| {
                let Some(column) = table.column(name) else {
                    tracing::debug!(indicator = %name, "Overlay indicator has no column, skipping");
                    return None;
                };
                let y = Series {
                    column: column.name.clone(),
                    values: column.values.clone(),
                };

                let kind = if is_band_component(name) {
                    TraceKind::Line {
                        y,
                        line: LineStyle {
                            width: Some(self.settings.band_line_width),
                            color: None,
                        },
                        fill: Some(BandFill {
                            color: self.settings.band_fill_color,
                        }),
                    }
                } else {
                    TraceKind::Line {
                        y,
                        line: LineStyle::default(),
                        fill: None,
                    }
                };

                Some(Trace {
                    name: name.clone(),
                    show_legend: true,
                    kind,
                })
            })
            .collect()
    }

    fn subplot_traces(&self, table: &PriceTable, subplots: &[String]) -> Vec<Trace> {
        subplots
            .iter()
            .filter_map(|name| {
                let Some(column) = table.column(name) else {
                    tracing::warn!(indicator = %name, "Subplot indicator requested but table has no such column, skipping");
                    return None;
                };

                Some(Trace {
                    name: name.clone(),
                    show_legend: true,
                    kind: TraceKind::Line {
                        y: Series {
                            column: column.name.clone(),
                            values: column.values.clone(),
                        },
                        line: LineStyle {
                            width: Some(self.settings.subplot_line_width),
                            color: Some(self.settings.subplot_line_color),
                        },
                        fill: None,
                    },
                })
            })
            .collect()
    }
}

fn series(table: &PriceTable, name: &str) -> Result<Series, ChartError> {
    let column = table
        .column(name)
        .ok_or_else(|| ChartError::InvalidInput(format!("table is missing required column: {}", name)))?;
    Ok(Series {
        column: column.name.clone(),
        values: column.values.clone(),
    })
}
