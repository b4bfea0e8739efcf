//! Renderer-agnostic chart description.
//!
//! The engine builds these; a rendering surface only has to draw them. Every
//! type serialises with serde so the description can be shipped as JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::TimeKey;

/// CSS-style colour, serialised as `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("expected rgba(r, g, b, a), got '{}'", s))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 components in '{}'", s));
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|e| format!("bad channel '{}' in '{}': {}", p, s, e));
        let alpha = parts[3]
            .parse::<f32>()
            .map_err(|e| format!("bad alpha '{}' in '{}': {}", parts[3], s, e))?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(format!("alpha out of range in '{}'", s));
        }

        Ok(Rgba::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Price,
    Volume,
    Indicator,
}

/// Values of one table column as referenced by a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub column: String,
    pub values: Vec<Option<f64>>,
}

/// `None` fields leave the choice to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: Option<f64>,
    pub color: Option<Rgba>,
}

/// Shading between a line and the trace drawn before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandFill {
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceKind {
    Candlestick {
        open: Series,
        high: Series,
        low: Series,
        close: Series,
    },
    Line {
        y: Series,
        line: LineStyle,
        fill: Option<BandFill>,
    },
    Bar {
        y: Series,
        marker_color: Rgba,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub show_legend: bool,
    #[serde(flatten)]
    pub kind: TraceKind,
}

impl Trace {
    pub fn is_line(&self) -> bool {
        matches!(self.kind, TraceKind::Line { .. })
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.kind, TraceKind::Line { fill: Some(_), .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    /// 1-based, top to bottom.
    pub row: usize,
    pub height_ratio: f64,
    pub subtitle: String,
    pub value_axis_title: Option<String>,
    pub traces: Vec<Trace>,
}

impl Panel {
    pub fn trace_names(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Horizontal axis shared by every panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub title: Option<String>,
    pub range_slider_visible: bool,
    pub values: Vec<TimeKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub title: String,
    pub height: u32,
    pub show_legend: bool,
    pub vertical_spacing: f64,
    pub time_axis: TimeAxis,
    pub panels: Vec<Panel>,
}

impl ChartDescription {
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    pub fn trace_count(&self) -> usize {
        self.panels.iter().map(|p| p.traces.len()).sum()
    }
}
