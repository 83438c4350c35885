#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Declarative chart descriptions.
//!
//! These types serialize to the JSON figure format understood by
//! `Plotly.react` in the browser: a list of traces plus a layout. They carry
//! no reference back to the dataset they were computed from.

use serde::{Deserialize, Serialize};

/// A complete chart: series data plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Series to draw.
    pub data: Vec<Trace>,
    /// Title, axes, colours, and legend.
    pub layout: Layout,
}

/// One series of a [`Figure`], tagged with its Plotly chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Line chart over (x, y) pairs.
    Scatter(LineTrace),
    /// Ring/donut chart over (label, value) pairs.
    Pie(PieTrace),
}

/// Line series. `null` y-values are drawn as gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    /// X values (ISO dates).
    pub x: Vec<String>,
    /// Y values; `None` where the statistic is undefined.
    pub y: Vec<Option<f64>>,
    /// Drawing mode, e.g. `"lines"`.
    pub mode: String,
    /// Hover label template.
    pub hovertemplate: String,
}

/// Proportion series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    /// Slice labels.
    pub labels: Vec<String>,
    /// Slice values.
    pub values: Vec<u64>,
    /// Relative size of the centre hole; `0.0` for a plain pie.
    pub hole: f64,
    /// Hover content, e.g. `"label+percent"`.
    pub hoverinfo: String,
    /// Text drawn on each slice, e.g. `"value+percent"`.
    pub textinfo: String,
}

/// Horizontal or vertical anchor of a positioned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Center,
    Right,
    Top,
    Bottom,
}

/// Legend orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Horizontal.
    #[serde(rename = "h")]
    Horizontal,
    /// Vertical.
    #[serde(rename = "v")]
    Vertical,
}

/// Chart title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Title text.
    pub text: String,
    /// Horizontal position in paper coordinates (0 to 1).
    pub x: f64,
    /// Which side of the title sits at `x`.
    pub xanchor: Anchor,
}

/// Axis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Disables zoom and pan when `true`.
    pub fixedrange: bool,
}

/// Legend placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub orientation: Orientation,
    pub yanchor: Anchor,
    pub y: f64,
    pub xanchor: Anchor,
    pub x: f64,
}

/// Figure layout. Unset options are omitted from the JSON so Plotly falls
/// back to its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Chart title.
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Colours cycled through by the traces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorway: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    /// A layout with only a title set.
    #[must_use]
    pub const fn titled(title: Title) -> Self {
        Self {
            title,
            xaxis: None,
            yaxis: None,
            colorway: None,
            showlegend: None,
            legend: None,
        }
    }
}
