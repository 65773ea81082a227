//! # sheetview-viz
//!
//! Chart projection for sheetview.
//!
//! This crate derives a labeled numeric series from the displayed matrix and
//! wraps it in chart specifications that a rendering layer can draw:
//! - Pie chart with one colour per slice
//! - Bar chart with a single dataset colour

mod error;
mod projector;

pub use error::{VizError, VizResult};
pub use projector::{
    project, ChartConfig, ChartEligibility, ChartSeries, DEFAULT_CHART_CATEGORY,
    DEFAULT_CHART_TITLE,
};

use serde::{Deserialize, Serialize};

/// Slice colours for pie charts, cycled by the renderer.
pub const PIE_PALETTE: [&str; 7] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#C9CBCF",
];

/// Fill colour for bar datasets.
pub const BAR_COLOR: &str = "#36A2EB";

/// Chart specification for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartKind,
    pub title: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Chart type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A dataset in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub background_color: Vec<String>,
}

/// Chart rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub show_legend: bool,
    pub show_title: bool,
    pub begin_at_zero: bool,
}

impl ChartSpec {
    /// Create a new chart specification with no data.
    #[must_use]
    pub fn new(chart_type: ChartKind, title: impl Into<String>) -> Self {
        Self {
            chart_type,
            title: title.into(),
            data: ChartData {
                labels: Vec::new(),
                datasets: Vec::new(),
            },
            options: ChartOptions {
                show_legend: true,
                show_title: true,
                begin_at_zero: chart_type == ChartKind::Bar,
            },
        }
    }

    /// Convert to JSON string for the rendering layer.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ChartSeries {
    /// Wrap the series in a chart of the given kind.
    #[must_use]
    pub fn to_chart_spec(&self, kind: ChartKind) -> ChartSpec {
        let background_color = match kind {
            ChartKind::Pie => PIE_PALETTE.iter().map(ToString::to_string).collect(),
            ChartKind::Bar => vec![BAR_COLOR.to_string()],
        };
        let mut spec = ChartSpec::new(kind, self.title.clone());
        spec.data.labels.clone_from(&self.labels);
        spec.data.datasets.push(Dataset {
            label: self.title.clone(),
            data: self.values.clone(),
            background_color,
        });
        spec
    }
}
