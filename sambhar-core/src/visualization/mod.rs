//! Chart specifications for profiled datasets.
//!
//! Charts are described, never rendered: each [`VisualizationArtifact`] is a
//! Plotly-compatible `{data, layout}` pair whose every leaf is JSON-safe.
//!
//! Two entry points share the chart builders in [`charts`]:
//!
//! - [`VisualizationGenerator`] emits every chart the dataset qualifies for.
//! - [`VisualizationDispatcher`] validates and builds one requested chart.
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::classifier::ColumnClassification;
//! use sambhar_core::config::ProfilerConfig;
//! use sambhar_core::dataset::{Column, Dataset};
//! use sambhar_core::visualization::VisualizationGenerator;
//!
//! let dataset = Dataset::builder()
//!     .column(Column::floats("price", &[Some(1.0), Some(2.5), Some(4.0)]))
//!     .column(Column::texts("city", &[Some("Pune"), Some("Delhi"), Some("Pune")]))
//!     .build()
//!     .unwrap();
//! let classification = ColumnClassification::classify(&dataset);
//! let config = ProfilerConfig::default();
//!
//! let charts = VisualizationGenerator::new(&dataset, &classification, &config)
//!     .generate_visualizations()
//!     .unwrap();
//!
//! assert!(charts.contains_key("price_histogram"));
//! assert!(charts.contains_key("city_bar"));
//! assert!(!charts.contains_key("correlation_heatmap"));
//! ```

pub mod charts;
mod dispatcher;
mod generator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::serializer::{RawValue, Serializer};

pub use dispatcher::VisualizationDispatcher;
pub use generator::VisualizationGenerator;

/// A chart specification: ordered trace descriptors plus a layout mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationArtifact {
    pub data: Vec<JsonValue>,
    pub layout: JsonValue,
}

impl VisualizationArtifact {
    /// Normalizes raw traces and layout into JSON-safe form.
    pub fn from_raw(serializer: &Serializer, traces: Vec<RawValue>, layout: RawValue) -> Self {
        Self {
            data: traces
                .iter()
                .map(|trace| serializer.ensure_serializable(trace))
                .collect(),
            layout: serializer.ensure_serializable(&layout),
        }
    }

    /// The `type` of the first trace, e.g. `"histogram"`.
    pub fn trace_type(&self) -> Option<&str> {
        self.data.first()?.get("type")?.as_str()
    }
}

/// Chart kinds accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VizType {
    Histogram,
    Bar,
    Line,
    Correlation,
}

impl VizType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VizType::Histogram => "histogram",
            VizType::Bar => "bar",
            VizType::Line => "line",
            VizType::Correlation => "correlation",
        }
    }

    /// Whether the chart is built from a single named column.
    pub fn requires_column(&self) -> bool {
        !matches!(self, VizType::Correlation)
    }
}

impl FromStr for VizType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "histogram" => Ok(VizType::Histogram),
            "bar" => Ok(VizType::Bar),
            "line" => Ok(VizType::Line),
            "correlation" => Ok(VizType::Correlation),
            other => Err(Error::invalid_argument(format!(
                "Unsupported visualization type: {other}"
            ))),
        }
    }
}

impl fmt::Display for VizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
