//! Visualization descriptors
//!
//! Nothing here renders anything. A descriptor states what a renderer needs
//! to draw a finding: which metrics go on which axis, a title and description,
//! and the rows to plot.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataset::DataType;

/// One plotted record, keyed by metric name
pub type Row = Map<String, Value>;

/// Kinds of visualization that can be described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualType {
    #[serde(rename = "SCATTERPLOT")]
    ScatterPlot,
}

impl VisualType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualType::ScatterPlot => "SCATTERPLOT",
        }
    }
}

impl fmt::Display for VisualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a metric within a visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualMetric {
    pub name: String,
    pub display_name: String,
    pub data_type: DataType,
    /// Axis the metric is drawn on: 0 for x, 1 for y
    pub dimension: u8,
    /// Prefix for displayed values, e.g. "$"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_unit: Option<String>,
    /// Suffix for displayed values, e.g. "C"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_unit: Option<String>,
}

impl VisualMetric {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        data_type: DataType,
        dimension: u8,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            data_type,
            dimension,
            pre_unit: None,
            post_unit: None,
        }
    }

    pub fn with_units(mut self, pre: Option<String>, post: Option<String>) -> Self {
        self.pre_unit = pre;
        self.post_unit = post;
        self
    }

    /// Format a value with the configured units
    pub fn format_value(&self, value: &Value) -> String {
        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!(
            "{}{}{}",
            self.pre_unit.as_deref().unwrap_or(""),
            raw,
            self.post_unit.as_deref().unwrap_or("")
        )
    }
}

/// Scatter plot of two continuous variables, typically used for correlations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub metrics: Vec<VisualMetric>,
    pub title: String,
    pub description: String,
    pub data: Vec<Row>,
}

/// A visualization descriptor handed to an external renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Visualization {
    #[serde(rename = "SCATTERPLOT")]
    ScatterPlot(ScatterPlot),
}

impl Visualization {
    pub fn visual_type(&self) -> VisualType {
        match self {
            Visualization::ScatterPlot(_) => VisualType::ScatterPlot,
        }
    }

    pub fn metrics(&self) -> &[VisualMetric] {
        match self {
            Visualization::ScatterPlot(s) => &s.metrics,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Visualization::ScatterPlot(s) => &s.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Visualization::ScatterPlot(s) => &s.description,
        }
    }

    pub fn data(&self) -> &[Row] {
        match self {
            Visualization::ScatterPlot(s) => &s.data,
        }
    }
}

impl From<ScatterPlot> for Visualization {
    fn from(plot: ScatterPlot) -> Self {
        Visualization::ScatterPlot(plot)
    }
}
