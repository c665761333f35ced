//! Sift Core Library
//!
//! Automatic discovery of notable relationships in tabular data:
//! - Columnar dataset model with typed metrics
//! - Weighted correlation primitives
//! - Insight pipeline (propose → screen → generate → filter)
//! - Visualization descriptors for an external renderer
//! - CSV import and TOML pipeline configuration

pub mod config;
pub mod dataset;
pub mod error;
pub mod import;
pub mod insights;
pub mod stats;
pub mod visualization;

pub use config::PipelineConfig;
pub use dataset::{ColumnData, DataType, Dataset, Metric};
pub use error::{DatasetError, Error, ErrorCode, Result};
pub use import::{load_csv, load_csv_file, ImportOptions};
pub use insights::{
    generate_insights, propose, CorrelationInsight, Insight, InsightEngine, InsightType,
    ProposedInsight,
};
pub use visualization::{ScatterPlot, VisualMetric, VisualType, Visualization};
