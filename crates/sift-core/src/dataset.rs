//! Columnar dataset model
//!
//! A [`Dataset`] keeps one array of columns per supported data type. Each
//! registered [`Metric`] records its position within the array of its own
//! type, so a Float metric's index is meaningless against the String columns
//! and vice versa.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DatasetError;
use crate::stats;

const MSG_FLOAT_MISMATCH: &str =
    "The given data is not of the type []float64 while the metric data type is float64";
const MSG_STRING_MISMATCH: &str =
    "The given data is not of the type []string while the metric data type is string";
const MSG_SIZE_MISMATCH: &str =
    "The no. of records provided in the metric mismatch to that of the dataset";
const MSG_VARIABLE_NOT_FOUND: &str = "Variables doesn't exist in the dataset";

/// Data type of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "float64")]
    Float,
    #[serde(rename = "string")]
    String,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Float => "float64",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float64" | "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            _ => Err(DatasetError::unsupported_data_type(format!(
                "Unsupported datatype. Got {}",
                s
            ))),
        }
    }
}

/// Descriptor of one column in a [`Dataset`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Unique key within the dataset
    pub name: String,
    /// Position within the column array of `data_type`, set on registration
    pub index: usize,
    pub data_type: DataType,
    /// Friendly name for display; raw column names are often cryptic
    pub display_name: Option<String>,
}

impl Metric {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            index: 0,
            data_type,
            display_name: None,
        }
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Float)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, DataType::String)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Display name, falling back to the metric name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Typed column values handed to [`Dataset::add_metric`]
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float(Vec<f64>),
    String(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(values) => values.len(),
            ColumnData::String(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Float(_) => DataType::Float,
            ColumnData::String(_) => DataType::String,
        }
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Float(values)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(values: Vec<String>) -> Self {
        ColumnData::String(values)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::String(values.into_iter().map(String::from).collect())
    }
}

/// Dataset stored in columnar form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    float_columns: Vec<Vec<f64>>,
    string_columns: Vec<Vec<String>>,
    metrics: BTreeMap<String, Metric>,
    /// Number of records, fixed by the first registered metric
    len: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric together with its column data
    ///
    /// The metric's `index` is assigned here; whatever the caller set is
    /// overwritten. Re-registering an existing name replaces the mapping and
    /// leaves the previous column orphaned in storage.
    pub fn add_metric(
        &mut self,
        mut metric: Metric,
        data: impl Into<ColumnData>,
    ) -> Result<(), DatasetError> {
        let data = data.into();
        let first = self.metrics.is_empty();

        match (metric.data_type, data) {
            (DataType::Float, ColumnData::Float(values)) => {
                self.check_len(first, values.len())?;
                self.float_columns.push(values);
                metric.index = self.float_columns.len() - 1;
            }
            (DataType::String, ColumnData::String(values)) => {
                self.check_len(first, values.len())?;
                self.string_columns.push(values);
                metric.index = self.string_columns.len() - 1;
            }
            (DataType::Float, _) => {
                return Err(DatasetError::data_type_mismatch(MSG_FLOAT_MISMATCH));
            }
            (DataType::String, _) => {
                return Err(DatasetError::data_type_mismatch(MSG_STRING_MISMATCH));
            }
        }

        if first {
            self.len = match metric.data_type {
                DataType::Float => self.float_columns[metric.index].len(),
                DataType::String => self.string_columns[metric.index].len(),
            };
        }

        if let Some(previous) = self.metrics.get(&metric.name) {
            warn!(
                metric = metric.name.as_str(),
                data_type = %previous.data_type,
                orphaned_index = previous.index,
                "Metric re-registered, previous column is no longer reachable"
            );
        }

        debug!(
            metric = metric.name.as_str(),
            data_type = %metric.data_type,
            index = metric.index,
            "Metric registered"
        );
        self.metrics.insert(metric.name.clone(), metric);
        Ok(())
    }

    fn check_len(&self, first: bool, len: usize) -> Result<(), DatasetError> {
        if !first && len != self.len {
            return Err(DatasetError::metric_size_mismatch(MSG_SIZE_MISMATCH));
        }
        Ok(())
    }

    /// Weighted correlation between two registered Float metrics
    ///
    /// Lookup and type errors are returned. A failure of the numeric routine
    /// itself, or a metric whose index no longer resolves to a column, is
    /// logged and yields a coefficient of 0.0.
    pub fn correlation(
        &self,
        var1: &str,
        var2: &str,
        weights: &[f64],
    ) -> Result<f64, DatasetError> {
        let (m1, m2) = match (self.metrics.get(var1), self.metrics.get(var2)) {
            (Some(m1), Some(m2)) => (m1, m2),
            _ => return Err(DatasetError::generic(MSG_VARIABLE_NOT_FOUND)),
        };

        if m1.data_type != m2.data_type {
            return Err(DatasetError::data_type_mismatch(format!(
                "Datatype mismatch Got {}({}) and {}({})",
                m1.name, m1.data_type, m2.name, m2.data_type
            )));
        }
        if m1.data_type != DataType::Float {
            return Err(DatasetError::unsupported_data_type(format!(
                "Only float64 datatype supported. Got {}",
                m1.data_type
            )));
        }

        let (x, y) = match (self.float_column(m1.index), self.float_column(m2.index)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                warn!(
                    var1,
                    var2,
                    index1 = m1.index,
                    index2 = m2.index,
                    columns = self.float_columns.len(),
                    "Metric index out of range, correlation defaults to zero"
                );
                return Ok(0.0);
            }
        };

        match stats::weighted_correlation(x, y, weights) {
            Ok(r) => Ok(r),
            Err(e) => {
                warn!(var1, var2, error = %e, "Correlation failed, defaulting to zero");
                Ok(0.0)
            }
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    /// Registered metrics, ordered by name
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Registered Float metrics, ordered by name
    pub fn float_metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics
            .values()
            .filter(|m| m.data_type == DataType::Float)
    }

    pub fn float_column(&self, index: usize) -> Option<&[f64]> {
        self.float_columns.get(index).map(Vec::as_slice)
    }

    pub fn string_column(&self, index: usize) -> Option<&[String]> {
        self.string_columns.get(index).map(Vec::as_slice)
    }

    /// Number of stored Float columns, including orphaned ones
    pub fn float_column_count(&self) -> usize {
        self.float_columns.len()
    }

    /// Number of stored String columns, including orphaned ones
    pub fn string_column_count(&self) -> usize {
        self.string_columns.len()
    }
}
