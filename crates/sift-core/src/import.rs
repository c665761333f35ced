//! CSV import into a columnar [`Dataset`]
//!
//! Every column whose non-empty cells all parse as numbers becomes a Float
//! metric; anything else becomes a String metric. Explicit type overrides
//! take precedence over inference.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::dataset::{ColumnData, DataType, Dataset, Metric};
use crate::error::{Error, Result};

/// Options for reading a CSV file into a dataset
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Forced data types by column header
    pub types: HashMap<String, DataType>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            types: HashMap::new(),
        }
    }
}

impl ImportOptions {
    pub fn with_type(mut self, column: impl Into<String>, data_type: DataType) -> Self {
        self.types.insert(column.into(), data_type);
        self
    }

    /// Parse `column=type` overrides, e.g. `zip=string`
    pub fn parse_type_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        for entry in overrides {
            let (column, tag) = entry.split_once('=').ok_or_else(|| {
                Error::InvalidData(format!("Expected column=type, got '{}'", entry))
            })?;
            let data_type: DataType = tag.trim().parse()?;
            self.types.insert(column.trim().to_string(), data_type);
        }
        Ok(self)
    }
}

/// Read a CSV file into a dataset
pub fn load_csv_file(path: &Path, options: &ImportOptions) -> Result<Dataset> {
    let file = File::open(path)?;
    load_csv(file, options)
}

/// Read CSV data into a dataset
///
/// The header row supplies metric names and display names.
pub fn load_csv<R: Read>(reader: R, options: &ImportOptions) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::Import("CSV has no header row".into()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            column.push(value.to_string());
        }
    }

    let mut dataset = Dataset::new();
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (header, values) in headers.iter().zip(cells) {
        if header.is_empty() {
            return Err(Error::Import("Empty column header".into()));
        }

        let name = metric_name(header);
        if let Some(previous) = seen.insert(name.clone(), header) {
            return Err(Error::Import(format!(
                "Columns '{}' and '{}' both map to metric '{}'",
                previous, header, name
            )));
        }

        let data_type = options
            .types
            .get(header)
            .copied()
            .unwrap_or_else(|| infer_type(&values));
        let data = column_data(header, data_type, values)?;

        debug!(column = header, data_type = %data_type, "Column imported");
        let metric = Metric::new(name, data_type).with_display_name(header);
        dataset.add_metric(metric, data)?;
    }

    Ok(dataset)
}

/// Metric key for a header: lowercase with runs of non-alphanumerics as `_`
fn metric_name(header: &str) -> String {
    let mut name = String::with_capacity(header.len());
    for c in header.chars() {
        if c.is_alphanumeric() {
            name.extend(c.to_lowercase());
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let trimmed = name.trim_matches('_');
    if trimmed.is_empty() {
        header.to_string()
    } else {
        trimmed.to_string()
    }
}

fn infer_type(values: &[String]) -> DataType {
    let mut seen = false;
    for value in values.iter().filter(|v| !v.is_empty()) {
        if value.parse::<f64>().is_err() {
            return DataType::String;
        }
        seen = true;
    }
    if seen {
        DataType::Float
    } else {
        DataType::String
    }
}

fn column_data(header: &str, data_type: DataType, values: Vec<String>) -> Result<ColumnData> {
    match data_type {
        DataType::String => Ok(ColumnData::String(values)),
        DataType::Float => values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                if value.is_empty() {
                    // Missing numbers poison the correlation instead of biasing it
                    return Ok(f64::NAN);
                }
                value.parse::<f64>().map_err(|_| {
                    Error::Import(format!(
                        "Column '{}' row {}: '{}' is not a number",
                        header,
                        row + 1,
                        value
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()
            .map(ColumnData::Float),
    }
}
