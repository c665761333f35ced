//! Shared command utilities
//!
//! This module contains:
//! - `open_dataset` - Load a CSV file into a dataset
//! - `load_config` - Resolve the pipeline configuration

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sift_core::{load_csv_file, Dataset, ImportOptions, PipelineConfig};

use crate::cli::DatasetArgs;

/// Load the dataset described by the shared dataset arguments
pub fn open_dataset(args: &DatasetArgs) -> Result<Arc<Dataset>> {
    if !args.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }

    let options = ImportOptions {
        delimiter: args.delimiter as u8,
        ..ImportOptions::default()
    }
    .parse_type_overrides(args.types.iter().map(String::as_str))
    .context("Invalid --type override")?;

    let dataset = load_csv_file(&args.file, &options)
        .with_context(|| format!("Failed to load dataset: {}", args.file.display()))?;

    tracing::debug!(
        file = %args.file.display(),
        records = dataset.len(),
        metrics = dataset.metric_count(),
        "Dataset loaded"
    );

    Ok(Arc::new(dataset))
}

/// Load config from an explicit path, the data dir override, or defaults
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    PipelineConfig::load(path).context("Failed to load pipeline config")
}
