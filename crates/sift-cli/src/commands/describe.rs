//! Dataset and configuration inspection commands

use anyhow::Result;
use sift_core::{config::default_config_path, Dataset, InsightEngine, PipelineConfig};

use super::{open_dataset, truncate};
use crate::cli::DatasetArgs;

pub fn cmd_describe(args: &DatasetArgs) -> Result<()> {
    let dataset = open_dataset(args)?;
    print!("{}", render_description(&dataset));
    Ok(())
}

pub fn render_description(dataset: &Dataset) -> String {
    let mut out = format!(
        "{} records, {} metrics ({} float)\n\n",
        dataset.len(),
        dataset.metric_count(),
        dataset.float_metrics().count()
    );
    out.push_str(&format!("  {:<24} {:<8} {}\n", "NAME", "TYPE", "DISPLAY NAME"));
    for metric in dataset.metrics() {
        out.push_str(&format!(
            "  {:<24} {:<8} {}\n",
            truncate(&metric.name, 24),
            metric.data_type.as_str(),
            metric.label()
        ));
    }
    out
}

pub fn cmd_config(config: &PipelineConfig) -> Result<()> {
    println!();
    println!("⚙️  Sift Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    match default_config_path() {
        Some(path) if path.exists() => println!("   Override: {}", path.display()),
        Some(path) => println!("   Override: {} (not present)", path.display()),
        None => println!("   Override: (no data directory)"),
    }
    println!();
    println!("   Correlation threshold: {}", config.correlation.threshold);
    println!("   Proposal warning above: {}", config.proposals.warn_above);
    println!(
        "   Insights: {}",
        InsightEngine::from_config(config).insight_names().join(", ")
    );
    println!();
    Ok(())
}
