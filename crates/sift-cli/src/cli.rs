//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Sift - Discover notable relationships in tabular data
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Automatic insight discovery for CSV datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pipeline config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads a dataset
#[derive(Args, Clone)]
pub struct DatasetArgs {
    /// CSV file to analyze (first row is the header)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Force a column type, e.g. --type zip=string (repeatable)
    #[arg(short = 't', long = "type", value_name = "COLUMN=TYPE")]
    pub types: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and print relevant insights
    Analyze {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output format: text, json
        #[arg(short = 'o', long, default_value = "text")]
        format: String,
    },

    /// List candidate insights without screening or generating them
    Propose {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Show the metrics inferred from a CSV file
    Describe {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Show the effective pipeline configuration
    Config,
}
