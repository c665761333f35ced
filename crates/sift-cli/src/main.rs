//! Sift CLI - Automatic insight discovery
//!
//! Usage:
//!   sift describe --file data.csv    Show inferred metrics
//!   sift propose --file data.csv     List candidate insights
//!   sift analyze --file data.csv     Find relevant insights
//!   sift config                      Show effective configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { dataset, format } => commands::cmd_analyze(&dataset, &config, &format),
        Commands::Propose { dataset } => commands::cmd_propose(&dataset, &config),
        Commands::Describe { dataset } => commands::cmd_describe(&dataset),
        Commands::Config => commands::cmd_config(&config),
    }
}
