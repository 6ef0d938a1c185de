//! Command-line interface for inspecting canonical S-expressions

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod config;

use commands::{check_command, get_command, parse_command};
use config::{CliConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "gcr-sexp")]
#[command(about = "Parse and navigate canonical S-expressions")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an S-expression file and display it
    Parse {
        /// Input file path
        file: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Show memory footprint, node count and depth
        #[arg(long)]
        size: bool,
    },
    /// Print the element at a path such as `rsa/n`, `1/0` or `.cdr`
    Get {
        /// Input file path
        file: PathBuf,
        /// `/`-separated path of indices, `.car`, `.cdr` or field names
        path: String,
    },
    /// Validate S-expression files
    Check {
        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Parse { file, format, size } => parse_command(&file, format, size, &config),
        Commands::Get { file, path } => get_command(&file, &path, &config),
        Commands::Check { files } => check_command(&files, &config),
    };

    match result {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
