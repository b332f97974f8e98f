//! mdsplit CLI - split Markdown into headlines, code blocks and plain content.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mdsplit_batch::FailurePolicy;
use mdsplit_core::Strategy;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mdsplit")]
#[command(about = "Split Markdown into headlines, code blocks and plain content")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to mdsplit.toml config file
    #[arg(short, long, default_value = "mdsplit.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split one document and print the result as JSON
    Parse {
        /// Markdown file to split
        file: PathBuf,

        /// Splitting strategy: lines or whole (defaults to config)
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Split every document listed in a directory mapping file
    Batch {
        /// Mapping file of directory:identifier lines (defaults to config)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// What to do when a document fails: skip or halt
        #[arg(long)]
        on_error: Option<FailurePolicy>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the line and whole-document strategies on one document
    Check {
        /// Markdown file to check
        file: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for JSON output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Parse {
            file,
            strategy,
            pretty,
        } => {
            let config = config::load_config(&cli.config)?;
            commands::parse::run(&file, strategy, pretty, &config)?;
        }
        Commands::Batch {
            mapping,
            on_error,
            output,
        } => {
            let config = config::load_config(&cli.config)?;
            commands::batch::run(mapping, on_error, output, &config)?;
        }
        Commands::Check { file } => {
            let config = config::load_config(&cli.config)?;
            commands::check::run(&file, &config)?;
        }
        Commands::Init { force } => {
            commands::init::run(&cli.config, force)?;
        }
    }

    Ok(())
}
