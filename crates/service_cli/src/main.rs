//! riskreg - Command Line Operations for Risk Registers
//!
//! This is the operational entry point for the risk register workspace.
//!
//! # Commands
//!
//! - `riskreg import <file>` - Validate a register file and report its rows
//! - `riskreg summary [file]` - Count risks by level, status and project
//! - `riskreg projects [file]` - Per-project rollups and timelines
//! - `riskreg list [file]` - Filter and sort the register
//! - `riskreg export <kind> [file]` - Write a register, project or cause-effect workbook
//! - `riskreg template` - Write a blank import template
//! - `riskreg sample` - Write the demonstration register
//! - `riskreg matrix` - Print the risk matrix
//! - `riskreg check` - Validate configuration
//!
//! Commands taking an optional `[file]` fall back to the demonstration
//! register when it is omitted.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the adapter,
//! infra and risk crates behind a single command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infra_config::{RegisterConfig, DEFAULT_CONFIG_PATH};
use risk_core::types::{RiskLevel, RiskStatus};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod sample;

use commands::export::ExportKind;
use commands::list::{ListArgs, SortKey};
use commands::OutputFormat;
pub use error::{CliError, Result};

/// Risk register scoring, aggregation and spreadsheet exchange
#[derive(Parser)]
#[command(name = "riskreg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a register file and report what would be imported
    Import {
        /// Register file (xlsx, xls, ods, csv)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Count risks by level, status and project
    Summary {
        /// Register file; the sample register when omitted
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Per-project risk rollups
    Projects {
        /// Register file; the sample register when omitted
        file: Option<PathBuf>,

        /// Evaluation date (YYYY-MM-DD), today by default
        #[arg(long)]
        as_of: Option<String>,

        /// Also print each project's timeline
        #[arg(short, long)]
        timeline: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Filter and sort the register
    List {
        /// Register file; the sample register when omitted
        file: Option<PathBuf>,

        /// Only risks at this level (e.g. high, very-high)
        #[arg(short, long)]
        level: Option<RiskLevel>,

        /// Only risks with this status (open, in-progress, mitigated, closed)
        #[arg(short, long)]
        status: Option<RiskStatus>,

        /// Only risks in this category
        #[arg(long)]
        category: Option<String>,

        /// Only risks in this project
        #[arg(short, long)]
        project: Option<String>,

        /// Sort key
        #[arg(long, value_enum, default_value_t)]
        sort: SortKey,

        /// Sort smallest first
        #[arg(long)]
        ascending: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Export a workbook
    Export {
        /// Workbook variant
        #[arg(value_enum)]
        kind: ExportKind,

        /// Register file; the sample register when omitted
        file: Option<PathBuf>,

        /// Output file (defaults to a dated name in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluation date for project trends (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Write a blank import template
    Template {
        /// Output file
        #[arg(short, long, default_value = commands::template::DEFAULT_TEMPLATE_PATH)]
        output: PathBuf,
    },

    /// Write the demonstration register
    Sample {
        /// Output file
        #[arg(short, long, default_value = commands::sample::DEFAULT_SAMPLE_PATH)]
        output: PathBuf,

        /// Print as JSON instead of writing a workbook
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print the risk matrix and level legend
    Matrix {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Check configuration
    Check,
}

fn init_tracing(config: &RegisterConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match RegisterConfig::load_with_env_and_validate(&cli.config) {
        Ok(config) => config,
        // `check` reports configuration problems itself
        Err(_) if matches!(cli.command, Commands::Check) => RegisterConfig::default(),
        Err(err) => return Err(err.into()),
    };
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Using configuration from {}", cli.config.display());

    match cli.command {
        Commands::Import { file, format } => commands::import::run(&file, format),
        Commands::Summary { file, format } => {
            commands::summary::run(&config, file.as_deref(), format)
        }
        Commands::Projects {
            file,
            as_of,
            timeline,
            format,
        } => commands::projects::run(&config, file.as_deref(), as_of.as_deref(), timeline, format),
        Commands::List {
            file,
            level,
            status,
            category,
            project,
            sort,
            ascending,
            format,
        } => {
            let args = ListArgs {
                level,
                status,
                category,
                project,
                sort,
                ascending,
            };
            commands::list::run(file.as_deref(), &args, format)
        }
        Commands::Export {
            kind,
            file,
            output,
            as_of,
        } => commands::export::run(
            &config,
            file.as_deref(),
            kind,
            output.as_deref(),
            as_of.as_deref(),
        ),
        Commands::Template { output } => commands::template::run(&output),
        Commands::Sample { output, format } => commands::sample::run(&config, &output, format),
        Commands::Matrix { format } => commands::matrix::run(format),
        Commands::Check => commands::check::run(&cli.config),
    }
}
