//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ConfigArgs};

/// assetmix - Asset allocation breakdown for brokerage exports
#[derive(Parser, Debug)]
#[command(name = "assetmix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress banners and hints
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./config.json)
    #[arg(long, global = true, env = "ASSETMIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Holdings CSV, overriding excel_filename from the configuration
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Do not append this run to the history log
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Analysis options when no subcommand is given
    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Break holdings down by asset class (default)
    Analyze(AnalyzeArgs),

    /// List accounts found in the holdings file
    Accounts,

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
