//! Command line argument parsing for the lootrank CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lootrank - deterministic rarity scoring for composite loot collections
#[derive(Parser, Debug, Clone)]
#[command(name = "lootrank")]
#[command(about = "Deterministic rarity scoring and ranking for loot collections")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LootrankArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LootrankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute the full rarity report for a collection
    Report(ReportArgs),

    /// Dump the trait frequency table, rarest fragments first
    Frequencies(FrequenciesArgs),

    /// Score a single token by id
    Score(ScoreArgs),

    /// Validate a vocabulary against its exclusions table
    Validate(ValidateArgs),
}

/// Input dataset paths shared by most commands.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Path to the token collection JSON file
    #[arg(short, long)]
    pub collection: PathBuf,

    /// Path to the item-parts vocabulary JSON file
    #[arg(short = 'p', long = "item-parts")]
    pub item_parts: PathBuf,
}

/// Arguments for the report command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the frequencies command
#[derive(Args, Debug, Clone)]
pub struct FrequenciesArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Restrict output to one slot
    #[arg(short, long)]
    pub slot: Option<String>,
}

/// Arguments for the score command
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Token id to score
    #[arg(short, long)]
    pub token_id: String,
}

/// Arguments for the validate command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the item-parts vocabulary JSON file
    #[arg(short = 'p', long = "item-parts")]
    pub item_parts: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
