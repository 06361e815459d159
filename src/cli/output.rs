//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{LootrankArgs, OutputFormat};
use crate::error::Result;

/// Result structure for report generation.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub tokens: usize,
    pub slots: usize,
    pub output_path: Option<String>,
    pub duration_ms: u64,
}

/// Result structure for scoring a single token.
#[derive(Debug, Serialize)]
pub struct TokenScoreResult {
    pub token_id: String,
    pub rarity: std::collections::BTreeMap<String, u64>,
    pub rarity_position: std::collections::BTreeMap<String, usize>,
}

/// Result structure for vocabulary validation.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub slots: usize,
    pub parts: usize,
    pub name_prefixes: usize,
    pub name_suffixes: usize,
    pub from_phrases: usize,
}

/// Write a result to stdout in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LootrankArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format: the message, then the result rendered as
/// indented JSON.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LootrankArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LootrankArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
