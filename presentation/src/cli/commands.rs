//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted report
    Full,
    /// Case type, summary and next steps only
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for nyaybuddy
#[derive(Parser, Debug)]
#[command(name = "nyaybuddy")]
#[command(author, version, about = "Legal case intake assistant for India")]
#[command(long_about = r#"
NyayBuddy analyzes a legal problem description, classifies it, and can run
an adaptive clarifying-question interview (at most 5 rounds) before
producing a detailed report with the competent authority, applicable
provisions, and an action plan.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./nyaybuddy.toml    Project-level config
3. ~/.config/nyaybuddy/config.toml   Global config

Example:
  nyaybuddy "My flight was cancelled and the airline refuses a refund"
  nyaybuddy --interactive --language hi
  nyaybuddy --skip-followup -o json "Landlord kept my security deposit"
"#)]
pub struct Cli {
    /// The case description (omit with --interactive to be prompted)
    pub description: Option<String>,

    /// Run the full interactive intake (consumer sub-flow + question rounds)
    #[arg(short, long)]
    pub interactive: bool,

    /// Display language (en or hi)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Console theme (light or dark)
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Classification only; never start the clarifying dialogue
    #[arg(long)]
    pub skip_followup: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Write a JSONL transcript of the session (to PATH, or a default
    /// per-session file under the platform data directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub log_conversation: Option<Option<PathBuf>>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
