//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// decicalc: desk calculator with exact decimal arithmetic
#[derive(Parser, Debug)]
#[command(name = "decicalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Fractional digits kept by division and percent
    #[arg(long, env = "DECICALC_SCALE", global = true)]
    pub scale: Option<u32>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "DECICALC_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run (default: tui)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive terminal calculator
    Tui,

    /// Press a sequence of keys and print the display
    ///
    /// Each character is one key as typed on a keyboard: digits, `.`,
    /// `+ - * /`, `%` and `=`. Named keys are written in angle brackets:
    /// `<enter>`, `<bs>`, `<del>`, `<esc>`, `<f9>`. Spaces are ignored.
    Press(PressArgs),

    /// Show the effective engine configuration
    Config(ConfigArgs),
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Keys to press, e.g. "12+7="
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON
    Json,
}
