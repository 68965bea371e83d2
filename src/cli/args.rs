//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for fieldrules commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<crate::config::OutputFormat> for OutputFormat {
    fn from(format: crate::config::OutputFormat) -> Self {
        match format {
            crate::config::OutputFormat::Human => OutputFormat::Human,
            crate::config::OutputFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<crate::config::ColorOption> for ColorChoice {
    fn from(color: crate::config::ColorOption) -> Self {
        match color {
            crate::config::ColorOption::Auto => ColorChoice::Auto,
            crate::config::ColorOption::Always => ColorChoice::Always,
            crate::config::ColorOption::Never => ColorChoice::Never,
        }
    }
}

/// Fieldrules CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "fieldrules")]
#[command(about = "Declarative validation of string values")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides [output] color in fieldrules.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available fieldrules subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate values against the configured rules
    Check {
        /// Values to validate
        values: Vec<String>,

        /// Path to the configuration file (defaults to ./fieldrules.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also read values from stdin, one per line
        #[arg(long)]
        stdin: bool,

        /// Report every failing rule instead of stopping at the first
        #[arg(long)]
        all: bool,

        /// Output format (overrides [output] format in fieldrules.toml)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List the named patterns available to the `match` rule
    Patterns {
        /// Path to the configuration file (defaults to ./fieldrules.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List the available rules and their message templates
    Rules {
        /// Path to the configuration file (defaults to ./fieldrules.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write a starter fieldrules.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
