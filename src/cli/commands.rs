//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sage Pay gateway client CLI
#[derive(Parser, Debug)]
#[command(name = "sagepay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gateway configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a gateway response body
    Decode {
        /// File containing the body (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Keep raw text of values with no translation
        #[arg(long)]
        retain_untranslated: bool,

        /// Keep unrecognised keys as extension fields
        #[arg(long)]
        retain_unknown: bool,
    },

    /// Register a transaction with the gateway
    Register {
        /// Registration options file (YAML)
        #[arg(short, long)]
        options: PathBuf,

        /// Register as a payment unless the options name a tx type
        #[arg(long)]
        payment: bool,
    },

    /// Validate a gateway configuration
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one line)
    Json,
    /// Human-readable output
    Pretty,
}
