//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sinkctl - validate and inspect sink configuration requests
#[derive(Parser, Debug)]
#[command(
    name = "sinkctl",
    author,
    version,
    about = "Sink configuration request validator",
    long_about = "Decodes sink configuration payloads by their 'sinkType' discriminator,\n\
                  validates them against the registered sink-type schemas and reports\n\
                  field-level errors."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SINKCTL_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SINKCTL_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Decoder configuration file (TOML)
    #[arg(short, long, global = true, env = "SINKCTL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level used when `RUST_LOG` is unset
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode and validate sink payloads
    Validate(ValidateArgs),

    /// List registered sink types and their fields
    Types(TypesArgs),

    /// Show a summary of a validated sink payload
    Info(InfoArgs),
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Payload files to validate (JSON or TOML)
    #[arg(required = true)]
    pub payloads: Vec<PathBuf>,

    /// Drop unknown fields instead of rejecting them
    #[arg(long, env = "SINKCTL_LENIENT")]
    pub lenient: bool,

    /// Output validation results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `types` command
#[derive(Parser, Debug)]
pub struct TypesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show field tables
    #[arg(long)]
    pub fields: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Payload file (JSON or TOML)
    pub payload: PathBuf,

    /// Drop unknown fields instead of rejecting them
    #[arg(long, env = "SINKCTL_LENIENT")]
    pub lenient: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
