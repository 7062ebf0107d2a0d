//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbx_logger::{ConsoleFormat, LevelFilter, parse_level};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dbx-wire")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Binds spring.dubbo properties and wires RPC components")]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load configuration and wire components into an in-memory registry
    Run(RunArgs),
    /// List the keys a section accepts (all sections when none is given)
    Schema {
        /// Section name, e.g. 'provider'
        section: Option<String>,
    },
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Configuration file (TOML, YAML, JSON); repeatable, later files win
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub configs: Vec<PathBuf>,

    /// Configuration file that is skipped when missing; repeatable
    #[arg(long = "optional-config", value_name = "PATH")]
    pub optional_configs: Vec<PathBuf>,

    /// Override a key, relative to 'spring.dubbo' or fully qualified (e.g. 'protocol.port=20881')
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Ignore SPRING__DUBBO__* environment variables
    #[arg(long)]
    pub no_env: bool,

    /// Print the wiring report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Logging options shared by every subcommand.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Rendering of log lines on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Also write daily rolling log files into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write log files as JSON lines (requires --log-dir)
    #[arg(long, global = true, requires = "log_dir")]
    pub log_file_json: bool,

    /// Number of rolled log files to keep (requires --log-dir)
    #[arg(long, global = true, default_value_t = 10, requires = "log_dir")]
    pub log_max_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
    /// No console output
    Off,
}

impl From<LogFormat> for ConsoleFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
            LogFormat::Off => Self::Off,
        }
    }
}
