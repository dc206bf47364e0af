use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect the faultline error code table
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Error code registry for request-serving services")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "FAULTLINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log filter
    #[arg(long, env = "FAULTLINE_LOG", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every registered code
    Codes {
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show status, message, and classification of one code
    Explain { code: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Markdown,
    Json,
}
