//! CLI commands and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Value of `--config` that reads settings from the environment
pub const CONFIG_FROM_ENV: &str = "ENV";

/// Singer tap for the Showpad REST API
#[derive(Parser, Debug)]
#[command(name = "tap-showpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON), or `ENV` to read TAP_SHOWPAD_* variables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print tap metadata and exit
    #[arg(long)]
    pub about: bool,

    /// Print the stream catalog and exit
    #[arg(long, conflicts_with = "about")]
    pub discover: bool,

    /// Catalog file restricting the sync to its selected streams
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// OpenAPI document to derive streams from instead of the built-in table
    #[arg(long)]
    pub openapi: Option<PathBuf>,

    /// Streams to sync (comma-separated, empty = all)
    #[arg(long, value_delimiter = ',')]
    pub streams: Vec<String>,

    /// Maximum records per stream
    #[arg(long)]
    pub max_records: Option<usize>,

    /// API root replacing the one derived from the subdomain
    #[arg(long, env = "TAP_SHOWPAD_BASE_URL", hide_env_values = true)]
    pub base_url: Option<String>,

    /// Output format for --about and --discover
    #[arg(short, long, default_value = "pretty")]
    pub format: OutputFormat,
}

/// What a parsed command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print tap metadata
    About,
    /// Print the catalog
    Discover,
    /// Sync streams
    Sync,
}

impl Cli {
    /// Mode selected by the flags
    pub fn mode(&self) -> Mode {
        if self.about {
            Mode::About
        } else if self.discover {
            Mode::Discover
        } else {
            Mode::Sync
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
