//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Modes
//!
//! - `--about` - Print tap metadata and settings schema
//! - `--discover` - Print the Singer catalog
//! - default - Sync the selected streams to stdout

mod commands;
mod runner;

pub use commands::{Cli, Mode, OutputFormat, CONFIG_FROM_ENV};
pub use runner::Runner;

#[cfg(test)]
mod tests;
