//! schema-inferrer
//!
//! Reads a tap's messages on stdin and prints one JSON Schema per stream.
//!
//! ```text
//! tap-showpad --config config.json | head -500 | schema-inferrer
//! ```

use std::io::{self, BufWriter};
use tap_showpad::schema::SchemaAccumulator;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut accumulator = SchemaAccumulator::new();
    let result = accumulator
        .consume(io::stdin().lock())
        .and_then(|()| accumulator.write_report(BufWriter::new(io::stdout().lock())));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    info!(
        "Inferred {} schemas, skipped {} lines",
        accumulator.streams().count(),
        accumulator.lines_skipped()
    );
}
