// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-showpad
//!
//! A Singer tap for the Showpad REST API, and a schema inferrer for the
//! messages such taps emit.
//!
//! ## Features
//!
//! - **Export Streams**: Seven built-in export streams, or streams derived from an OpenAPI document
//! - **Adaptive Pagination**: Offset paging that recognises a repeated tail page by its `createdAt` watermark
//! - **Two API Generations**: v3 `{"response": {"count", "items"}}` and v4 `{"items": [...]}` envelopes
//! - **Singer Output**: SCHEMA and RECORD messages as JSON lines on stdout
//! - **Schema Inference**: Per-stream JSON Schemas accumulated from tap output
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_showpad::engine::{SyncConfig, SyncEngine};
//! use tap_showpad::http::{HttpClient, HttpClientConfig};
//! use tap_showpad::output::MessageWriter;
//! use tap_showpad::streams::builtin_streams;
//!
//! #[tokio::main]
//! async fn main() -> tap_showpad::Result<()> {
//!     let client = HttpClient::with_config(HttpClientConfig::default())?;
//!     let mut engine = SyncEngine::new(client, "acme").with_config(SyncConfig::from_env()?);
//!     let mut writer = MessageWriter::new(std::io::stdout());
//!
//!     for stream in builtin_streams()? {
//!         engine.sync_stream(&stream, &mut writer).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          SyncEngine                             │
//! │  for each page: fetch → extract records → has more? → advance   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET       │ v3 watermark  │ JSONPath  │ SCHEMA      │
//! │          │ Retry     │ v4 full page  │           │ RECORD      │
//! │          │ Backoff   │               │           │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap settings
pub mod config;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry
pub mod http;

/// Offset pagination with per-version continuation rules
pub mod pagination;

/// Record extraction from page bodies
pub mod decode;

/// Stream descriptors, built-in streams and the Singer catalog
pub mod streams;

/// Singer message output
pub mod output;

/// Main execution engine
pub mod engine;

/// Schema inference from tap output
pub mod schema;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
