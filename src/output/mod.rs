//! Output module
//!
//! Singer messages written to stdout as JSON lines.
//!
//! # Overview
//!
//! - `Message` - SCHEMA and RECORD messages, tagged by `type`
//! - `MessageWriter` - serializes messages one per line to any `Write`

mod message;
mod writer;

pub use message::Message;
pub use writer::MessageWriter;
