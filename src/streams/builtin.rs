//! Built-in Showpad streams embedded in the binary

use super::descriptor::{parse_stream_definitions, StreamDescriptor};
use crate::error::Result;
use serde_json::Value;
use tracing::warn;

/// Built-in stream table
pub const BUILTIN_STREAMS_YAML: &str = include_str!("../../streams.yaml");

/// Record schemas of the built-in streams, keyed by stream name
static BUILTIN_SCHEMAS: &[(&str, &str)] = &[
    ("sharedspaces", include_str!("../../schemas/sharedspaces.json")),
    ("sharedspaceparticipants", include_str!("../../schemas/sharedspaceparticipants.json")),
    ("users", include_str!("../../schemas/users.json")),
    ("contacts", include_str!("../../schemas/contacts.json")),
    ("divisions", include_str!("../../schemas/divisions.json")),
    ("channels", include_str!("../../schemas/channels.json")),
    ("assets", include_str!("../../schemas/assets.json")),
];

/// Embedded schema for a built-in stream
pub fn builtin_schema(name: &str) -> Option<Value> {
    let (_, raw) = BUILTIN_SCHEMAS.iter().find(|(n, _)| *n == name)?;
    match serde_json::from_str(raw) {
        Ok(schema) => Some(schema),
        Err(e) => {
            warn!("Embedded schema for '{name}' is invalid: {e}");
            None
        }
    }
}

/// Descriptors for every built-in stream, in catalog order
pub fn builtin_streams() -> Result<Vec<StreamDescriptor>> {
    parse_stream_definitions(BUILTIN_STREAMS_YAML, builtin_schema)
}

/// Names of the built-in streams
pub fn list_builtin() -> Vec<&'static str> {
    BUILTIN_SCHEMAS.iter().map(|(name, _)| *name).collect()
}
