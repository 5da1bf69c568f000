//! Stream discovery from a Showpad OpenAPI document
//!
//! Every plain `GET` endpoint whose default response is a v3 envelope
//! (`{"response": {"count", "items": [...]}}`) becomes a stream whose
//! schema is the envelope's item schema.

use super::descriptor::StreamDescriptor;
use crate::error::{Error, Result};
use crate::types::ApiVersion;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Characters dropped from an operation id to form the stream name
const OPERATION_PREFIX_LEN: usize = 4;

/// Load and parse an OpenAPI document
pub fn load_openapi(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let doc = serde_json::from_str(&content)?;
    Ok(doc)
}

/// Derive stream descriptors from an OpenAPI document
///
/// Paths come back in key order of the document's `paths` object.
pub fn discover_openapi(doc: &Value) -> Result<Vec<StreamDescriptor>> {
    let paths = doc
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::openapi("expected a 'paths' object"))?;

    let mut streams = Vec::new();
    for (path, methods) in paths {
        match stream_for_path(path, methods) {
            Ok(descriptor) => streams.push(descriptor),
            Err(reason) => debug!("Skipping {path}: {reason}"),
        }
    }

    Ok(streams)
}

/// Build the stream for one path, or say why it is not one
fn stream_for_path(
    path: &str,
    methods: &Value,
) -> std::result::Result<StreamDescriptor, &'static str> {
    let op = methods.get("get").ok_or("no GET operation")?;

    if path.contains('{') || path.contains('}') {
        return Err("templated path");
    }

    let operation_id = op
        .get("operationId")
        .or_else(|| op.get("operation_id"))
        .and_then(Value::as_str)
        .ok_or("no operation id")?;
    let name: String = operation_id.chars().skip(OPERATION_PREFIX_LEN).collect();
    if name.is_empty() {
        return Err("operation id too short to name a stream");
    }

    let schema = op
        .pointer("/responses/default/content/application~1json/schema")
        .ok_or("no default JSON response schema")?;

    let wraps_response = schema
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(|req| req.iter().any(|r| r.as_str() == Some("response")));
    if !wraps_response {
        return Err("response is not a v3 envelope");
    }

    let item_schema = schema
        .pointer("/properties/response/properties/items/items")
        .ok_or("envelope has no items array")?;

    Ok(StreamDescriptor::new(
        name,
        path,
        vec!["id".to_string()],
        ApiVersion::V3,
        item_schema.clone(),
    ))
}
