//! Singer catalog
//!
//! `--discover` prints a [`Catalog`]; a catalog file handed back with
//! `--catalog` restricts a sync to its selected streams.

use super::descriptor::StreamDescriptor;
use crate::error::{Error, Result};
use crate::types::{JsonObject, ReplicationMethod};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// A Singer catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog entries
    pub streams: Vec<CatalogEntry>,
}

/// One stream in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream identifier
    pub tap_stream_id: String,
    /// Stream name
    pub stream: String,
    /// Record schema
    pub schema: Value,
    /// Primary key fields
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Replication method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_method: Option<ReplicationMethod>,
    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Metadata attached to a breadcrumb; the empty breadcrumb is the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    /// Metadata values
    #[serde(default)]
    pub metadata: JsonObject,
}

impl Catalog {
    /// Build the catalog advertising `streams`
    pub fn from_streams(streams: &[StreamDescriptor]) -> Self {
        Self {
            streams: streams.iter().map(CatalogEntry::from_descriptor).collect(),
        }
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse catalog: {e}")))
    }

    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Entries not deselected in their stream metadata
    pub fn selected(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.streams.iter().filter(|entry| entry.is_selected())
    }

    /// Resolve the selected entries against the available streams
    ///
    /// The catalog's schema and key properties replace the descriptor's,
    /// so an edited catalog shapes the SCHEMA messages.
    pub fn resolve(&self, available: &[StreamDescriptor]) -> Result<Vec<StreamDescriptor>> {
        self.selected()
            .map(|entry| {
                let base = available
                    .iter()
                    .find(|s| s.name == entry.tap_stream_id)
                    .ok_or_else(|| Error::stream_not_found(&entry.tap_stream_id))?;
                let mut descriptor = base.clone();
                descriptor.schema = entry.schema.clone();
                if !entry.key_properties.is_empty() {
                    descriptor.primary_keys = entry.key_properties.clone();
                }
                Ok(descriptor)
            })
            .collect()
    }

    /// Serialize for output
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl CatalogEntry {
    /// Entry advertising one stream, selected by default
    pub fn from_descriptor(descriptor: &StreamDescriptor) -> Self {
        let stream_metadata = json!({
            "inclusion": "available",
            "selected": true,
            "table-key-properties": descriptor.primary_keys,
            "forced-replication-method": descriptor.replication_method,
        });

        Self {
            tap_stream_id: descriptor.name.clone(),
            stream: descriptor.name.clone(),
            schema: descriptor.schema.clone(),
            key_properties: descriptor.primary_keys.clone(),
            replication_method: Some(descriptor.replication_method),
            metadata: vec![MetadataEntry {
                breadcrumb: vec![],
                metadata: match stream_metadata {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                },
            }],
        }
    }

    /// Metadata of the stream itself
    pub fn stream_metadata(&self) -> Option<&JsonObject> {
        self.metadata
            .iter()
            .find(|m| m.breadcrumb.is_empty())
            .map(|m| &m.metadata)
    }

    /// False only when the stream metadata says `selected: false`
    pub fn is_selected(&self) -> bool {
        self.stream_metadata()
            .and_then(|m| m.get("selected"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

/// Pick streams by name, in the order requested
pub fn select_by_name(
    available: &[StreamDescriptor],
    names: &[String],
) -> Result<Vec<StreamDescriptor>> {
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|s| &s.name == name)
                .cloned()
                .ok_or_else(|| Error::stream_not_found(name))
        })
        .collect()
}
