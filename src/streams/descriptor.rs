//! Stream descriptor types
//!
//! Static metadata for one stream, and the YAML shape stream tables are
//! declared in.

use crate::error::{Error, Result};
use crate::types::{ApiVersion, ReplicationMethod};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============================================================================
// Stream Descriptor
// ============================================================================

/// Everything the sync engine needs to know about one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Stream name
    pub name: String,
    /// URL path below the API root
    pub path: String,
    /// Primary key fields
    #[serde(default)]
    pub primary_keys: Vec<String>,
    /// API generation serving this stream
    #[serde(default)]
    pub api_version: ApiVersion,
    /// JSON Schema of one record
    pub schema: Value,
    /// Replication method
    #[serde(default)]
    pub replication_method: ReplicationMethod,
}

impl StreamDescriptor {
    /// Create a full-table stream descriptor
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        primary_keys: Vec<String>,
        api_version: ApiVersion,
        schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            primary_keys,
            api_version,
            schema,
            replication_method: ReplicationMethod::FullTable,
        }
    }

    /// API root for a subdomain
    pub fn base_url(&self, subdomain: &str) -> String {
        self.api_version.base_url(subdomain)
    }

    /// Full request URL below `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// JSONPath selecting this stream's records in a page
    pub fn records_path(&self) -> &'static str {
        self.api_version.records_path()
    }
}

// ============================================================================
// Stream Definitions (YAML)
// ============================================================================

/// A stream table as declared in YAML
#[derive(Debug, Clone, Deserialize)]
pub struct StreamDefinitions {
    /// Declared streams, in catalog order
    pub streams: Vec<StreamDefinition>,
}

/// One stream as declared in YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StreamDefinition {
    /// Stream name
    pub name: String,
    /// URL path below the API root
    pub path: String,
    /// Primary key fields
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Version tag, `v3` when omitted
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Inline record schema; resolved by name when omitted
    #[serde(default)]
    pub schema: Option<Value>,
}

fn default_api_version() -> String {
    ApiVersion::V3.to_string()
}

impl StreamDefinition {
    /// Resolve into a descriptor
    ///
    /// `lookup_schema` supplies the schema for definitions that carry none
    /// inline. An unknown version tag is rejected here.
    pub fn into_descriptor<F>(self, lookup_schema: F) -> Result<StreamDescriptor>
    where
        F: Fn(&str) -> Option<Value>,
    {
        if self.name.is_empty() {
            return Err(Error::config("Stream name cannot be empty"));
        }
        if self.path.is_empty() {
            return Err(Error::config(format!(
                "Stream '{}' has an empty path",
                self.name
            )));
        }

        let api_version: ApiVersion = self.api_version.parse()?;
        let schema = match self.schema {
            Some(schema) => schema,
            None => lookup_schema(&self.name).unwrap_or_else(open_object_schema),
        };

        Ok(StreamDescriptor::new(
            self.name,
            self.path,
            self.primary_key,
            api_version,
            schema,
        ))
    }
}

/// Parse a YAML stream table into descriptors
pub fn parse_stream_definitions<F>(yaml: &str, lookup_schema: F) -> Result<Vec<StreamDescriptor>>
where
    F: Fn(&str) -> Option<Value>,
{
    let defs: StreamDefinitions = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse stream definitions: {e}")))?;

    defs.streams
        .into_iter()
        .map(|def| def.into_descriptor(&lookup_schema))
        .collect()
}

/// Schema accepting any object
pub fn open_object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": true
    })
}
