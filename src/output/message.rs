//! Singer message types

use crate::streams::StreamDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of tap output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Announces a stream's record schema
    Schema {
        /// Stream name
        stream: String,
        /// JSON Schema of the stream's records
        schema: Value,
        /// Primary key fields
        key_properties: Vec<String>,
    },
    /// One extracted record
    Record {
        /// Stream name
        stream: String,
        /// The record
        record: Value,
        /// When the record's page was fetched
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_extracted: Option<DateTime<Utc>>,
    },
}

impl Message {
    /// SCHEMA message for a stream
    pub fn schema(descriptor: &StreamDescriptor) -> Self {
        Self::Schema {
            stream: descriptor.name.clone(),
            schema: descriptor.schema.clone(),
            key_properties: descriptor.primary_keys.clone(),
        }
    }

    /// RECORD message
    pub fn record(
        stream: impl Into<String>,
        record: Value,
        time_extracted: Option<DateTime<Utc>>,
    ) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted,
        }
    }

    /// Stream the message belongs to
    pub fn stream(&self) -> &str {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => stream,
        }
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }
}
