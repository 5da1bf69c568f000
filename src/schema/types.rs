//! Schema types

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Draft the emitted schemas declare
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// JSON Schema type
///
/// Variants are declared alphabetically so type lists serialize sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        };
        f.write_str(name)
    }
}

/// Set of types a value has been observed with
///
/// Serializes as a bare type name when it holds one type and as a list
/// otherwise. `number` subsumes `integer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet(BTreeSet<JsonType>);

impl TypeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the set with a type
    pub fn insert(&mut self, t: JsonType) {
        match t {
            JsonType::Integer if self.0.contains(&JsonType::Number) => {}
            JsonType::Number => {
                self.0.remove(&JsonType::Integer);
                self.0.insert(JsonType::Number);
            }
            _ => {
                self.0.insert(t);
            }
        }
    }

    /// Check whether a type is accepted
    pub fn contains(&self, t: JsonType) -> bool {
        self.0.contains(&t) || (t == JsonType::Integer && self.0.contains(&JsonType::Number))
    }

    /// Check whether `null` is accepted
    pub fn is_nullable(&self) -> bool {
        self.0.contains(&JsonType::Null)
    }

    /// Check if nothing has been observed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate types in sorted order
    pub fn iter(&self) -> impl Iterator<Item = JsonType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<JsonType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = JsonType>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let (1, Some(only)) = (self.0.len(), self.0.iter().next()) {
            return only.serialize(serializer);
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for t in &self.0 {
            seq.serialize_element(t)?;
        }
        seq.end()
    }
}

/// State of the `format` annotation on a string-typed node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum FormatState {
    /// No string observed yet
    #[default]
    Unseen,
    /// Every string so far matched this format (`None` = plain)
    Consistent(Option<String>),
    /// Strings disagreed; no format is reported
    Mixed,
}

/// Schema of one value position, widened as more values are observed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaNode {
    /// Observed type(s)
    #[serde(rename = "type", skip_serializing_if = "TypeSet::is_empty")]
    pub types: TypeSet,

    /// Format hint shared by every observed string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Object properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Properties present in every observed object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<BTreeSet<String>>,

    /// Array item schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(skip)]
    pub(crate) format_state: FormatState,
}

impl SchemaNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a nested property
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref()?.get(name)
    }

    /// Check whether a property is present in every observed object
    pub fn is_required(&self, name: &str) -> bool {
        self.required.as_ref().is_some_and(|r| r.contains(name))
    }

    /// Record one observed string's format
    pub(crate) fn observe_format(&mut self, detected: Option<&str>) {
        self.format_state = match std::mem::take(&mut self.format_state) {
            FormatState::Unseen => FormatState::Consistent(detected.map(str::to_string)),
            FormatState::Consistent(current) if current.as_deref() == detected => {
                FormatState::Consistent(current)
            }
            FormatState::Consistent(_) | FormatState::Mixed => FormatState::Mixed,
        };
        self.format = match &self.format_state {
            FormatState::Consistent(f) => f.clone(),
            _ => None,
        };
    }
}

/// Top-level JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSchema {
    /// Schema draft URI
    #[serde(rename = "$schema")]
    pub schema: String,

    /// Root node
    #[serde(flatten)]
    pub root: SchemaNode,
}

impl JsonSchema {
    /// Wrap a root node
    pub fn new(root: SchemaNode) -> Self {
        Self {
            schema: SCHEMA_DRAFT.to_string(),
            root,
        }
    }

    /// Get a top-level property
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.root.property(name)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self::new(SchemaNode::new())
    }
}
