//! Schema inference from JSON values

use super::types::{JsonSchema, JsonType, SchemaNode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static DATETIME_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").ok()
});

/// Incrementally widens a schema from example values
///
/// Merging is a structural union: new properties are added, type sets only
/// grow, and nested objects and array items are merged recursively.
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    /// Annotate timestamp strings with `format: date-time`
    detect_datetime: bool,
    /// Objects nested deeper than this are typed but not expanded
    max_depth: usize,
    /// Values merged so far
    record_count: usize,
    root: SchemaNode,
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self {
            detect_datetime: true,
            max_depth: 32,
            record_count: 0,
            root: SchemaNode::new(),
        }
    }

    /// Enable/disable datetime detection
    #[must_use]
    pub fn with_datetime_detection(mut self, enabled: bool) -> Self {
        self.detect_datetime = enabled;
        self
    }

    /// Set maximum depth for nested objects
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Merge one example value into the schema
    pub fn add_object(&mut self, value: &Value) {
        self.record_count += 1;
        let mut root = std::mem::take(&mut self.root);
        self.observe(&mut root, value, 0);
        self.root = root;
    }

    /// Number of values merged so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Snapshot of the accumulated schema
    pub fn schema(&self) -> JsonSchema {
        JsonSchema::new(self.root.clone())
    }

    fn observe(&self, node: &mut SchemaNode, value: &Value, depth: usize) {
        match value {
            Value::Null => node.types.insert(JsonType::Null),
            Value::Bool(_) => node.types.insert(JsonType::Boolean),
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    node.types.insert(JsonType::Integer);
                } else {
                    node.types.insert(JsonType::Number);
                }
            }
            Value::String(s) => {
                node.types.insert(JsonType::String);
                let detected = (self.detect_datetime && is_datetime(s)).then_some("date-time");
                node.observe_format(detected);
            }
            Value::Array(arr) => {
                node.types.insert(JsonType::Array);
                if !arr.is_empty() {
                    let items = node.items.get_or_insert_with(Box::default);
                    for item in arr {
                        self.observe(items, item, depth + 1);
                    }
                }
            }
            Value::Object(map) => {
                node.types.insert(JsonType::Object);
                if depth < self.max_depth {
                    self.observe_object(node, map, depth);
                }
            }
        }
    }

    fn observe_object(&self, node: &mut SchemaNode, map: &Map<String, Value>, depth: usize) {
        let properties = node.properties.get_or_insert_with(Default::default);
        for (key, val) in map {
            let child = properties.entry(key.clone()).or_default();
            self.observe(child, val, depth + 1);
        }

        match &mut node.required {
            Some(required) => required.retain(|k| map.contains_key(k)),
            None => node.required = Some(map.keys().cloned().collect()),
        }
    }
}

/// Infer schema from a single JSON value (convenience function)
pub fn infer_schema(value: &Value) -> JsonSchema {
    let mut inferrer = SchemaInferrer::new();
    inferrer.add_object(value);
    inferrer.schema()
}

fn is_datetime(s: &str) -> bool {
    DATETIME_RE.as_ref().is_some_and(|re| re.is_match(s))
}
