//! JSONPath record extractor

use crate::error::{Error, Result};
use jsonpath_rust::JsonPath;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Per-record hook applied while records are yielded
pub type RecordTransform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Extracts records from page bodies with a fixed JSONPath
#[derive(Clone)]
pub struct RecordExtractor {
    /// JSONPath selecting the records
    path: String,
    /// Optional per-record normalisation
    transform: Option<RecordTransform>,
}

impl RecordExtractor {
    /// Create an extractor for a JSONPath expression
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            transform: None,
        }
    }

    /// Apply `transform` to every extracted record
    #[must_use]
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// The JSONPath expression
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Records of one page, in array order
    ///
    /// A path that matches nothing yields no records.
    pub fn records(&self, body: &Value) -> Result<Records> {
        let jp = JsonPath::try_from(self.path.as_str())
            .map_err(|e| Error::json_path(format!("Invalid JSONPath '{}': {e}", self.path)))?;

        let found = match jp.find(body) {
            Value::Array(arr) => arr,
            Value::Null => vec![],
            other => vec![other],
        };

        Ok(Records {
            inner: found.into_iter(),
            transform: self.transform.clone(),
        })
    }
}

impl fmt::Debug for RecordExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordExtractor")
            .field("path", &self.path)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

/// Single-pass iterator over the records of one page
pub struct Records {
    inner: std::vec::IntoIter<Value>,
    transform: Option<RecordTransform>,
}

impl Iterator for Records {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let record = self.inner.next()?;
        Some(match &self.transform {
            Some(transform) => transform(record),
            None => record,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Records {}
