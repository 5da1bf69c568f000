//! Per-stream schema accumulation over a tap's message output

use super::inference::SchemaInferrer;
use super::types::JsonSchema;
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{BufRead, ErrorKind, Write};
use tracing::debug;

/// Builds one schema per stream from newline-delimited messages
///
/// Only `RECORD` messages contribute. Lines that are not valid JSON are
/// skipped without error. Streams keep the order they were first seen in.
#[derive(Debug, Default)]
pub struct SchemaAccumulator {
    order: Vec<String>,
    inferrers: HashMap<String, SchemaInferrer>,
    lines_skipped: usize,
}

impl SchemaAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input line; returns whether a record was merged
    pub fn add_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.add_message(&message),
            Err(e) => {
                debug!("Skipping malformed line: {e}");
                self.lines_skipped += 1;
                false
            }
        }
    }

    /// Feed one parsed message; returns whether a record was merged
    pub fn add_message(&mut self, message: &Value) -> bool {
        if message.get("type").and_then(Value::as_str) != Some("RECORD") {
            return false;
        }
        let (Some(stream), Some(record)) = (
            message.get("stream").and_then(Value::as_str),
            message.get("record"),
        ) else {
            return false;
        };

        if !self.inferrers.contains_key(stream) {
            self.order.push(stream.to_string());
        }
        self.inferrers
            .entry(stream.to_string())
            .or_default()
            .add_object(record);
        true
    }

    /// Consume a reader to its end
    pub fn consume<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    self.add_line(&line);
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    debug!("Skipping non UTF-8 line");
                    self.lines_skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Stream names in first-seen order
    pub fn streams(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Accumulated schema for a stream
    pub fn schema(&self, stream: &str) -> Option<JsonSchema> {
        self.inferrers.get(stream).map(SchemaInferrer::schema)
    }

    /// Records merged for a stream
    pub fn record_count(&self, stream: &str) -> usize {
        self.inferrers
            .get(stream)
            .map_or(0, SchemaInferrer::record_count)
    }

    /// Lines dropped as unparseable
    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }

    /// Write `name`, pretty schema, blank line for every stream
    pub fn write_report<W: Write>(&self, mut out: W) -> Result<()> {
        for stream in &self.order {
            if let Some(inferrer) = self.inferrers.get(stream) {
                writeln!(out, "{stream}")?;
                writeln!(out, "{}", serde_json::to_string_pretty(&inferrer.schema())?)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}
