//! Schema inference module
//!
//! Builds JSON schemas from example records.
//!
//! # Features
//!
//! - **Type Unions**: a property seen with several types accepts all of them
//! - **Nested Merging**: objects and array items are merged recursively
//! - **Required Tracking**: properties present in every object are required
//! - **Date-time Detection**: consistent timestamp strings get a format
//! - **Stream Accumulation**: one schema per stream from tap output

mod accumulator;
mod inference;
mod types;

pub use accumulator::SchemaAccumulator;
pub use inference::{infer_schema, SchemaInferrer};
pub use types::{JsonSchema, JsonType, SchemaNode, TypeSet, SCHEMA_DRAFT};
