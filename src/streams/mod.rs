//! Stream catalog module
//!
//! # Overview
//!
//! A `StreamDescriptor` is the static description of one stream: where it
//! lives, which API generation serves it, its key and its record schema.
//! Descriptors come from the built-in table embedded in the binary or
//! from an OpenAPI document, and are advertised as a Singer `Catalog`.

mod builtin;
mod catalog;
mod descriptor;
mod openapi;

pub use builtin::{builtin_schema, builtin_streams, list_builtin, BUILTIN_STREAMS_YAML};
pub use catalog::{select_by_name, Catalog, CatalogEntry, MetadataEntry};
pub use descriptor::{
    open_object_schema, parse_stream_definitions, StreamDefinition, StreamDefinitions,
    StreamDescriptor,
};
pub use openapi::{discover_openapi, load_openapi};

#[cfg(test)]
mod tests;
