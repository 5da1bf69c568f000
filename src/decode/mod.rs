//! Record extraction module
//!
//! # Overview
//!
//! Pulls the individual records out of a decoded page body using a
//! JSONPath expression such as `$.response.items[*]`.

mod extractor;

pub use extractor::{RecordExtractor, RecordTransform, Records};
