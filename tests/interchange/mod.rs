//! Export tests
//!
//! - Serializer filtering and projection
//! - End-to-end documents for small sources
//! - Graph conversion of emitted documents

pub mod tests_graph;
pub mod tests_serializer;
