//! Timeline reconstruction engine: pure functions from raw match data to
//! [`model::AnalyzedMatch`] records.

pub mod extractor;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod timeline;
