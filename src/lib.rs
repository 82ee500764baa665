//! Coaching analytics over League of Legends match timelines.
//!
//! Raw match and timeline payloads enter through [`api::models`], are turned
//! into [`engine::model::AnalyzedMatch`] records by [`engine::pipeline`], and
//! are then read by the pure reports in [`analysis`].

pub mod analysis;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod items;
pub mod plot;
pub mod store;
