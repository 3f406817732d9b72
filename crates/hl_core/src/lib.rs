//! # hl_core - Deterministic Highlight Selection Pipeline
//!
//! This library converts raw match-analytics records from a third-party
//! vision API into an ordered clip registry: the contract a downstream
//! rendering collaborator consumes to trim and concatenate highlight
//! reels per player.
//!
//! ## Features
//! - 100% deterministic output (same input + config = byte-identical registry)
//! - Closed-set categories and shot types (no duck-typed string dispatch)
//! - Fail-soft ingestion: bad records are skipped and summarized, never fatal
//! - Single fatal condition: an input stream with no video identifier
//!
//! ## Stages
//!
//! normalizer → selector → window resolver → registry builder
//!
//! See [`pipeline::run_pipeline`] for the batch entry point.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

// Re-export the main API surface
pub use config::{CategoryRule, SelectionConfig};
pub use error::{PipelineError, PipelineReport, Result, RunWarning};
pub use models::{
    Category, ClipWindow, HighlightCandidate, HighlightRegistry, RawEnvelope, ShotEvent, ShotType,
};
pub use pipeline::{run_pipeline, NormalizedMatch};
