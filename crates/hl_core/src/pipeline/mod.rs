//! # Pipeline Module
//!
//! The four stages, each a pure function over finite in-memory
//! sequences, run in a fixed batch order:
//!
//! normalizer → selector → resolver → registry builder
//!
//! Each stage fully consumes its input before the next begins. There is
//! no shared mutable state between runs; a fatal error unwinds with `?`
//! and no partial registry escapes.
//!
//! - `normalizer` - raw rally records → validated `ShotEvent` stream
//! - `selector` - rule-driven ranking into `HighlightCandidate`s
//! - `resolver` - padded `ClipWindow`s, same-category merging, caps
//! - `registry` - deterministic ordering into the final manifest

pub mod normalizer;
pub mod registry;
pub mod resolver;
pub mod selector;

pub use normalizer::{normalize, NormalizedMatch};
pub use registry::build_registry;
pub use resolver::resolve;
pub use selector::select;

use crate::config::SelectionConfig;
use crate::error::{PipelineReport, Result};
use crate::models::{HighlightRegistry, RawEnvelope};

/// Run the full pipeline over one match's raw event stream.
///
/// Recoverable warnings accumulate into `report` (create it before
/// parsing configuration so ignored-key warnings land in the same
/// summary). Returns the ordered registry; rerunning with identical
/// input and configuration returns an identical registry.
pub fn run_pipeline(
    lines: &[RawEnvelope],
    config: &SelectionConfig,
    schema_version: &str,
    report: &mut PipelineReport,
) -> Result<HighlightRegistry> {
    let normalized = normalize(lines, report)?;
    let candidates = select(&normalized.events, config);
    let windows = resolve(&candidates, &normalized.video_durations, config);
    Ok(build_registry(windows, schema_version))
}
