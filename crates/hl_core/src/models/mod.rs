//! # Data Model Module
//!
//! Typed records passed between pipeline stages. Stage boundaries never
//! exchange untyped key/value maps; the raw vision-API input is the only
//! loosely shaped layer and it lives behind `raw`.
//!
//! - `raw` - vision API JSONL input shapes (unknown-field tolerant)
//! - `shot` - normalized `ShotEvent` and the `ShotType` closed set
//! - `candidate` - `Category` closed set and `HighlightCandidate`
//! - `window` - resolved `ClipWindow` boundaries
//! - `registry` - ordered `HighlightRegistry` manifest and its CSV form

pub mod candidate;
pub mod raw;
pub mod registry;
pub mod shot;
pub mod window;

pub use candidate::{Category, HighlightCandidate};
pub use raw::{RawEnvelope, RawPayload, RawPlayerId, RawShot};
pub use registry::HighlightRegistry;
pub use shot::{ShotEvent, ShotType};
pub use window::ClipWindow;
