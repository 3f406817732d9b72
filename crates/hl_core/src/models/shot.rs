//! # Shot Event Model
//!
//! Normalized per-shot records produced by the event normalizer.
//! One `ShotEvent` is one player action inside a rally; events are
//! immutable once normalization has assigned their ids.

use serde::{Deserialize, Serialize};

/// Role of a shot within its rally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Serve,
    Return,
    Rally,
}

impl ShotType {
    /// Parse a raw shot-type string from the vision API.
    ///
    /// Returns `None` for unrecognized values; the normalizer skips
    /// those records rather than guessing.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "serve" => Some(ShotType::Serve),
            "return" | "receive" => Some(ShotType::Return),
            "rally" => Some(ShotType::Rally),
            _ => None,
        }
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Serve => "serve",
            ShotType::Return => "return",
            ShotType::Rally => "rally",
        }
    }
}

/// One normalized player action inside a rally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    /// Stable id assigned after the normalized sort; a pure function of
    /// input content, so reruns assign identical ids.
    pub event_id: u64,
    /// Canonical player id within this match (not globally unique).
    pub player_id: u32,
    pub shot_type: ShotType,
    /// Start timestamp in milliseconds
    pub start_ms: u64,
    /// End timestamp in milliseconds (always > start_ms)
    pub end_ms: u64,
    /// Landing distance short of the far baseline in feet (lower = deeper)
    pub depth_ft: f64,
    /// Clearance over the net in feet; negative means netted
    pub height_above_net_ft: f64,
    /// Normalized quality in [0, 1], from the vision API or the
    /// outcome-flag fallback scorer
    pub quality_score: f64,
    pub rally_id: u32,
    pub video_id: String,
}

impl ShotEvent {
    /// Duration of the shot in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}
