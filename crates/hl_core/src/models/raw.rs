//! # Raw Vision-API Input Model
//!
//! Typed view of the third-party vision API's match-analytics JSONL
//! stream. Every struct tolerates unknown fields (the feed adds keys
//! between versions), and every field the normalizer validates is
//! optional here so a malformed record can be skipped instead of
//! failing the whole deserialize.
//!
//! Envelope shapes seen in the wild:
//! - `{"payload": {"stats": ..., "insights": ...}}`
//! - bare payloads with `stats`/`insights` at the top level

use std::collections::BTreeMap;

use serde::Deserialize;

/// One line of the stats JSONL stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEnvelope {
    Wrapped { payload: RawPayload },
    Bare(RawPayload),
}

impl RawEnvelope {
    /// The payload, regardless of envelope shape.
    pub fn payload(&self) -> &RawPayload {
        match self {
            RawEnvelope::Wrapped { payload } => payload,
            RawEnvelope::Bare(payload) => payload,
        }
    }
}

/// Payload carrying session stats and/or rally insights.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(default)]
    pub insights: Option<RawInsights>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStats {
    #[serde(default)]
    pub session: Option<RawSession>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSession {
    /// Source video identifier; absence is fatal for the run
    #[serde(default)]
    pub vid: Option<String>,
    /// Media duration when the API reports it
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInsights {
    #[serde(default)]
    pub rallies: Vec<RawRally>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRally {
    #[serde(default)]
    pub shots: Vec<RawShot>,
}

/// One raw shot record. Field names follow the vision API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShot {
    #[serde(default)]
    pub player_id: Option<RawPlayerId>,
    #[serde(default)]
    pub shot_type: Option<String>,
    #[serde(default)]
    pub start_ms: Option<u64>,
    #[serde(default)]
    pub end_ms: Option<u64>,
    #[serde(default)]
    pub resulting_ball_movement: Option<RawBallMovement>,
    #[serde(default)]
    pub quality: Option<RawQuality>,
    #[serde(default)]
    pub winner_type: Option<String>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_volley: bool,
    #[serde(default)]
    pub is_passing: bool,
    /// Tag keys like "type;serve" mark the serving shot of a rally
    #[serde(default)]
    pub tags: BTreeMap<String, serde_json::Value>,
}

impl RawShot {
    /// True when any tag key marks this shot as the serve.
    pub fn has_serve_tag(&self) -> bool {
        self.tags.keys().any(|key| key.contains("type;serve"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBallMovement {
    /// Landing distance short of the far baseline, feet
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub height_over_net: Option<f64>,
    #[serde(default)]
    pub trajectory: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuality {
    #[serde(default)]
    pub overall: Option<f64>,
}

/// Player ids arrive as integers, numeric strings, or `player_N`
/// strings depending on feed version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPlayerId {
    Number(u64),
    Text(String),
}

impl RawPlayerId {
    /// Map any known id variant onto the canonical integer id.
    pub fn canonical(&self) -> Option<u32> {
        match self {
            RawPlayerId::Number(n) => u32::try_from(*n).ok(),
            RawPlayerId::Text(s) => {
                let trimmed = s.trim();
                let digits = trimmed.strip_prefix("player_").unwrap_or(trimmed);
                digits.parse::<u32>().ok()
            }
        }
    }
}
