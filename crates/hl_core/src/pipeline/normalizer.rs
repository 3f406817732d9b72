//! # Event Normalizer
//!
//! Flattens raw rally → shots records into validated `ShotEvent`s.
//!
//! Fatal: a stream with no session video identifier aborts the run with
//! `MissingVideoIdentifier`; nothing downstream can clip without a video.
//! Everything else that is wrong with an individual shot record is a
//! `SkippedRecord` warning: partial data beats aborting a multi-hour
//! match ingestion.

use std::collections::BTreeMap;

use crate::error::{PipelineError, PipelineReport, Result, RunWarning};
use crate::models::raw::{RawEnvelope, RawRally, RawShot};
use crate::models::{ShotEvent, ShotType};

/// Normalized view of one match: the flat event stream plus the media
/// bounds the window resolver clamps against.
#[derive(Debug, Clone)]
pub struct NormalizedMatch {
    /// Events sorted ascending by start_ms within each video_id
    pub events: Vec<ShotEvent>,
    /// Media duration per video: session-reported when available,
    /// otherwise the max end_ms observed (clamping is then a no-op)
    pub video_durations: BTreeMap<String, u64>,
}

/// Normalize the raw JSONL stream into a flat, validated event sequence.
pub fn normalize(lines: &[RawEnvelope], report: &mut PipelineReport) -> Result<NormalizedMatch> {
    let session = lines
        .iter()
        .filter_map(|line| line.payload().stats.as_ref())
        .find_map(|stats| stats.session.as_ref());

    let video_id = session
        .and_then(|s| s.vid.clone())
        .ok_or(PipelineError::MissingVideoIdentifier)?;
    let reported_duration = session.and_then(|s| s.duration_ms);

    let rallies: Vec<&RawRally> = lines
        .iter()
        .filter_map(|line| line.payload().insights.as_ref())
        .flat_map(|insights| insights.rallies.iter())
        .collect();

    // (video_id, start_ms, rally_id, shot index) keys; ids are assigned
    // after the sort so they derive from content, not processing order.
    let mut keyed: Vec<((String, u64, u32, usize), ShotEvent)> = Vec::new();

    for (rally_idx, rally) in rallies.iter().enumerate() {
        let rally_id = rally_idx as u32;
        let serve_idx = rally.shots.iter().position(RawShot::has_serve_tag);

        for (shot_idx, shot) in rally.shots.iter().enumerate() {
            match normalize_shot(shot, shot_idx, serve_idx, rally_id, &video_id) {
                Ok(event) => {
                    let key = (event.video_id.clone(), event.start_ms, rally_id, shot_idx);
                    keyed.push((key, event));
                }
                Err(detail) => {
                    report.warn(RunWarning::SkippedRecord { rally_id, detail });
                }
            }
        }
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut events = Vec::with_capacity(keyed.len());
    for (event_id, (_, mut event)) in keyed.into_iter().enumerate() {
        event.event_id = event_id as u64;
        events.push(event);
    }

    // Session-reported duration, raised to the max observed end_ms so the
    // resolver's clamp can never invert a window on bad metadata. Even an
    // empty match keeps its video entry so the resolver has a bound.
    let mut video_durations = BTreeMap::new();
    video_durations.insert(video_id, reported_duration.unwrap_or(0));
    for event in &events {
        let entry = video_durations.entry(event.video_id.clone()).or_insert(0);
        *entry = (*entry).max(event.end_ms);
    }

    report.normalized_events = events.len() as u32;
    Ok(NormalizedMatch {
        events,
        video_durations,
    })
}

/// Validate and convert one raw shot. `Err` carries the skip reason.
fn normalize_shot(
    shot: &RawShot,
    shot_idx: usize,
    serve_idx: Option<usize>,
    rally_id: u32,
    video_id: &str,
) -> std::result::Result<ShotEvent, String> {
    let player_id = shot
        .player_id
        .as_ref()
        .ok_or_else(|| "missing player_id".to_string())?
        .canonical()
        .ok_or_else(|| "unmappable player_id".to_string())?;

    let start_ms = shot.start_ms.ok_or_else(|| "missing start_ms".to_string())?;
    let end_ms = shot.end_ms.ok_or_else(|| "missing end_ms".to_string())?;
    if end_ms <= start_ms {
        return Err(format!("non-positive duration: {start_ms}..{end_ms}"));
    }

    let movement = shot
        .resulting_ball_movement
        .as_ref()
        .filter(|m| m.trajectory.is_some())
        .ok_or_else(|| "missing ball trajectory".to_string())?;
    let depth_ft = movement
        .distance
        .ok_or_else(|| "missing landing distance".to_string())?;
    let height_above_net_ft = movement
        .height_over_net
        .ok_or_else(|| "missing height over net".to_string())?;
    if !depth_ft.is_finite() || depth_ft < 0.0 {
        return Err(format!("unparseable depth: {depth_ft}"));
    }
    if !height_above_net_ft.is_finite() {
        return Err(format!("unparseable height: {height_above_net_ft}"));
    }

    let shot_type = resolve_shot_type(shot, shot_idx, serve_idx)?;

    Ok(ShotEvent {
        // Placeholder; the real id is assigned after the normalized sort.
        event_id: 0,
        player_id,
        shot_type,
        start_ms,
        end_ms,
        depth_ft,
        height_above_net_ft,
        quality_score: quality_score(shot),
        rally_id,
        video_id: video_id.to_string(),
    })
}

/// Shot role resolution. An explicit `shot_type` string wins when present
/// (unknown values skip the record); otherwise the role comes from the
/// serve-tag position, falling back to positional indices 0/1 when no
/// shot in the rally carries a serve tag.
fn resolve_shot_type(
    shot: &RawShot,
    shot_idx: usize,
    serve_idx: Option<usize>,
) -> std::result::Result<ShotType, String> {
    if let Some(raw) = shot.shot_type.as_deref() {
        return ShotType::from_raw(raw).ok_or_else(|| format!("unknown shot_type: {raw}"));
    }
    let serve_idx = serve_idx.unwrap_or(0);
    Ok(if shot_idx == serve_idx {
        ShotType::Serve
    } else if shot_idx == serve_idx + 1 {
        ShotType::Return
    } else {
        ShotType::Rally
    })
}

/// Quality in [0, 1]: the vision API's overall quality when present,
/// otherwise a score derived from rally-outcome flags.
fn quality_score(shot: &RawShot) -> f64 {
    if let Some(overall) = shot.quality.as_ref().and_then(|q| q.overall) {
        return overall.clamp(0.0, 1.0);
    }
    let mut score: f64 = 0.0;
    match shot.winner_type.as_deref() {
        Some("winner") | Some("clean") => score += 0.5,
        Some("forced_fault") => score += 0.35,
        _ => {}
    }
    if shot.is_final {
        score += 0.15;
    }
    if shot.is_volley {
        score += 0.1;
    }
    if shot.is_passing {
        score += 0.1;
    }
    score.min(1.0)
}
