//! # Highlight Selector
//!
//! Ranks and chooses candidate events per (player, category) under the
//! configured rules. Qualification gates on raw `quality_score` and shot
//! type; ordering adds weighted court-placement factors on top. Ranks are
//! dense 1..=N and fully determined by the event data, never by
//! processing order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::{CategoryRule, SelectionConfig};
use crate::models::{Category, HighlightCandidate, ShotEvent};

/// Court length in feet; the depth factor normalizes against it.
const COURT_LENGTH_FT: f64 = 44.0;

/// Net-clearance band in feet. Shots above it score zero on the height
/// factor; netted shots score zero outright.
const NET_CLEARANCE_BAND_FT: f64 = 3.0;

/// Select ranked highlight candidates for every player and category.
pub fn select(events: &[ShotEvent], config: &SelectionConfig) -> Vec<HighlightCandidate> {
    let mut candidates = Vec::new();

    for category in Category::ALL {
        let rule = config.rule(category);

        // Group qualifying shots per player; BTreeMap keeps player order
        // deterministic.
        let mut per_player: BTreeMap<u32, Vec<&ShotEvent>> = BTreeMap::new();
        for event in events {
            if qualifies(event, category, rule) {
                per_player.entry(event.player_id).or_default().push(event);
            }
        }

        for (player_id, mut shots) in per_player {
            shots.sort_by(|a, b| compare_for_selection(a, b, rule));
            shots.truncate(rule.max_candidates_per_player as usize);

            for (idx, shot) in shots.iter().enumerate() {
                candidates.push(HighlightCandidate {
                    event_id: shot.event_id,
                    player_id,
                    category,
                    rank: idx as u32 + 1,
                    video_id: shot.video_id.clone(),
                    start_ms: shot.start_ms,
                    end_ms: shot.end_ms,
                    quality_score: shot.quality_score,
                });
            }
        }
    }

    candidates
}

/// A shot qualifies when its quality clears the category threshold and
/// its type matches the category's expected type (best_shot accepts any).
fn qualifies(event: &ShotEvent, category: Category, rule: &CategoryRule) -> bool {
    if event.quality_score < rule.min_quality_score {
        return false;
    }
    match category.expected_shot_type() {
        Some(expected) => event.shot_type == expected,
        None => true,
    }
}

/// Ordering score: quality plus weighted placement factors.
fn selection_score(event: &ShotEvent, rule: &CategoryRule) -> f64 {
    event.quality_score
        + rule.weight_depth * depth_factor(event.depth_ft)
        + rule.weight_height * height_factor(event.height_above_net_ft)
}

/// Score desc, tie-break quality desc, then start_ms asc for determinism.
fn compare_for_selection(a: &ShotEvent, b: &ShotEvent, rule: &CategoryRule) -> Ordering {
    selection_score(b, rule)
        .total_cmp(&selection_score(a, rule))
        .then(b.quality_score.total_cmp(&a.quality_score))
        .then(a.start_ms.cmp(&b.start_ms))
}

/// Deeper placement (smaller distance short of the baseline) is better.
fn depth_factor(depth_ft: f64) -> f64 {
    ((COURT_LENGTH_FT - depth_ft) / COURT_LENGTH_FT).clamp(0.0, 1.0)
}

/// Lower net clearance is better; netted shots contribute nothing.
fn height_factor(height_ft: f64) -> f64 {
    if height_ft < 0.0 {
        return 0.0;
    }
    ((NET_CLEARANCE_BAND_FT - height_ft) / NET_CLEARANCE_BAND_FT).clamp(0.0, 1.0)
}
