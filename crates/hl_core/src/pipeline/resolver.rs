//! # Window Resolver
//!
//! Expands each candidate into a padded clip window clamped to the media
//! bounds, then merges same-category collisions. Windows from different
//! categories that overlap are kept apart on purpose: they are distinct
//! viewpoints of similar footage, not duplicates. Within one category an
//! overlap (or a gap at or under `merge_gap_ms`) collapses into a single
//! multi-viewpoint window carrying the union of ranges and source ids.

use std::collections::BTreeMap;

use crate::config::SelectionConfig;
use crate::models::{Category, ClipWindow, HighlightCandidate};

/// Resolve candidates into clip windows. `video_durations` supplies the
/// clamp bound per video.
pub fn resolve(
    candidates: &[HighlightCandidate],
    video_durations: &BTreeMap<String, u64>,
    config: &SelectionConfig,
) -> Vec<ClipWindow> {
    // Merge scope is (player, video, category); the cap and rank
    // densification apply per (player, category) across videos. BTreeMaps
    // keep group order deterministic.
    let mut groups: BTreeMap<(u32, Category), BTreeMap<String, Vec<ClipWindow>>> = BTreeMap::new();

    for candidate in candidates {
        let rule = config.rule(candidate.category);
        let padding = rule.context_padding_ms;
        let duration = video_durations
            .get(&candidate.video_id)
            .copied()
            .unwrap_or(u64::MAX);

        let window_start_ms = candidate.start_ms.saturating_sub(padding);
        let window_end_ms = candidate.end_ms.saturating_add(padding).min(duration);

        groups
            .entry((candidate.player_id, candidate.category))
            .or_default()
            .entry(candidate.video_id.clone())
            .or_default()
            .push(ClipWindow {
                video_id: candidate.video_id.clone(),
                player_id: candidate.player_id,
                category: candidate.category,
                rank: candidate.rank,
                window_start_ms,
                window_end_ms,
                source_candidate_ids: vec![candidate.event_id],
            });
    }

    let mut resolved = Vec::new();
    for ((_, category), per_video) in groups {
        let rule = config.rule(category);
        let mut merged = Vec::new();
        for (_, windows) in per_video {
            merged.extend(merge_windows(windows, rule.merge_gap_ms));
        }
        resolved.extend(enforce_cap(merged, rule.max_candidates_per_player));
    }
    resolved
}

/// Sweep-merge windows of one (player, video, category) group.
fn merge_windows(mut windows: Vec<ClipWindow>, merge_gap_ms: u64) -> Vec<ClipWindow> {
    windows.sort_by(|a, b| {
        a.window_start_ms
            .cmp(&b.window_start_ms)
            .then(a.window_end_ms.cmp(&b.window_end_ms))
            .then(a.rank.cmp(&b.rank))
    });

    let mut merged: Vec<ClipWindow> = Vec::with_capacity(windows.len());
    for window in windows {
        match merged.last_mut() {
            Some(current)
                if window.window_start_ms <= current.window_end_ms.saturating_add(merge_gap_ms) =>
            {
                // Union of ranges and sources; the merged clip keeps the
                // better (smaller) rank.
                current.window_end_ms = current.window_end_ms.max(window.window_end_ms);
                current.rank = current.rank.min(window.rank);
                current
                    .source_candidate_ids
                    .extend(window.source_candidate_ids);
            }
            _ => merged.push(window),
        }
    }

    for window in &mut merged {
        window.source_candidate_ids.sort_unstable();
        window.source_candidate_ids.dedup();
    }
    merged
}

/// Merging can reduce the count, but the cap is re-checked afterward:
/// lowest-ranked windows beyond it are dropped, and surviving ranks are
/// re-densified to 1..=N so the registry key space has no holes.
fn enforce_cap(mut windows: Vec<ClipWindow>, cap: u32) -> Vec<ClipWindow> {
    windows.sort_by_key(|w| w.rank);
    windows.truncate(cap as usize);
    for (idx, window) in windows.iter_mut().enumerate() {
        window.rank = idx as u32 + 1;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryRule;

    fn make_candidate(
        event_id: u64,
        player_id: u32,
        category: Category,
        rank: u32,
        start_ms: u64,
        end_ms: u64,
    ) -> HighlightCandidate {
        HighlightCandidate {
            event_id,
            player_id,
            category,
            rank,
            video_id: "vid1".to_string(),
            start_ms,
            end_ms,
            quality_score: 0.9,
        }
    }

    fn durations(duration_ms: u64) -> BTreeMap<String, u64> {
        let mut map = BTreeMap::new();
        map.insert("vid1".to_string(), duration_ms);
        map
    }

    fn zero_padding_config() -> SelectionConfig {
        let mut config = SelectionConfig::default();
        for cat in Category::ALL {
            let mut rule = config.rule(cat).clone();
            rule.context_padding_ms = 0;
            rule.merge_gap_ms = 0;
            config.set_rule(cat, rule);
        }
        config
    }

    #[test]
    fn test_padding_and_clamping() {
        let mut config = SelectionConfig::default();
        let mut rule = CategoryRule::default_for(Category::BestShot);
        rule.context_padding_ms = 2000;
        config.set_rule(Category::BestShot, rule);

        let candidates = vec![
            make_candidate(0, 0, Category::BestShot, 1, 500, 1000),
            make_candidate(1, 0, Category::BestShot, 2, 58_000, 59_500),
        ];
        let windows = resolve(&candidates, &durations(60_000), &config);

        assert_eq!(windows.len(), 2);
        // Left edge clamps to 0, right edge to the video duration.
        assert_eq!(windows[0].window_start_ms, 0);
        assert_eq!(windows[0].window_end_ms, 3000);
        assert_eq!(windows[1].window_start_ms, 56_000);
        assert_eq!(windows[1].window_end_ms, 60_000);
    }

    #[test]
    fn test_same_category_overlap_merges() {
        // Windows [1000,3000] and [2500,4000] with merge gap 0 collapse
        // into one window [1000,4000] carrying both source ids.
        let candidates = vec![
            make_candidate(10, 2, Category::BestShot, 1, 1000, 3000),
            make_candidate(11, 2, Category::BestShot, 2, 2500, 4000),
        ];
        let windows = resolve(&candidates, &durations(100_000), &zero_padding_config());

        assert_eq!(windows.len(), 1);
        let merged = &windows[0];
        assert_eq!(merged.window_start_ms, 1000);
        assert_eq!(merged.window_end_ms, 4000);
        assert_eq!(merged.source_candidate_ids, vec![10, 11]);
        assert_eq!(merged.rank, 1);
        assert!(merged.is_merged());
    }

    #[test]
    fn test_cross_category_overlap_kept_separate() {
        let candidates = vec![
            make_candidate(10, 2, Category::BestShot, 1, 1000, 3000),
            make_candidate(11, 2, Category::ServeContext, 1, 2500, 4000),
        ];
        let windows = resolve(&candidates, &durations(100_000), &zero_padding_config());
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| !w.is_merged()));
    }

    #[test]
    fn test_merge_gap_threshold() {
        let mut config = zero_padding_config();
        let mut rule = config.rule(Category::Rally).clone();
        rule.merge_gap_ms = 500;
        config.set_rule(Category::Rally, rule);

        let candidates = vec![
            make_candidate(0, 0, Category::Rally, 1, 1000, 2000),
            // 400ms gap: merges under the 500ms threshold.
            make_candidate(1, 0, Category::Rally, 2, 2400, 3000),
            // 600ms gap: stays separate.
            make_candidate(2, 0, Category::Rally, 3, 3600, 4200),
        ];
        let windows = resolve(&candidates, &durations(100_000), &config);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].window_end_ms, 3000);
        assert_eq!(windows[0].source_candidate_ids, vec![0, 1]);
        assert_eq!(windows[1].source_candidate_ids, vec![2]);
    }

    #[test]
    fn test_cap_rechecked_after_merge() {
        let mut config = zero_padding_config();
        let mut rule = config.rule(Category::Rally).clone();
        rule.max_candidates_per_player = 2;
        config.set_rule(Category::Rally, rule);

        let candidates = vec![
            make_candidate(0, 0, Category::Rally, 1, 1000, 2000),
            make_candidate(1, 0, Category::Rally, 2, 5000, 6000),
            make_candidate(2, 0, Category::Rally, 3, 9000, 10_000),
        ];
        let windows = resolve(&candidates, &durations(100_000), &config);

        // No merges happened, so the cap drops the lowest-ranked window.
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].source_candidate_ids, vec![0]);
        assert_eq!(windows[1].source_candidate_ids, vec![1]);
        // Ranks stay dense after the drop.
        assert_eq!(windows[0].rank, 1);
        assert_eq!(windows[1].rank, 2);
    }

    #[test]
    fn test_chain_merge_collapses_transitively() {
        let candidates = vec![
            make_candidate(0, 0, Category::BestShot, 3, 1000, 2000),
            make_candidate(1, 0, Category::BestShot, 1, 1500, 2600),
            make_candidate(2, 0, Category::BestShot, 2, 2500, 3500),
        ];
        let windows = resolve(&candidates, &durations(100_000), &zero_padding_config());

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].window_start_ms, 1000);
        assert_eq!(windows[0].window_end_ms, 3500);
        assert_eq!(windows[0].source_candidate_ids, vec![0, 1, 2]);
        assert_eq!(windows[0].rank, 1);
    }

    #[test]
    fn test_players_do_not_merge_with_each_other() {
        let candidates = vec![
            make_candidate(0, 0, Category::BestShot, 1, 1000, 3000),
            make_candidate(1, 1, Category::BestShot, 1, 2000, 4000),
        ];
        let windows = resolve(&candidates, &durations(100_000), &zero_padding_config());
        assert_eq!(windows.len(), 2);
    }
}
