//! Property-based tests over the full pipeline: determinism, cap
//! enforcement, and window bounds hold for arbitrary well-formed input
//! streams.

use proptest::prelude::*;

use hl_core::{run_pipeline, PipelineReport, RawEnvelope, SelectionConfig};

/// Build a raw JSONL stream from generated shot tuples:
/// (player_id, start_ms, duration_ms, quality).
fn make_stream(shots_per_rally: &[Vec<(u32, u64, u64, f64)>], duration_ms: u64) -> Vec<RawEnvelope> {
    let rallies: Vec<serde_json::Value> = shots_per_rally
        .iter()
        .map(|shots| {
            let shots: Vec<serde_json::Value> = shots
                .iter()
                .map(|&(player_id, start_ms, dur, quality)| {
                    serde_json::json!({
                        "player_id": player_id,
                        "start_ms": start_ms,
                        "end_ms": start_ms + dur,
                        "quality": {"overall": quality},
                        "resulting_ball_movement": {
                            "distance": 5.0,
                            "height_over_net": 1.0,
                            "trajectory": []
                        }
                    })
                })
                .collect();
            serde_json::json!({"shots": shots})
        })
        .collect();

    let lines = vec![
        serde_json::json!({
            "payload": {"stats": {"session": {"vid": "prop_vid", "duration_ms": duration_ms}}}
        }),
        serde_json::json!({"payload": {"insights": {"rallies": rallies}}}),
    ];
    lines
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("valid envelope"))
        .collect()
}

fn rally_strategy() -> impl Strategy<Value = Vec<(u32, u64, u64, f64)>> {
    prop::collection::vec(
        (0u32..4, 0u64..600_000, 200u64..3000, 0.0f64..1.0),
        1..8,
    )
}

proptest! {
    /// Running twice over the same stream yields byte-identical CSV.
    #[test]
    fn prop_rerun_is_byte_identical(
        rallies in prop::collection::vec(rally_strategy(), 1..6)
    ) {
        let lines = make_stream(&rallies, 700_000);
        let config = SelectionConfig::default();

        let mut report_a = PipelineReport::new();
        let first = run_pipeline(&lines, &config, "v1", &mut report_a).unwrap();
        let mut report_b = PipelineReport::new();
        let second = run_pipeline(&lines, &config, "v1", &mut report_b).unwrap();

        prop_assert_eq!(
            first.to_csv_bytes().unwrap(),
            second.to_csv_bytes().unwrap()
        );
    }

    /// Per (player, category) window counts never exceed the configured cap.
    #[test]
    fn prop_caps_hold_after_merging(
        rallies in prop::collection::vec(rally_strategy(), 1..6)
    ) {
        let lines = make_stream(&rallies, 700_000);
        let config = SelectionConfig::default();
        let mut report = PipelineReport::new();
        let registry = run_pipeline(&lines, &config, "v1", &mut report).unwrap();

        let mut counts = std::collections::BTreeMap::new();
        for window in &registry.windows {
            *counts.entry((window.player_id, window.category)).or_insert(0u32) += 1;
        }
        for ((_, category), count) in counts {
            prop_assert!(count <= config.rule(category).max_candidates_per_player);
        }
    }

    /// Every window satisfies 0 <= start < end <= video duration, and its
    /// source id set is non-empty, sorted, and deduped.
    #[test]
    fn prop_window_bounds_and_sources(
        rallies in prop::collection::vec(rally_strategy(), 1..6)
    ) {
        let duration_ms = 700_000u64;
        let lines = make_stream(&rallies, duration_ms);
        let config = SelectionConfig::default();
        let mut report = PipelineReport::new();
        let registry = run_pipeline(&lines, &config, "v1", &mut report).unwrap();

        for window in &registry.windows {
            prop_assert!(window.window_start_ms < window.window_end_ms);
            prop_assert!(window.window_end_ms <= duration_ms);
            prop_assert!(!window.source_candidate_ids.is_empty());
            let mut sorted = window.source_candidate_ids.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(&sorted, &window.source_candidate_ids);
        }
    }

    /// Ranks are dense 1..=N within every (player, category).
    #[test]
    fn prop_ranks_dense(
        rallies in prop::collection::vec(rally_strategy(), 1..6)
    ) {
        let lines = make_stream(&rallies, 700_000);
        let config = SelectionConfig::default();
        let mut report = PipelineReport::new();
        let registry = run_pipeline(&lines, &config, "v1", &mut report).unwrap();

        let mut ranks = std::collections::BTreeMap::new();
        for window in &registry.windows {
            ranks
                .entry((window.player_id, window.category))
                .or_insert_with(Vec::new)
                .push(window.rank);
        }
        for (_, group) in ranks {
            let expected: Vec<u32> = (1..=group.len() as u32).collect();
            prop_assert_eq!(group, expected);
        }
    }
}
