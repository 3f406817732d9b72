//! # Clip Window Model
//!
//! A `ClipWindow` is a resolved, padded time range derived from one or
//! more highlight candidates. Windows are the unit the rendering
//! collaborator trims and concatenates.

use serde::{Deserialize, Serialize};

use super::candidate::Category;

/// A resolved clip boundary within one source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub video_id: String,
    pub player_id: u32,
    pub category: Category,
    /// Dense rank 1..=N within (player_id, category), re-densified after
    /// merging and cap enforcement
    pub rank: u32,
    /// Padded start, clamped to 0
    pub window_start_ms: u64,
    /// Padded end, clamped to the video duration
    pub window_end_ms: u64,
    /// Source candidate event ids, sorted ascending. Length > 1 means
    /// overlapping same-category candidates were merged into one clip
    /// (multi-viewpoint annotation for the renderer).
    pub source_candidate_ids: Vec<u64>,
}

impl ClipWindow {
    /// Window length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.window_end_ms.saturating_sub(self.window_start_ms)
    }

    /// True when this window was merged from multiple candidates.
    pub fn is_merged(&self) -> bool {
        self.source_candidate_ids.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_flag() {
        let mut window = ClipWindow {
            video_id: "vid1".to_string(),
            player_id: 2,
            category: Category::BestShot,
            rank: 1,
            window_start_ms: 1000,
            window_end_ms: 4000,
            source_candidate_ids: vec![3],
        };
        assert!(!window.is_merged());
        assert_eq!(window.duration_ms(), 3000);

        window.source_candidate_ids.push(7);
        assert!(window.is_merged());
    }
}
