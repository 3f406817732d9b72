//! # Registry Builder
//!
//! Assembles the final ordered clip manifest handed to the rendering
//! collaborator. Ordering is a total order derived entirely from the
//! data: player ascending, category in declared priority order, rank
//! ascending, then video and start as tie-breakers. Rebuilding from the
//! same inputs is therefore byte-identical. No video I/O happens here;
//! whether a referenced media file exists is the renderer's concern.

use crate::models::{ClipWindow, HighlightRegistry};

/// Build the ordered registry from resolved clip windows.
pub fn build_registry(mut windows: Vec<ClipWindow>, schema_version: &str) -> HighlightRegistry {
    windows.sort_by(|a, b| {
        a.player_id
            .cmp(&b.player_id)
            .then(a.category.cmp(&b.category))
            .then(a.rank.cmp(&b.rank))
            .then(a.video_id.cmp(&b.video_id))
            .then(a.window_start_ms.cmp(&b.window_start_ms))
    });
    HighlightRegistry {
        schema_version: schema_version.to_string(),
        windows,
    }
}
