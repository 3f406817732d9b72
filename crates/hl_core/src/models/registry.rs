//! # Highlight Registry Model
//!
//! The final ordered clip manifest handed to the rendering collaborator,
//! plus its persisted flat CSV form. The CSV bytes are the durable record
//! re-read on idempotence checks, so encoding must be fully deterministic:
//! fixed header, fixed row order, no timestamps or run-specific state.

use serde::{Deserialize, Serialize};

use super::candidate::Category;
use super::window::ClipWindow;
use crate::error::{PipelineError, Result};

/// Separator for the `source_candidate_ids` CSV column.
const SOURCE_ID_SEPARATOR: &str = ";";

/// Ordered clip manifest for one match run.
///
/// Ordering contract: `player_id` ascending, then category in declared
/// priority order, then `rank` ascending. Rebuilding from identical input
/// and configuration yields byte-identical CSV output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRegistry {
    /// Artifact schema version (e.g. "v1")
    pub schema_version: String,
    /// Clip windows in registry order
    pub windows: Vec<ClipWindow>,
}

/// Flat row shape of the persisted artifact. One row per clip window.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryRow {
    player_id: u32,
    category: String,
    rank: u32,
    video_id: String,
    window_start_ms: u64,
    window_end_ms: u64,
    source_candidate_ids: String,
}

impl HighlightRegistry {
    /// Number of clip windows in the manifest.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// True when the manifest holds no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Encode the registry as the flat CSV artifact.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for window in &self.windows {
            let ids: Vec<String> = window
                .source_candidate_ids
                .iter()
                .map(|id| id.to_string())
                .collect();
            writer.serialize(RegistryRow {
                player_id: window.player_id,
                category: window.category.as_str().to_string(),
                rank: window.rank,
                video_id: window.video_id.clone(),
                window_start_ms: window.window_start_ms,
                window_end_ms: window.window_end_ms,
                source_candidate_ids: ids.join(SOURCE_ID_SEPARATOR),
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| PipelineError::RegistryEncode(e.to_string()))
    }

    /// Decode a previously persisted CSV artifact.
    pub fn from_csv_bytes(bytes: &[u8], schema_version: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(bytes);
        let mut windows = Vec::new();
        for row in reader.deserialize::<RegistryRow>() {
            let row = row?;
            let category = Category::from_name(&row.category).ok_or_else(|| {
                PipelineError::RegistryDecode(format!("unknown category: {}", row.category))
            })?;
            let mut source_candidate_ids = Vec::new();
            for part in row.source_candidate_ids.split(SOURCE_ID_SEPARATOR) {
                let id = part.trim().parse::<u64>().map_err(|_| {
                    PipelineError::RegistryDecode(format!("bad source id: {part}"))
                })?;
                source_candidate_ids.push(id);
            }
            windows.push(ClipWindow {
                video_id: row.video_id,
                player_id: row.player_id,
                category,
                rank: row.rank,
                window_start_ms: row.window_start_ms,
                window_end_ms: row.window_end_ms,
                source_candidate_ids,
            });
        }
        Ok(HighlightRegistry {
            schema_version: schema_version.to_string(),
            windows,
        })
    }
}
