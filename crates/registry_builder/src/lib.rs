//! Registry Builder Library
//!
//! Stats JSONL → highlight pipeline → registry CSV + SHA256 checksum
//! metadata. The CSV artifact is the durable record the rendering
//! collaborator consumes; the checksum supports the idempotence check
//! (rebuilding from unchanged input and configuration must reproduce the
//! artifact byte for byte).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use hl_core::{run_pipeline, PipelineReport, RawEnvelope, SelectionConfig};

/// Registry artifact metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 checksum of the CSV artifact (hex string)
    pub checksum: String,
    /// Build time (RFC3339). Lives only here, never in the artifact, so
    /// the registry bytes stay reproducible.
    pub created_at: String,
    /// Clip windows written
    pub clip_count: u64,
    /// Shot events accepted by the normalizer
    pub normalized_events: u32,
    /// Records dropped with a warning
    pub skipped_records: u32,
    /// Unrecognized configuration categories ignored
    pub ignored_config_keys: u32,
    /// Raw JSONL lines that failed to parse and were skipped
    pub malformed_lines: u32,
}

/// Load the raw stats JSONL stream.
///
/// Malformed lines are skipped with a warning and counted; an input with
/// no valid lines at all is an error.
pub fn load_json_lines(input: &Path) -> Result<(Vec<RawEnvelope>, u32)> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read stats file: {}", input.display()))?;

    let mut lines = Vec::new();
    let mut malformed = 0u32;
    for (line_num, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RawEnvelope>(line) {
            Ok(envelope) => lines.push(envelope),
            Err(e) => {
                malformed += 1;
                log::warn!("malformed JSON at line {}: {}", line_num + 1, e);
            }
        }
    }

    if lines.is_empty() {
        bail!("no valid JSON data found in {}", input.display());
    }
    Ok((lines, malformed))
}

/// Build the registry CSV artifact from a stats JSONL file.
///
/// # Arguments
///
/// * `input_jsonl` - raw vision-API stats stream
/// * `config_json` - optional rule configuration file (JSON object keyed
///   by category name); omitted keys use the documented defaults
/// * `output_csv` - registry artifact path
/// * `schema_version` - schema version string
///
/// # Returns
///
/// Metadata for the written artifact, including its checksum and the
/// run's warning accounting.
pub fn build_registry_artifact(
    input_jsonl: &Path,
    config_json: Option<&Path>,
    output_csv: &Path,
    schema_version: &str,
) -> Result<RegistryMetadata> {
    let (lines, malformed_lines) = load_json_lines(input_jsonl)?;

    let mut report = PipelineReport::new();
    let config = match config_json {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&text).context("Failed to parse config JSON")?;
            SelectionConfig::from_json_value(&value, &mut report)
        }
        None => SelectionConfig::default(),
    };

    let registry = run_pipeline(&lines, &config, schema_version, &mut report)
        .context("Pipeline run failed")?;
    let csv_bytes = registry
        .to_csv_bytes()
        .context("Failed to encode registry CSV")?;

    let mut hasher = Sha256::new();
    hasher.update(&csv_bytes);
    let checksum = format!("{:x}", hasher.finalize());

    if let Some(parent) = output_csv.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output_csv, &csv_bytes)
        .with_context(|| format!("Failed to write registry: {}", output_csv.display()))?;

    Ok(RegistryMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        clip_count: registry.len() as u64,
        normalized_events: report.normalized_events,
        skipped_records: report.skipped_records,
        ignored_config_keys: report.ignored_config_keys,
        malformed_lines,
    })
}

/// Verify a registry artifact against an expected checksum.
pub fn verify_registry(registry_csv: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(registry_csv)
        .with_context(|| format!("Failed to read registry: {}", registry_csv.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = format!("{:x}", hasher.finalize());
    Ok(actual == expected_checksum)
}
