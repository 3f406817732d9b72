//! # Pipeline Errors and Warnings
//!
//! Fatal errors unwind the whole run with no partial registry written.
//! Recoverable issues are accumulated into a `PipelineReport` (counts plus
//! a bounded list of examples) and logged where they occur, so a multi-hour
//! match ingestion is never aborted over a single bad record.

use std::fmt;

use thiserror::Error;

/// Fatal pipeline errors. Any of these aborts the run; no artifact is
/// produced.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No source video reference in the input stream. Without a video
    /// there is nothing to clip from, so this is never recoverable.
    #[error("missing video identifier: no clip can be produced without a source video")]
    MissingVideoIdentifier,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry encode error: {0}")]
    RegistryEncode(String),

    #[error("registry decode error: {0}")]
    RegistryDecode(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Recoverable issues surfaced to the operator alongside the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// A shot/rally record was dropped; processing continued
    SkippedRecord { rally_id: u32, detail: String },
    /// Configuration referenced an unrecognized category
    ConfigurationKeyIgnored { key: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunWarning::SkippedRecord { rally_id, detail } => {
                write!(f, "skipped record in rally {rally_id}: {detail}")
            }
            RunWarning::ConfigurationKeyIgnored { key } => {
                write!(f, "ignored unrecognized configuration key: {key}")
            }
        }
    }
}

/// Cap on retained warning examples; counts keep accumulating past it.
const MAX_WARNING_EXAMPLES: usize = 20;

/// Accumulated run accounting, in the spirit of a parse-stats summary:
/// the operator inspects counts and examples rather than the pipeline
/// halting on recoverable input.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Total shot records accepted by the normalizer
    pub normalized_events: u32,
    /// Records dropped with a `SkippedRecord` warning
    pub skipped_records: u32,
    /// Unrecognized configuration categories ignored
    pub ignored_config_keys: u32,
    /// First `MAX_WARNING_EXAMPLES` warnings, for diagnosis
    pub examples: Vec<RunWarning>,
}

impl PipelineReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning: bump the matching counter, keep an example if
    /// the cap allows, and emit it through the log facade.
    pub fn warn(&mut self, warning: RunWarning) {
        log::warn!("{warning}");
        match &warning {
            RunWarning::SkippedRecord { .. } => self.skipped_records += 1,
            RunWarning::ConfigurationKeyIgnored { .. } => self.ignored_config_keys += 1,
        }
        if self.examples.len() < MAX_WARNING_EXAMPLES {
            self.examples.push(warning);
        }
    }

    /// True when the run produced no recoverable warnings.
    pub fn is_clean(&self) -> bool {
        self.skipped_records == 0 && self.ignored_config_keys == 0
    }
}
