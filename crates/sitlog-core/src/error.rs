//! Error taxonomy for the engine.
//!
//! Only structural failures are errors: a persisted collection that is
//! absent or not array-shaped aborts the merge with no partial output.
//! Per-record shape anomalies are not errors at all — the bucketing pass
//! quarantines them as data (see [`crate::bucket::Bucketed::unrecognized`]).

use crate::types::SourceId;
use thiserror::Error;

/// Fatal merge failure. Always names the input that failed.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("the {source_id} log collection could not be merged: {defect}")]
    MissingOrMalformedSource {
        source_id: SourceId,
        defect: SourceDefect,
    },
}

impl MergeError {
    /// Which of the two persisted collections failed.
    pub fn source_id(&self) -> SourceId {
        match self {
            MergeError::MissingOrMalformedSource { source_id, .. } => *source_id,
        }
    }
}

/// What exactly was wrong with a persisted collection value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDefect {
    /// The persisted key was absent or unreadable.
    Missing,
    /// The persisted value was not a JSON array.
    NotAnArray { found: &'static str },
    /// An element of the array was not a JSON object.
    NonObjectElement { index: usize, found: &'static str },
}

impl std::fmt::Display for SourceDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceDefect::Missing => write!(f, "persisted value is missing"),
            SourceDefect::NotAnArray { found } => {
                write!(f, "persisted value is {found}, expected an array")
            }
            SourceDefect::NonObjectElement { index, found } => {
                write!(f, "element {index} is {found}, expected an object")
            }
        }
    }
}

/// Failure to build or run a notes search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid date range {input:?}: {reason}")]
    DateRange { input: String, reason: String },
}

/// Failure to serialize an export artifact to a writer.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export artifact: {0}")]
    Write(#[from] serde_json::Error),
}
