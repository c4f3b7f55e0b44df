//! Export artifact shapes.
//!
//! Both representations come from the same engine pass: the flat merged
//! sequence (what the downstream consumer ingests) and the bucket map.
//! In the bucketed shape, quarantined records appear under the reserved
//! unrecognized sentinel key as the final entry — surfaced in the
//! artifact, never dropped. Writing the artifact to a timestamped file is
//! the caller's job; [`artifact_name`] only renders the conventional name.

use crate::bucket::{BucketKeys, Bucketed};
use crate::error::ExportError;
use crate::types::LogRecord;
use serde_json::{Map, Value};
use std::io::Write;

/// The flat merged sequence as one JSON array.
pub fn flat(records: &[LogRecord]) -> Value {
    Value::Array(records.iter().map(LogRecord::to_value).collect())
}

/// The bucket map as a JSON object in first-seen key order, with the
/// unrecognized side list appended under `keys.unrecognized` when
/// non-empty.
pub fn bucketed(bucketed: &Bucketed<'_>, keys: &BucketKeys) -> Value {
    let mut out = Map::new();
    for (key, records) in bucketed.buckets.iter() {
        out.insert(
            key.to_string(),
            Value::Array(records.iter().map(|r| r.to_value()).collect()),
        );
    }
    if !bucketed.unrecognized.is_empty() {
        out.insert(
            keys.unrecognized.clone(),
            Value::Array(bucketed.unrecognized.iter().map(|r| r.to_value()).collect()),
        );
    }
    Value::Object(out)
}

/// Write the flat artifact to `writer`.
pub fn write_flat<W: Write>(
    writer: W,
    records: &[LogRecord],
    pretty: bool,
) -> Result<(), ExportError> {
    write_value(writer, &flat(records), pretty)
}

/// Write the bucketed artifact to `writer`.
pub fn write_bucketed<W: Write>(
    writer: W,
    buckets: &Bucketed<'_>,
    keys: &BucketKeys,
    pretty: bool,
) -> Result<(), ExportError> {
    write_value(writer, &bucketed(buckets, keys), pretty)
}

fn write_value<W: Write>(writer: W, value: &Value, pretty: bool) -> Result<(), ExportError> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

/// The conventional artifact file name: `<stem>-<UTC timestamp>.json`.
pub fn artifact_name(stem: &str, at: chrono::DateTime<chrono::Utc>) -> String {
    format!("{stem}-{}.json", at.format("%Y-%m-%dT%H.%M.%S"))
}
