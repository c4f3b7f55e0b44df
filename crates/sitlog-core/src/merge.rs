//! Record Merger — concatenates the two persisted log collections into one
//! provenance-tagged sequence.
//!
//! The output is always primary-then-mala, with every record wrapped in the
//! matching [`LogRecord`] variant. Both inputs must be readable JSON arrays
//! of objects; anything else fails the whole merge with
//! [`MergeError::MissingOrMalformedSource`] naming the offending input.
//! Record-level oddities inside an object are *not* merge failures — the
//! tolerant [`SessionEntry`] extraction keeps them for the bucketing pass
//! to quarantine.

use crate::error::{MergeError, SourceDefect};
use crate::types::{json_type_name, LogRecord, SessionEntry, SourceId};
use serde_json::Value;

/// Merge the primary and mala collections, as read from the persisted
/// state (`None` when the key was absent).
///
/// Pure function of its inputs: no I/O, no shared state, no partial output
/// on failure.
pub fn merge(primary: Option<Value>, mala: Option<Value>) -> Result<Vec<LogRecord>, MergeError> {
    let primary = parse_collection(primary, SourceId::Primary)?;
    let mala = parse_collection(mala, SourceId::Mala)?;
    tracing::debug!(
        primary = primary.len(),
        mala = mala.len(),
        "merged log collections"
    );

    let mut merged = Vec::with_capacity(primary.len() + mala.len());
    merged.extend(primary.into_iter().map(LogRecord::Regular));
    merged.extend(mala.into_iter().map(LogRecord::Mala));
    Ok(merged)
}

fn parse_collection(
    value: Option<Value>,
    source: SourceId,
) -> Result<Vec<SessionEntry>, MergeError> {
    let fail = |defect| MergeError::MissingOrMalformedSource {
        source_id: source,
        defect,
    };

    let items = match value {
        None | Some(Value::Null) => return Err(fail(SourceDefect::Missing)),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(fail(SourceDefect::NotAnArray {
                found: json_type_name(&other),
            }))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(SessionEntry::from_map(map)),
            other => Err(fail(SourceDefect::NonObjectElement {
                index,
                found: json_type_name(&other),
            })),
        })
        .collect()
}
