//! Domain-specific assertion macros for sitlog harnesses.
//!
//! These add context-rich failure messages that make it clear *what*
//! engine invariant was violated: conservation, bucket ordering, or
//! provenance tagging.

use serde_json::Value;
use sitlog_core::LogRecord;

// ---------------------------------------------------------------------------
// Conservation
// ---------------------------------------------------------------------------

/// Assert that every input record is accounted for: the bucket totals plus
/// the unrecognized side list must equal the merged input length.
///
/// ```rust
/// assert_conserved!(bucketed, records.len());
/// ```
#[macro_export]
macro_rules! assert_conserved {
    ($bucketed:expr, $input_len:expr) => {{
        let bucketed: &sitlog_core::Bucketed<'_> = &$bucketed;
        let input_len: usize = $input_len;
        let bucketed_count = bucketed.buckets.record_count();
        let unrecognized = bucketed.unrecognized.len();
        if bucketed_count + unrecognized != input_len {
            panic!(
                "assert_conserved! failed:\n  input records: {}\n  in buckets:    {}\n  unrecognized:  {}",
                input_len, bucketed_count, unrecognized
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Bucket shape
// ---------------------------------------------------------------------------

/// Assert the exact first-seen order of bucket keys.
///
/// ```rust
/// assert_bucket_keys!(bucketed, ["JOL3", "CUSTOM", "NECTAR_PATH"]);
/// ```
#[macro_export]
macro_rules! assert_bucket_keys {
    ($bucketed:expr, [$($key:expr),* $(,)?]) => {{
        let bucketed: &sitlog_core::Bucketed<'_> = &$bucketed;
        let actual: Vec<&str> = bucketed.buckets.keys().collect();
        let expected: Vec<&str> = vec![$($key),*];
        if actual != expected {
            panic!(
                "assert_bucket_keys! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert the ids of one bucket's records, in order.
///
/// ```rust
/// assert_bucket_ids!(bucketed, "JOL3", ["1566101", "1566104"]);
/// ```
#[macro_export]
macro_rules! assert_bucket_ids {
    ($bucketed:expr, $key:expr, [$($id:expr),* $(,)?]) => {{
        let bucketed: &sitlog_core::Bucketed<'_> = &$bucketed;
        let key: &str = $key;
        let expected: Vec<&str> = vec![$($id),*];
        match bucketed.buckets.get(key) {
            Some(records) => {
                let actual: Vec<String> =
                    records.iter().map(|r| r.entry().display_id()).collect();
                if actual != expected {
                    panic!(
                        "assert_bucket_ids! failed for bucket {:?}:\n  expected: {:?}\n  actual:   {:?}",
                        key, expected, actual
                    );
                }
            }
            None => panic!(
                "assert_bucket_ids! failed: no bucket {:?}.\n  Available: {:?}",
                key,
                bucketed.buckets.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Provenance and preservation helpers
// ---------------------------------------------------------------------------

/// Assert that a merged record round-trips to its wire object plus the
/// provenance flag — field-for-field, nothing mutated, nothing lost.
pub fn assert_preserves_wire(record: &LogRecord, wire: &Value) {
    let Value::Object(wire_map) = wire else {
        panic!("wire fixture must be an object, got {wire:?}");
    };
    let mut expected = wire_map.clone();
    expected.insert(
        "isMalaRecord".to_string(),
        Value::Bool(record.is_mala()),
    );
    let actual = record.to_value();
    assert_eq!(
        actual,
        Value::Object(expected),
        "merged record must serialize as its wire fields plus isMalaRecord"
    );
}

/// Assert the provenance flag of every record in a slice.
pub fn assert_all_provenance(records: &[LogRecord], expect_mala: bool) {
    for record in records {
        assert_eq!(
            record.is_mala(),
            expect_mala,
            "record {} has wrong provenance flag",
            record.entry().display_id()
        );
    }
}
