//! Bucketing Normalizer — groups merged records by a derived category key.
//!
//! Key derivation tolerates the one documented schema drift: the newer
//! record shape dropped `course.code` for the "Custom" course type, so a
//! name match on the configured custom course routes those records into
//! the same bucket the old `code` produced. Any other shape with no usable
//! code is quarantined into a side list — never thrown, never dropped, and
//! never placed in a bucket — so one odd record cannot abort the pass.
//!
//! Single pass, deterministic: first-seen key order across the map,
//! merged-sequence order within each bucket, and
//! `buckets + unrecognized == input`, always.

use crate::config::BucketsConfig;
use crate::types::LogRecord;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::collections::HashMap;

/// The reserved key names the normalizer derives buckets with. Passed in
/// explicitly; the engine has no process-wide key constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKeys {
    /// Bucket key for custom-course records, with or without a `code`.
    /// Matches the key the pre-drift schema's `code` field produced.
    pub custom: String,
    /// Sentinel key under which quarantined records surface in exports.
    pub unrecognized: String,
    /// Course name whose post-drift records map to `custom`.
    pub custom_course_name: String,
}

impl Default for BucketKeys {
    fn default() -> Self {
        Self {
            custom: "CUSTOM".to_string(),
            unrecognized: "__UNRECOGNIZED__".to_string(),
            custom_course_name: "Custom".to_string(),
        }
    }
}

impl From<&BucketsConfig> for BucketKeys {
    fn from(cfg: &BucketsConfig) -> Self {
        Self {
            custom: cfg.custom.clone(),
            unrecognized: cfg.unrecognized.clone(),
            custom_course_name: cfg.custom_course_name.clone(),
        }
    }
}

/// Derive the category key for one record.
///
/// Precedence: a non-empty `course.code` verbatim; else the reserved
/// custom key when `course.name` matches the configured custom course;
/// else `None`, meaning the record is unrecognized. The name fallback is
/// deliberately narrow — any *other* course type that loses its `code` in
/// a future drift must surface as unrecognized, not be guessed at.
pub fn category_key(record: &LogRecord, keys: &BucketKeys) -> Option<String> {
    let course = record.entry().course.as_ref()?;
    if let Some(code) = course.code() {
        if !code.is_empty() {
            return Some(code.to_string());
        }
    }
    if course.name() == Some(keys.custom_course_name.as_str()) {
        return Some(keys.custom.clone());
    }
    None
}

/// Insertion-ordered map of category key to the records sharing it.
///
/// Serializes as a JSON object in first-seen key order.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    entries: Vec<(String, Vec<&'a LogRecord>)>,
    index: HashMap<String, usize>,
}

impl<'a> Buckets<'a> {
    fn push(&mut self, key: String, record: &'a LogRecord) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.push(record),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![record]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[&'a LogRecord]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    /// Bucket keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, records)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a LogRecord])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total records across all buckets.
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl Serialize for Buckets<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, records) in &self.entries {
            map.serialize_entry(key, records)?;
        }
        map.end()
    }
}

/// Output of one bucketing pass over a merged sequence.
#[derive(Debug)]
pub struct Bucketed<'a> {
    pub buckets: Buckets<'a>,
    /// Records whose course shape matched neither known schema variant.
    /// Surfaced, never silently dropped.
    pub unrecognized: Vec<&'a LogRecord>,
}

impl Bucketed<'_> {
    /// Total records accounted for: every bucket plus the side list.
    pub fn record_count(&self) -> usize {
        self.buckets.record_count() + self.unrecognized.len()
    }
}

/// Bucket a merged sequence. Infallible: the only failure mode of the
/// engine is the structural one caught upstream by [`crate::merge::merge`].
pub fn bucketize<'a>(records: &'a [LogRecord], keys: &BucketKeys) -> Bucketed<'a> {
    let mut buckets = Buckets::default();
    let mut unrecognized = Vec::new();

    for record in records {
        match category_key(record, keys) {
            Some(key) => buckets.push(key, record),
            None => {
                tracing::warn!(
                    id = %record.entry().display_id(),
                    course = ?record.entry().course.as_ref().and_then(|c| c.name()),
                    "quarantining record with unrecognized course shape"
                );
                unrecognized.push(record);
            }
        }
    }

    Bucketed {
        buckets,
        unrecognized,
    }
}
