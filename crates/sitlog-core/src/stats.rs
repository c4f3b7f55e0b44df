//! Per-bucket session statistics.

use crate::bucket::Bucketed;
use crate::types::LogRecord;

/// Total elapsed seconds across a set of records. Negative or missing
/// durations count as zero.
pub fn total_elapsed<'r, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'r LogRecord>,
{
    records.into_iter().map(|r| r.entry().elapsed_secs()).sum()
}

/// The last record of a bucket, if any. Buckets keep merged-sequence
/// order, so this is the most recently appended entry.
pub fn most_recent<'r, I>(records: I) -> Option<&'r LogRecord>
where
    I: IntoIterator<Item = &'r LogRecord>,
{
    records.into_iter().last()
}

/// Render a duration as `h:mm:ss`, or `m:ss` under an hour.
pub fn format_elapsed(total_secs: u64) -> String {
    let (mins, secs) = (total_secs / 60, total_secs % 60);
    let (hours, minutes) = (mins / 60, mins % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// One row of the stats table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub key: String,
    pub sessions: usize,
    pub total_secs: u64,
}

/// Per-bucket summaries in first-seen bucket order.
pub fn summarize(bucketed: &Bucketed<'_>) -> Vec<BucketSummary> {
    bucketed
        .buckets
        .iter()
        .map(|(key, records)| BucketSummary {
            key: key.to_string(),
            sessions: records.len(),
            total_secs: total_elapsed(records.iter().copied()),
        })
        .collect()
}
