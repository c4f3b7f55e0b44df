//! sitlog-core — practice-log merge, bucketing, search, and export engine.
//!
//! This crate is the pure transform core of sitlog. It consumes the two
//! log collections a meditation app persists client-side (regular courses
//! and mala repetition courses), merges them into one provenance-tagged
//! sequence, buckets the result by a schema-drift-tolerant category key,
//! and renders either representation for export.
//!
//! # Architecture
//!
//! ```text
//! StateReader ──► Merge ──► Bucketize ──► Search / Stats
//!                   │            │
//!                   └────────────┴──► Export
//! ```
//!
//! Everything here is synchronous, single-threaded, and free of I/O and
//! ambient clocks: inputs arrive as already-materialized values, `today`
//! and timestamps are injected by the caller, and each invocation builds
//! its output from scratch with no cross-call state.

pub mod bucket;
pub mod config;
pub mod error;
pub mod export;
pub mod merge;
pub mod search;
pub mod stats;
pub mod types;

pub use bucket::{bucketize, category_key, BucketKeys, Bucketed, Buckets};
pub use config::Config;
pub use error::{ExportError, MergeError, SearchError, SourceDefect};
pub use merge::merge;
pub use search::{DateRange, SearchQuery};
pub use types::{CategoryValue, CourseRef, LogRecord, RecordId, SessionEntry, SourceId};
