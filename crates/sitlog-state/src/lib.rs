//! sitlog-state — persisted host-state readers for sitlog.
//!
//! The host app persists its log collections under named keys in a
//! client-side store; a snapshot of that store reaches this machine as a
//! single JSON object file. This crate models the "read a named key"
//! capability behind [`StateReader`] so the engine never touches files
//! directly, and ships two implementations: [`SnapshotFile`] for real
//! snapshots and [`MemoryState`] for tests and embedding.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

pub mod files;
pub mod snapshot;

pub use snapshot::SnapshotFile;

/// Reads named keys from a persisted state store.
pub trait StateReader {
    /// The raw value persisted under `key`, or `None` when the key is not
    /// present. A `None` here becomes the engine's missing-source error;
    /// this layer reports only its own failures.
    fn read_key(&self, key: &str) -> Result<Option<Value>, StateError>;
}

/// Failure to read persisted state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state snapshot {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("state snapshot {path} must be a top-level JSON object, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },
}

/// In-memory state store.
#[derive(Debug, Default, Clone)]
pub struct MemoryState {
    entries: HashMap<String, Value>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }
}

impl StateReader for MemoryState {
    fn read_key(&self, key: &str) -> Result<Option<Value>, StateError> {
        Ok(self.entries.get(key).cloned())
    }
}
