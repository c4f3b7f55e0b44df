//! Snapshot-file state reader.

use crate::{StateError, StateReader};
use serde_json::{Map, Value};
use sitlog_core::types::json_type_name;
use std::path::{Path, PathBuf};

/// A persisted-state snapshot loaded from one JSON object file.
///
/// The file is read once at open; key lookups are served from memory.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    state: Map<String, Value>,
}

impl SnapshotFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| StateError::Io {
            path: path.clone(),
            source,
        })?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|source| StateError::Json {
                path: path.clone(),
                source,
            })?;
        let Value::Object(state) = value else {
            return Err(StateError::NotAnObject {
                found: json_type_name(&value),
                path,
            });
        };
        tracing::debug!(path = %path.display(), keys = state.len(), "loaded state snapshot");
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key names present in the snapshot.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }
}

impl StateReader for SnapshotFile {
    fn read_key(&self, key: &str) -> Result<Option<Value>, StateError> {
        Ok(self.state.get(key).cloned())
    }
}
