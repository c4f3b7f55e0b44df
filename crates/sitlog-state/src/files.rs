//! Snapshot file discovery and pruning.
//!
//! Snapshots are named `<stem>-<timestamp>.json` with a sortable timestamp
//! (see `sitlog_core::export::artifact_name`), so lexicographic order of
//! matching file names is chronological order. Files that do not match the
//! pattern are never touched.

use crate::StateError;
use regex::Regex;
use std::path::{Path, PathBuf};

fn snapshot_pattern(stem: &str) -> Regex {
    Regex::new(&format!(r"^{}-\d{{4}}.*\.json$", regex::escape(stem)))
        .expect("snapshot pattern built from an escaped stem is valid")
}

/// Snapshot files under `dir` matching `stem`, sorted oldest first.
pub fn snapshot_files(dir: &Path, stem: &str) -> Result<Vec<PathBuf>, StateError> {
    let pattern = snapshot_pattern(stem);
    let entries = std::fs::read_dir(dir).map_err(|source| StateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if pattern.is_match(name) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// The newest snapshot under `dir`, or `None` when there is none.
pub fn latest_snapshot(dir: &Path, stem: &str) -> Result<Option<PathBuf>, StateError> {
    Ok(snapshot_files(dir, stem)?.pop())
}

/// Remove all but the newest `keep` snapshots. Returns the removed paths.
pub fn prune_snapshots(dir: &Path, stem: &str, keep: usize) -> Result<Vec<PathBuf>, StateError> {
    let mut files = snapshot_files(dir, stem)?;
    let excess = files.len().saturating_sub(keep);
    files.truncate(excess);

    for path in &files {
        std::fs::remove_file(path).map_err(|source| StateError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "pruned old snapshot");
    }
    Ok(files)
}
