use crate::metadata_io::{read_metadata, write_metadata};
use chrono::{DateTime, Utc};
use codemind_project::metadata_path_for_root;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::UNIX_EPOCH;

/// One tracked file: the modification time observed when it was last
/// indexed, and when that happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub mtime: f64,
    pub indexed_at: DateTime<Utc>,
}

/// Summary counters over the tracked set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackerStats {
    pub total_tracked: usize,
    pub last_index: Option<DateTime<Utc>>,
}

/// Persisted path → last-indexed-mtime mapping driving incremental reindex.
///
/// Mtime comparison is the change signal: cheap, filesystem-native, and
/// proportional to the candidate list rather than total tree size. Clock
/// skew and sub-resolution edits can slip past it; that trade-off is
/// accepted rather than remediated with content hashing.
///
/// Losing the persisted state is never fatal: the next run simply treats
/// everything as changed.
pub struct ChangeTracker {
    metadata_path: PathBuf,
    records: Mutex<HashMap<String, ChangeRecord>>,
}

impl ChangeTracker {
    /// Tracks state in an explicit metadata file.
    pub fn new(metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Tracks state in the standard location under `<root>/.codemind`.
    pub fn for_project_root(root: &Path) -> Self {
        Self::new(metadata_path_for_root(root))
    }

    /// Replaces the in-memory mapping with the persisted one. An absent,
    /// unreadable, or corrupt store loads as empty: incremental indexing
    /// degrades to "everything changed" instead of failing the process.
    pub async fn load(&self) {
        let records = match read_metadata(&self.metadata_path).await {
            Ok(Some(records)) => records,
            Ok(None) => HashMap::new(),
            Err(err) => {
                log::warn!(
                    "ignoring unreadable index metadata {}: {err}",
                    self.metadata_path.display()
                );
                HashMap::new()
            }
        };
        *self.lock() = records;
    }

    /// Persists the current mapping. Failure is logged and absorbed: a lost
    /// store only costs efficiency on the next run.
    pub async fn save(&self) {
        let snapshot = self.lock().clone();
        if let Err(err) = write_metadata(&self.metadata_path, &snapshot).await {
            log::warn!(
                "failed to persist index metadata {}: {err}",
                self.metadata_path.display()
            );
        }
    }

    /// Upserts the record for `path`, stamping now as the index time.
    pub fn record(&self, path: impl Into<String>, mtime: f64) {
        self.lock().insert(
            path.into(),
            ChangeRecord {
                mtime,
                indexed_at: Utc::now(),
            },
        );
    }

    /// The stored mtime for `path`, if it is tracked.
    #[must_use]
    pub fn last_mtime(&self, path: &str) -> Option<f64> {
        self.lock().get(path).map(|record| record.mtime)
    }

    /// Filters `candidates` down to the paths needing (re)indexing, in
    /// input order. A candidate is changed when its current mtime is
    /// strictly newer than the stored one; an untracked candidate or a
    /// failing stat counts as changed.
    pub async fn changed_since_last_index(&self, candidates: &[PathBuf]) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        for path in candidates {
            let stored = self.last_mtime(&path_key(path));
            let current = file_mtime(path).await;
            match (current, stored) {
                (Some(current), Some(last)) if current <= last => {}
                _ => changed.push(path.clone()),
            }
        }
        changed
    }

    /// Forgets every tracked path missing from `existing`, reclaiming state
    /// for deleted files.
    pub fn prune(&self, existing: &HashSet<String>) {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|path, _| existing.contains(path));
        let removed = before - records.len();
        if removed > 0 {
            log::info!("pruned {removed} deleted files from index metadata");
        }
    }

    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        let records = self.lock();
        TrackerStats {
            total_tracked: records.len(),
            last_index: records.values().map(|record| record.indexed_at).max(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ChangeRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The stable string key a path is tracked under across runs.
#[must_use]
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

async fn file_mtime(path: &Path) -> Option<f64> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    let modified = meta.modified().ok()?;
    modified
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|age| age.as_secs_f64())
}
