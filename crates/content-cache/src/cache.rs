use crate::decode::{decode_with_chain, supported_encodings};
use crate::error::{CacheError, Result};
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default number of decoded files held in memory.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded in-memory store of decoded file text, keyed by validated
/// absolute path, with strict least-recently-used eviction.
///
/// Entries are keyed purely by path: a file modified on disk after being
/// cached is served stale until the entry is evicted or the caller
/// [`invalidate`](ContentCache::invalidate)s it. The indexing driver drops
/// entries for paths its change tracker reports as modified.
pub struct ContentCache {
    state: Mutex<CacheState>,
}

struct CacheState {
    entries: LruCache<PathBuf, Arc<str>>,
    total_bytes: usize,
}

/// Point-in-time cache counters, for observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub total_bytes: usize,
}

impl ContentCache {
    /// Creates a cache holding up to `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                total_bytes: 0,
            }),
        }
    }

    /// Returns the cached text for `path` and promotes the entry to
    /// most-recently-used.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Arc<str>> {
        let mut state = self.lock();
        state.entries.get(path).cloned()
    }

    /// Inserts or replaces the entry for `path`, evicting the
    /// least-recently-used entry when the cache is full.
    pub fn put(&self, path: impl Into<PathBuf>, text: impl Into<Arc<str>>) {
        let path = path.into();
        let text = text.into();
        let mut state = self.lock();
        state.total_bytes = state.total_bytes.saturating_add(text.len());
        if let Some((evicted_path, evicted)) = state.entries.push(path, text) {
            state.total_bytes = state.total_bytes.saturating_sub(evicted.len());
            log::debug!("evicted cached content for {}", evicted_path.display());
        }
    }

    /// Returns decoded text for `path`, reading and decoding on a miss.
    ///
    /// The disk read and the decode chain run outside the cache lock so a
    /// slow read never stalls unrelated hits. On failure nothing is stored:
    /// I/O faults surface as [`CacheError::Read`], an exhausted decode chain
    /// as [`CacheError::Decode`].
    pub async fn read_text(&self, path: &Path) -> Result<Arc<str>> {
        if let Some(text) = self.get(path) {
            return Ok(text);
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CacheError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let Some((text, encoding)) = decode_with_chain(&bytes) else {
            return Err(CacheError::Decode {
                path: path.to_path_buf(),
                encodings: supported_encodings(),
            });
        };
        log::debug!(
            "decoded {} as {encoding} ({} bytes)",
            path.display(),
            bytes.len()
        );

        let text: Arc<str> = Arc::from(text);
        self.put(path.to_path_buf(), Arc::clone(&text));
        Ok(text)
    }

    /// Drops the entry for `path`, if present.
    pub fn invalidate(&self, path: &Path) -> bool {
        let mut state = self.lock();
        match state.entries.pop(path) {
            Some(removed) => {
                state.total_bytes = state.total_bytes.saturating_sub(removed.len());
                true
            }
            None => false,
        }
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.total_bytes = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            capacity: state.entries.cap().get(),
            total_bytes: state.total_bytes,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panicked holder cannot have left the map and the byte counter
        // torn: both are updated inside infallible code.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
