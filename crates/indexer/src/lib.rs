//! # Codemind Indexer
//!
//! Incremental-index metadata for semantic code search: which files changed
//! since the last index build, and which tracked files no longer exist.
//!
//! ## Reindex cycle
//!
//! ```text
//! Project root
//!     │
//!     ├──> File Scanner (.gitignore aware)
//!     │      └─> Candidate files
//!     │
//!     └──> Change Tracker (persisted path → mtime mapping)
//!            ├─> changed_since_last_index ──> files to re-process
//!            └─> prune ──> forget deleted files
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codemind_indexer::{path_key, ChangeTracker, FileScanner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let root = Path::new("/path/to/project");
//!     let tracker = ChangeTracker::for_project_root(root);
//!     tracker.load().await;
//!
//!     let candidates = FileScanner::new(root).scan();
//!     let changed = tracker.changed_since_last_index(&candidates).await;
//!     println!("{} of {} files need reindexing", changed.len(), candidates.len());
//!     Ok(())
//! }
//! ```

mod error;
mod metadata_io;
mod scanner;
mod tracker;

pub use error::{IndexerError, Result};
pub use metadata_io::{read_metadata, write_metadata};
pub use scanner::FileScanner;
pub use tracker::{path_key, ChangeRecord, ChangeTracker, TrackerStats};
