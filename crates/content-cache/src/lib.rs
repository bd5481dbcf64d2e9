//! # Codemind Content Cache
//!
//! Bounded in-memory cache of decoded project file text.
//!
//! ## Read path
//!
//! ```text
//! read_text(path)
//!     │
//!     ├──> cache hit ──> promote to most-recently-used ──> text
//!     │
//!     └──> miss ──> read bytes (outside the lock)
//!                       └─> decode chain (utf-8 → utf-8-sig → latin-1 → …)
//!                               └─> put (LRU evict on overflow) ──> text
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codemind_content_cache::ContentCache;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = ContentCache::default();
//!     let text = cache.read_text("/path/to/project/src/main.rs".as_ref()).await?;
//!     println!("{} bytes cached", text.len());
//!     Ok(())
//! }
//! ```

mod cache;
mod decode;
mod error;

pub use cache::{CacheStats, ContentCache, DEFAULT_CAPACITY};
pub use decode::{decode_with_chain, supported_encodings, DecodeStrategy, DECODE_CHAIN};
pub use error::{CacheError, Result};
