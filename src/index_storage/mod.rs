//! Persistent definition cache
//!
//! Caches the definition index in a single JSON file so startup can skip rescanning:
//!
//! ```json
//! { "version": 1, "sourceRoot": "...", "builtAt": "<RFC 3339>", "index": [["hediff", ["Flu"]]] }
//! ```
//!
//! Every failure mode (missing, corrupt, stale, unwritable) degrades to "no cache".
//! Default location: platform-specific cache directories
//! - macOS: `~/Library/Caches/rimcomplete/`
//! - Linux: `~/.cache/rimcomplete/`
//! - Windows: `%LOCALAPPDATA%\rimcomplete\`

pub mod persistence;
pub mod snapshot;

pub use persistence::{CacheStore, default_cache_path};
pub use snapshot::{CACHE_VERSION, CacheSnapshot, Staleness, modified_time};
