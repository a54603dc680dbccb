//! RimComplete - autocomplete index for RimWorld definition names
//!
//! This library scans a RimWorld install (base game, DLCs and mods) for definition
//! markup files and builds an index of definition names per type, for editor
//! autocomplete. It supports:
//!
//! - Extracting `(type, defName)` pairs from `Defs` XML files
//! - Discovering `Defs` folders under `Data/` and `Mods/` (including versioned mods)
//! - Caching the index on disk, invalidated when the `Mods` folder changes
//! - Answering `<type>*<filter>` suggestion queries
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use rimcomplete::parsers::ExtractMode;
//! use rimcomplete::{CacheStore, scan, suggestions_for_line};
//!
//! let store = CacheStore::at_default_location()?;
//! let root = Path::new("/games/RimWorld");
//! let index = match store.load(root) {
//!     Some(index) => index,
//!     None => scan(root, Some(&store), ExtractMode::Compatible, |_| {})?.index,
//! };
//! for suggestion in suggestions_for_line(&index, "hediff*flu") {
//!     println!("{}", suggestion.text);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod provider;
pub mod suggest;
pub mod utils;

// Re-export commonly used types
pub use error::ScanError;
pub use index_storage::CacheStore;
pub use indexer::{DefinitionIndex, scan};
pub use models::{Identifier, Suggestion};
pub use parsers::extract_definitions;
pub use provider::DefinitionProvider;
pub use suggest::{lookup, suggestions_for_line};
pub use utils::paths::format_path_with_tilde;
