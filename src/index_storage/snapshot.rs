//! Cache snapshot model and staleness detection

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indexer::DefinitionIndex;
use crate::indexer::root_discovery::MODS_DIR;

/// Cache schema version; snapshots written by a newer schema are ignored
pub const CACHE_VERSION: u32 = 1;

fn default_version() -> u32 {
    1
}

/// Persisted point-in-time copy of a [`DefinitionIndex`] plus where and when it was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub source_root: PathBuf,
    pub built_at: DateTime<Utc>,
    /// `(type key, names)` pairs in index order
    pub index: Vec<(String, Vec<String>)>,
}

/// Why a snapshot cannot be used for the current configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    UnsupportedVersion(u32),
    RootMismatch(PathBuf),
    /// The `Mods` directory changed after the snapshot was built
    ModsChanged(DateTime<Utc>),
}

impl std::fmt::Display for Staleness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Staleness::UnsupportedVersion(version) => {
                write!(f, "unsupported cache version {} (expected {})", version, CACHE_VERSION)
            }
            Staleness::RootMismatch(root) => {
                write!(f, "cache was built for a different root: {}", root.display())
            }
            Staleness::ModsChanged(modified) => {
                write!(f, "Mods directory modified at {}", modified.to_rfc3339())
            }
        }
    }
}

/// Last-modified time of a path as a UTC timestamp
pub fn modified_time(path: &Path) -> Result<DateTime<Utc>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    let modified = metadata
        .modified()
        .with_context(|| format!("Failed to read modification time: {}", path.display()))?;
    Ok(DateTime::<Utc>::from(modified))
}

impl CacheSnapshot {
    /// Snapshot an index built from `source_root`, stamped with the current time
    pub fn new(source_root: &Path, index: &DefinitionIndex) -> Self {
        Self {
            version: CACHE_VERSION,
            source_root: source_root.to_path_buf(),
            built_at: Utc::now(),
            index: index.to_pairs(),
        }
    }

    /// Check whether this snapshot may be used for `install_root`
    ///
    /// Returns `Some(reason)` when the snapshot is stale. The `Mods` directory is the only
    /// tracked path; if it does not exist (or its time cannot be read) only the root is
    /// compared.
    pub fn staleness(&self, install_root: &Path) -> Option<Staleness> {
        if self.version > CACHE_VERSION {
            return Some(Staleness::UnsupportedVersion(self.version));
        }

        if self.source_root != install_root {
            return Some(Staleness::RootMismatch(self.source_root.clone()));
        }

        let mods_dir = install_root.join(MODS_DIR);
        if mods_dir.exists()
            && let Ok(modified) = modified_time(&mods_dir)
            && modified > self.built_at
        {
            return Some(Staleness::ModsChanged(modified));
        }

        None
    }

    pub fn to_index(&self) -> DefinitionIndex {
        DefinitionIndex::from_pairs(self.index.iter().cloned())
    }
}
