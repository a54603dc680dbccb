//! Cache persistence: load/save with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::snapshot::CacheSnapshot;
use crate::indexer::DefinitionIndex;

const CACHE_DIR_NAME: &str = "rimcomplete";
const CACHE_FILENAME: &str = "definitions-cache.json";

/// Get the platform-specific default cache file path
///
/// - macOS: `~/Library/Caches/rimcomplete/definitions-cache.json`
/// - Linux: `~/.cache/rimcomplete/definitions-cache.json`
/// - Windows: `%LOCALAPPDATA%\rimcomplete\definitions-cache.json`
pub fn default_cache_path() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_base.join(CACHE_DIR_NAME).join(CACHE_FILENAME))
}

/// Single-file store for the definition cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_cache_path`]
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_cache_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the raw snapshot without validity checks
    pub fn read_snapshot(&self) -> Result<CacheSnapshot> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;
        serde_json::from_str(&json).context("Failed to parse cache JSON")
    }

    /// Load the cached index for `install_root`
    ///
    /// Returns `None` when the cache is missing, corrupted, built for another root, or
    /// older than the `Mods` directory. The caller should rescan.
    pub fn load(&self, install_root: &Path) -> Option<DefinitionIndex> {
        if !self.path.exists() {
            debug!("No cache file at {}", self.path.display());
            return None;
        }

        let snapshot = match self.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring unreadable cache: {:#}", e);
                return None;
            }
        };

        if let Some(reason) = snapshot.staleness(install_root) {
            info!("Cache is stale, rescan needed: {}", reason);
            return None;
        }

        let index = snapshot.to_index();
        info!(
            "Loaded {} definitions across {} types from cache built at {}",
            index.definition_count(),
            index.type_count(),
            snapshot.built_at.to_rfc3339()
        );
        Some(index)
    }

    /// Save `index` as built from `install_root`, atomically (temp file + rename)
    ///
    /// A failure here should be reported, not treated as fatal: the in-memory index is
    /// still usable.
    pub fn save(&self, install_root: &Path, index: &DefinitionIndex) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }

        let snapshot = CacheSnapshot::new(install_root, index);
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize cache")?;

        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);
        fs::write(&temp_path, json).context("Failed to write cache temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename cache temp file")?;

        debug!("Saved cache to {}", self.path.display());
        Ok(())
    }

    /// Delete the cache file. Returns `true` only if a file existed and was removed.
    pub fn clear(&self) -> bool {
        match fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Failed to remove cache file {}: {}", self.path.display(), e);
                false
            }
        }
    }
}
