//! Host-facing definition provider
//!
//! Owns the current [`DefinitionIndex`] and implements the editor commands: startup load
//! (cache first), generate-cache, clear-cache and reload. A new index replaces the current
//! one only after a scan completes, so a failed scan never leaves a half-built index.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::info;

use crate::error::ScanError;
use crate::index_storage::CacheStore;
use crate::indexer::{DefinitionIndex, ScanOutcome, ScanProgress, scan, scan_async, scan_in_worker};
use crate::models::Suggestion;
use crate::parsers::ExtractMode;
use crate::suggest::suggestions_for_line;

/// How a full scan is executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    /// Walk on the calling thread
    #[default]
    Sync,
    /// Walk on a single-threaded async runtime, yielding between files
    Cooperative,
    /// Walk on a background thread and stream results back
    Worker,
}

/// What a completed scan reports back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub roots_scanned: usize,
    /// The scan succeeded but the cache file could not be written
    pub cache_error: Option<String>,
}

/// Where the current definitions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Cache,
    Scan { roots_scanned: usize },
    /// No install root configured; the index stays empty
    NotConfigured,
}

pub struct DefinitionProvider {
    rimworld_path: Option<PathBuf>,
    store: CacheStore,
    scan_mode: ScanMode,
    extract_mode: ExtractMode,
    definitions: DefinitionIndex,
}

impl DefinitionProvider {
    pub fn new(rimworld_path: Option<PathBuf>, store: CacheStore) -> Self {
        Self {
            rimworld_path,
            store,
            scan_mode: ScanMode::default(),
            extract_mode: ExtractMode::default(),
            definitions: DefinitionIndex::new(),
        }
    }

    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    pub fn with_extract_mode(mut self, extract_mode: ExtractMode) -> Self {
        self.extract_mode = extract_mode;
        self
    }

    pub fn definitions(&self) -> &DefinitionIndex {
        &self.definitions
    }

    pub fn rimworld_path(&self) -> Option<&Path> {
        self.rimworld_path.as_deref()
    }

    pub fn cache_store(&self) -> &CacheStore {
        &self.store
    }

    fn configured_root(&self) -> Result<PathBuf, ScanError> {
        self.rimworld_path.clone().ok_or(ScanError::RootNotConfigured)
    }

    /// Startup load: use the cache when it is fresh, otherwise scan
    pub fn load_definitions(&mut self) -> Result<LoadSource, ScanError> {
        let Some(root) = self.rimworld_path.clone() else {
            info!("RimWorld path not configured; no definitions loaded");
            return Ok(LoadSource::NotConfigured);
        };

        if let Some(index) = self.store.load(&root) {
            self.definitions = index;
            return Ok(LoadSource::Cache);
        }

        let summary = self.generate_cache(|_| {})?;
        Ok(LoadSource::Scan { roots_scanned: summary.roots_scanned })
    }

    /// Full rescan and cache write
    ///
    /// The current index is replaced only if the scan succeeds. A cache write failure does
    /// not fail the call; it is reported in [`ScanSummary::cache_error`].
    pub fn generate_cache<F>(&mut self, progress: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&ScanProgress),
    {
        let root = self.configured_root()?;
        let outcome = self.run_scan(&root, progress)?;
        Ok(self.adopt(outcome))
    }

    /// [`generate_cache`](Self::generate_cache) for hosts already running an async runtime
    pub async fn generate_cache_async<F>(&mut self, progress: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&ScanProgress),
    {
        let root = self.configured_root()?;
        let outcome = scan_async(&root, Some(&self.store), self.extract_mode, progress).await?;
        Ok(self.adopt(outcome))
    }

    /// Delete the cache file. Returns `true` if there was one.
    pub fn clear_cache(&self) -> bool {
        self.store.clear()
    }

    /// Drop the in-memory index and the cache file, then rescan
    ///
    /// If the rescan fails, the index stays empty.
    pub fn reload<F>(&mut self, progress: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&ScanProgress),
    {
        self.definitions.clear();
        self.store.clear();
        self.generate_cache(progress)
    }

    /// Autocomplete items for the line text up to the cursor
    pub fn suggestions(&self, line: &str) -> Vec<Suggestion> {
        suggestions_for_line(&self.definitions, line)
    }

    /// Release the in-memory index
    pub fn dispose(&mut self) {
        self.definitions.clear();
    }

    fn run_scan<F>(&self, root: &Path, progress: F) -> Result<ScanOutcome, ScanError>
    where
        F: FnMut(&ScanProgress),
    {
        let store = Some(&self.store);
        match self.scan_mode {
            ScanMode::Sync => scan(root, store, self.extract_mode, progress),
            ScanMode::Worker => scan_in_worker(root, store, self.extract_mode, progress),
            ScanMode::Cooperative => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(ScanError::Runtime)?;
                runtime.block_on(scan_async(root, store, self.extract_mode, progress))
            }
        }
    }

    fn adopt(&mut self, outcome: ScanOutcome) -> ScanSummary {
        self.definitions = outcome.index;
        ScanSummary { roots_scanned: outcome.roots_scanned, cache_error: outcome.cache_error }
    }
}
