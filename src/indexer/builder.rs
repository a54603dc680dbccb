//! Scan orchestration: discover `Defs` roots, walk them, persist the result.
//!
//! # Error Handling Strategy
//!
//! - **Configuration errors**: a missing install root or an install with no `Defs`
//!   folders fails the scan with a [`ScanError`] before anything is built.
//! - **Path-level errors**: unreadable directories and files are skipped by the walker.
//! - **Cache errors**: a failed cache write is logged and reported in
//!   [`ScanOutcome::cache_error`]; the freshly built index is still returned.

use std::path::Path;

use tracing::{debug, info, warn};

use super::definition_index::DefinitionIndex;
use super::root_discovery::discover_scan_targets;
use super::walker::{walk_defs, walk_defs_async};
use super::worker::{WorkerMessage, spawn_scan_worker};
use crate::error::ScanError;
use crate::index_storage::CacheStore;
use crate::models::ScanTarget;
use crate::parsers::ExtractMode;

/// Progress notice sent after each scan root is finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    /// 1-based position of the finished root
    pub current: usize,
    pub total: usize,
    pub name: String,
}

impl ScanProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Result of a completed scan
#[derive(Debug)]
pub struct ScanOutcome {
    pub index: DefinitionIndex,
    pub roots_scanned: usize,
    /// Set when the index was built but could not be written to the cache
    pub cache_error: Option<String>,
}

/// Validate the install root and list the `Defs` roots to walk
pub fn prepare_scan(install_root: &Path) -> Result<Vec<ScanTarget>, ScanError> {
    if !install_root.exists() {
        return Err(ScanError::RootNotFound(install_root.to_path_buf()));
    }

    let targets = discover_scan_targets(install_root);
    if targets.is_empty() {
        return Err(ScanError::NoScanRoots(install_root.to_path_buf()));
    }

    info!("Scanning {} Defs folders under {}", targets.len(), install_root.display());
    Ok(targets)
}

fn finish_scan(
    install_root: &Path,
    store: Option<&CacheStore>,
    index: DefinitionIndex,
    roots_scanned: usize,
) -> ScanOutcome {
    for (def_type, names) in index.iter() {
        debug!("  {}: {}", def_type, names.len());
    }
    info!(
        "Indexed {} definitions across {} types from {} folders",
        index.definition_count(),
        index.type_count(),
        roots_scanned
    );

    let cache_error = store.and_then(|store| match store.save(install_root, &index) {
        Ok(()) => None,
        Err(e) => {
            warn!("Failed to write definition cache: {:#}", e);
            Some(format!("{:#}", e))
        }
    });

    ScanOutcome { index, roots_scanned, cache_error }
}

/// Scan every `Defs` root under `install_root` and build a fresh index
///
/// `progress` is called once per finished root. When `store` is given, the index is
/// written to it at the end (best effort).
///
/// # Errors
///
/// Returns a [`ScanError`] if the root does not exist or contains no `Defs` folders.
/// Nothing is written to the cache in that case.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use rimcomplete::indexer::scan;
/// use rimcomplete::parsers::ExtractMode;
///
/// let outcome = scan(Path::new("/games/RimWorld"), None, ExtractMode::Compatible, |p| {
///     eprintln!("{}/{} {}", p.current, p.total, p.name);
/// })?;
/// println!("{} thing defs", outcome.index.names("thing").len());
/// # Ok::<(), rimcomplete::ScanError>(())
/// ```
pub fn scan<F>(
    install_root: &Path,
    store: Option<&CacheStore>,
    mode: ExtractMode,
    mut progress: F,
) -> Result<ScanOutcome, ScanError>
where
    F: FnMut(&ScanProgress),
{
    let targets = prepare_scan(install_root)?;
    let total = targets.len();
    let mut index = DefinitionIndex::new();

    for (i, target) in targets.iter().enumerate() {
        let stats = walk_defs(&target.path, &mut index, mode);
        debug!(
            "Scanned {}: {} files, {} new definitions",
            target.name, stats.files_scanned, stats.definitions_added
        );
        progress(&ScanProgress { current: i + 1, total, name: target.name.clone() });
    }

    Ok(finish_scan(install_root, store, index, total))
}

/// Cooperative variant of [`scan`] for single-threaded async hosts
///
/// Roots are still walked one after another; the walker yields between files and
/// directories so other tasks stay responsive.
pub async fn scan_async<F>(
    install_root: &Path,
    store: Option<&CacheStore>,
    mode: ExtractMode,
    mut progress: F,
) -> Result<ScanOutcome, ScanError>
where
    F: FnMut(&ScanProgress),
{
    let targets = prepare_scan(install_root)?;
    let total = targets.len();
    let mut index = DefinitionIndex::new();

    for (i, target) in targets.iter().enumerate() {
        let stats = walk_defs_async(&target.path, &mut index, mode).await;
        debug!(
            "Scanned {}: {} files, {} new definitions",
            target.name, stats.files_scanned, stats.definitions_added
        );
        progress(&ScanProgress { current: i + 1, total, name: target.name.clone() });
        tokio::task::yield_now().await;
    }

    Ok(finish_scan(install_root, store, index, total))
}

/// Variant of [`scan`] that walks on a background thread
///
/// The worker owns its own per-root indexes and streams batches back; only this thread
/// touches the resulting index.
///
/// # Errors
///
/// In addition to the configuration errors of [`scan`], returns
/// [`ScanError::WorkerFailed`] if the worker could not start or stopped before
/// finishing. No cache is written in that case.
pub fn scan_in_worker<F>(
    install_root: &Path,
    store: Option<&CacheStore>,
    mode: ExtractMode,
    mut progress: F,
) -> Result<ScanOutcome, ScanError>
where
    F: FnMut(&ScanProgress),
{
    let targets = prepare_scan(install_root)?;
    let total = targets.len();
    let worker = spawn_scan_worker(targets, mode)
        .map_err(|e| ScanError::WorkerFailed(format!("failed to start worker thread: {}", e)))?;

    let mut index = DefinitionIndex::new();
    let mut completed = false;
    for message in worker.messages() {
        match message {
            WorkerMessage::Definitions(batch) => {
                index.merge_pairs(batch);
            }
            WorkerMessage::Progress(update) => progress(&update),
            WorkerMessage::Complete => {
                completed = true;
                break;
            }
        }
    }

    let joined = worker.join();
    if !completed || joined.is_err() {
        return Err(ScanError::WorkerFailed("worker stopped before finishing".to_string()));
    }

    Ok(finish_scan(install_root, store, index, total))
}
