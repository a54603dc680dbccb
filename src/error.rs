use std::path::PathBuf;

/// Configuration problems that make a scan impossible
///
/// These are the only scan failures surfaced to the user. Unreadable individual paths
/// and cache problems are logged and skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("RimWorld path is not configured (use --root, RIMWORLD_PATH, or `set-root`)")]
    RootNotConfigured,

    #[error("RimWorld path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("No Defs folders found under {0} (expected Data/*/Defs or Mods/*/Defs)")]
    NoScanRoots(PathBuf),

    #[error("Background scan failed: {0}")]
    WorkerFailed(String),

    #[error("Failed to start scan runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
