//! Definition indexing for RimWorld installs
//!
//! # Error Handling Strategy
//!
//! The indexer separates unusable configuration from everyday noise:
//!
//! - **Configuration errors**: a missing install root or zero discoverable `Defs` folders
//!   fail the scan with a typed [`ScanError`](crate::ScanError). Nothing is committed.
//!
//! - **Path-level failures**: unreadable directories, broken links and unreadable files
//!   are logged at debug level and skipped. A scan never aborts halfway.
//!
//! - **Cache write failures**: reported on the [`ScanOutcome`] and logged, while the
//!   in-memory index is still handed back.
//!
//! - **Summary reporting**: per-type counts are logged when a scan finishes.

pub mod builder;
pub mod definition_index;
pub mod root_discovery;
pub mod walker;
pub mod worker;

pub use builder::{ScanOutcome, ScanProgress, prepare_scan, scan, scan_async, scan_in_worker};
pub use definition_index::DefinitionIndex;
pub use root_discovery::discover_scan_targets;
pub use walker::{WalkStats, walk_defs, walk_defs_async};
pub use worker::{ScanWorker, WorkerMessage, spawn_scan_worker};
