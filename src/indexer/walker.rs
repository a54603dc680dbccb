//! Recursive `Defs` tree walking
//!
//! Both walkers visit entries depth-first in file-name order and feed every `.xml` file
//! through the document scanner. Unreadable paths are skipped. Symbolic links are followed,
//! but a directory that is already being walked is never entered again, so link cycles
//! terminate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::definition_index::DefinitionIndex;
use crate::parsers::{ExtractMode, extract_definitions_with_mode, parse_def_file};

/// Extension (without the dot) of markup files that get scanned
pub const MARKUP_EXTENSION: &str = "xml";

/// The cooperative walker yields to the scheduler after this many files
pub const YIELD_EVERY_FILES: usize = 8;

/// Counters reported by a single walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files_scanned: usize,
    /// Names that were new to the index
    pub definitions_added: usize,
}

fn is_markup_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKUP_EXTENSION)
}

/// Walk `root` and merge every extracted definition into `index`
///
/// Never fails. A missing root or unreadable directory simply contributes nothing.
pub fn walk_defs(root: &Path, index: &mut DefinitionIndex, mode: ExtractMode) -> WalkStats {
    let mut stats = WalkStats::default();

    let entries = WalkDir::new(root).follow_links(true).sort_by_file_name().into_iter();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable path under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_markup_file(entry.path()) {
            continue;
        }

        let found = parse_def_file(entry.path(), mode);
        stats.files_scanned += 1;
        stats.definitions_added += index.extend(&found);
    }

    stats
}

/// Cooperative variant of [`walk_defs`]
///
/// Produces the same index contents, but yields back to the async scheduler after every
/// [`YIELD_EVERY_FILES`] files and after entering each subdirectory. Walking stays strictly
/// sequential: the yields only let other tasks on the same runtime make progress.
pub async fn walk_defs_async(
    root: &Path,
    index: &mut DefinitionIndex,
    mode: ExtractMode,
) -> WalkStats {
    let mut stats = WalkStats::default();
    let mut visited = HashSet::new();

    let Some(root_entries) = read_dir_sorted(root, &mut visited).await else {
        return stats;
    };
    let mut stack: Vec<std::vec::IntoIter<PathBuf>> = vec![root_entries.into_iter()];

    while let Some(current) = stack.last_mut() {
        let Some(path) = current.next() else {
            stack.pop();
            continue;
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("Skipping unreadable path {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_dir() {
            if let Some(children) = read_dir_sorted(&path, &mut visited).await {
                stack.push(children.into_iter());
            }
            tokio::task::yield_now().await;
        } else if metadata.is_file() && is_markup_file(&path) {
            let found = match tokio::fs::read(&path).await {
                Ok(bytes) => extract_definitions_with_mode(&String::from_utf8_lossy(&bytes), mode),
                Err(e) => {
                    debug!("Skipping unreadable file {}: {}", path.display(), e);
                    Vec::new()
                }
            };
            stats.files_scanned += 1;
            stats.definitions_added += index.extend(&found);

            if stats.files_scanned % YIELD_EVERY_FILES == 0 {
                tokio::task::yield_now().await;
            }
        }
    }

    stats
}

/// Sorted children of `dir`, or `None` if it cannot be read or was already visited
async fn read_dir_sorted(dir: &Path, visited: &mut HashSet<PathBuf>) -> Option<Vec<PathBuf>> {
    let canonical = match tokio::fs::canonicalize(dir).await {
        Ok(canonical) => canonical,
        Err(e) => {
            debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            return None;
        }
    };
    if !visited.insert(canonical) {
        debug!("Skipping already visited directory {}", dir.display());
        return None;
    }

    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut children = Vec::new();
    loop {
        match read_dir.next_entry().await {
            Ok(Some(entry)) => children.push(entry.path()),
            Ok(None) => break,
            Err(e) => {
                debug!("Failed to read entry in {}: {}", dir.display(), e);
                break;
            }
        }
    }
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Some(children)
}
