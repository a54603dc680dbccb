use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::ScanTarget;

/// Directory holding the base game and DLC data folders
pub const DATA_DIR: &str = "Data";
/// Directory holding installed mod packages
pub const MODS_DIR: &str = "Mods";
/// Name of the directory that roots a definition tree
pub const DEFS_DIR: &str = "Defs";

/// Immediate subdirectories of `dir`, sorted by name
///
/// Returns an empty Vec if `dir` is missing or unreadable; individual unreadable
/// entries are skipped.
fn subdirectories(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().to_string();
            Some((name, path))
        })
        .collect();
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}

/// Discover every `Defs` directory under a RimWorld install root
///
/// - `Data/<folder>/Defs` for the base game and each DLC
/// - `Mods/<mod>/Defs` for mods that keep definitions at the top level
/// - `Mods/<mod>/<version>/Defs` for versioned mods (`1.4`, `1.5`, ...)
///
/// A single mod may contribute zero, one, or several targets. Missing `Data` or `Mods`
/// directories are not errors; the caller decides what an empty result means.
///
/// # Arguments
///
/// * `install_root` - The RimWorld installation directory
pub fn discover_scan_targets(install_root: &Path) -> Vec<ScanTarget> {
    let mut targets = Vec::new();

    let data_dir = install_root.join(DATA_DIR);
    if data_dir.is_dir() {
        for (folder, path) in subdirectories(&data_dir) {
            let defs = path.join(DEFS_DIR);
            if defs.is_dir() {
                targets.push(ScanTarget::new(defs, format!("{}/{}", DATA_DIR, folder)));
            }
        }
    }

    let mods_dir = install_root.join(MODS_DIR);
    if mods_dir.is_dir() {
        let mods = subdirectories(&mods_dir);
        debug!("Found {} total mod folders", mods.len());

        for (mod_name, mod_path) in mods {
            let mut found_defs = false;

            let direct = mod_path.join(DEFS_DIR);
            if direct.is_dir() {
                targets.push(ScanTarget::new(direct, mod_name.clone()));
                found_defs = true;
            }

            for (version, version_path) in subdirectories(&mod_path) {
                let versioned = version_path.join(DEFS_DIR);
                if versioned.is_dir() {
                    targets.push(ScanTarget::new(versioned, format!("{}/{}", mod_name, version)));
                    found_defs = true;
                }
            }

            if !found_defs {
                debug!("No Defs found in {}", mod_name);
            }
        }
    }

    targets
}
