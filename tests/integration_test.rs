/// End-to-end integration tests for rimcomplete
///
/// These tests verify complete workflows: discovery → scanning → caching → suggestions
mod common;

use std::fs;
use std::time::{Duration, SystemTime};

use common::{DefFileBuilder, RimWorldDirBuilder, realistic_rimworld_dir};
use rimcomplete::indexer::{discover_scan_targets, scan};
use rimcomplete::parsers::ExtractMode;
use rimcomplete::provider::{DefinitionProvider, LoadSource};
use rimcomplete::{CacheStore, ScanError, lookup, suggestions_for_line};
use tempfile::TempDir;

#[test]
fn test_e2e_scan_realistic_install() {
    let install = realistic_rimworld_dir();
    let mut names = Vec::new();

    let outcome = scan(install.path(), None, ExtractMode::Compatible, |p| names.push(p.name.clone()))
        .expect("Scan should succeed");

    assert_eq!(outcome.roots_scanned, 4);
    assert_eq!(names, vec!["Data/Biotech", "Data/Core", "MedicalMod/1.5", "VanillaExpanded"]);

    let index = &outcome.index;
    assert_eq!(index.names("hediff"), ["Flu", "Plague", "WoundInfection", "Frostbite"]);
    assert_eq!(index.names("thing"), ["Steel", "Plasteel", "ResourceBase", "Uranium"]);
    assert_eq!(index.names("trait"), ["Kind"]);
    assert_eq!(index.names("gene"), ["Hair_Grayless"]);
}

#[test]
fn test_e2e_versioned_mod_discovery() {
    let install = RimWorldDirBuilder::new()
        .with_mod("ModA", &[])
        .with_versioned_mod("ModB", "1.4", &[])
        .build();

    let targets = discover_scan_targets(install.path());

    let relative: Vec<_> = targets
        .iter()
        .map(|t| t.path.strip_prefix(install.path()).expect("under root").to_path_buf())
        .collect();
    assert_eq!(relative, vec![
        std::path::PathBuf::from("Mods/ModA/Defs"),
        std::path::PathBuf::from("Mods/ModB/1.4/Defs"),
    ]);
}

#[test]
fn test_e2e_cache_round_trip() {
    let install = realistic_rimworld_dir();
    let cache_dir = TempDir::new().expect("Failed to create temp dir");
    let store = CacheStore::new(cache_dir.path().join("cache.json"));

    let outcome = scan(install.path(), Some(&store), ExtractMode::Compatible, |_| {})
        .expect("Scan should succeed");
    let cached = store.load(install.path()).expect("Cache should be fresh");

    let scanned_types: Vec<&str> = outcome.index.iter().map(|(t, _)| t).collect();
    let cached_types: Vec<&str> = cached.iter().map(|(t, _)| t).collect();
    assert_eq!(scanned_types, cached_types);
    for (def_type, names) in outcome.index.iter() {
        assert_eq!(cached.names(def_type), names);
    }
}

#[test]
fn test_e2e_cache_invalidated_by_mods_change() {
    let install = realistic_rimworld_dir();
    let cache_dir = TempDir::new().expect("Failed to create temp dir");
    let store = CacheStore::new(cache_dir.path().join("cache.json"));
    scan(install.path(), Some(&store), ExtractMode::Compatible, |_| {}).expect("Scan should succeed");

    let future = SystemTime::now() + Duration::from_secs(60);
    fs::File::open(install.path().join("Mods"))
        .and_then(|dir| dir.set_modified(future))
        .expect("Failed to touch Mods");

    assert!(store.load(install.path()).is_none(), "Stale cache must be a miss");
}

#[test]
fn test_e2e_provider_startup_uses_cache() {
    let install = realistic_rimworld_dir();
    let cache_dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = cache_dir.path().join("cache.json");

    let mut first = DefinitionProvider::new(Some(install.path().to_path_buf()), CacheStore::new(&cache_path));
    assert!(matches!(first.load_definitions(), Ok(LoadSource::Scan { roots_scanned: 4 })));

    // New definitions inside a mod's Defs folder do not touch the Mods mtime
    DefFileBuilder::new("Late.xml")
        .def("HediffDef", "Late")
        .create_in(&install.path().join("Mods/VanillaExpanded/Defs"));

    let mut second = DefinitionProvider::new(Some(install.path().to_path_buf()), CacheStore::new(&cache_path));
    assert_eq!(second.load_definitions().expect("load"), LoadSource::Cache);
    assert!(!second.definitions().names("hediff").iter().any(|n| n == "Late"));

    second.reload(|_| {}).expect("reload");
    assert!(second.definitions().names("hediff").iter().any(|n| n == "Late"));
}

#[test]
fn test_e2e_nonexistent_root_keeps_previous_index() {
    let install = realistic_rimworld_dir();
    let cache_dir = TempDir::new().expect("Failed to create temp dir");
    let store = CacheStore::new(cache_dir.path().join("cache.json"));
    let previous = scan(install.path(), Some(&store), ExtractMode::Compatible, |_| {})
        .expect("Scan should succeed")
        .index;
    let before = previous.clone();

    let missing = install.path().join("does-not-exist");
    let result = scan(&missing, Some(&store), ExtractMode::Compatible, |_| {});

    assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    assert_eq!(previous, before);
    assert!(store.load(install.path()).is_some(), "existing cache is not overwritten");
}

#[test]
fn test_e2e_suggestions_from_scan() {
    let install = realistic_rimworld_dir();
    let index = scan(install.path(), None, ExtractMode::Compatible, |_| {})
        .expect("Scan should succeed")
        .index;

    assert_eq!(lookup(&index, "thing", "steel"), vec!["Steel", "Plasteel"]);

    let suggestions = suggestions_for_line(&index, "    <li>Hediff*f");
    let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Flu", "WoundInfection", "Frostbite"]);
    assert!(suggestions.iter().all(|s| s.left_label == "hediff"));
}

#[test]
fn test_e2e_worker_and_sync_agree() {
    let install = realistic_rimworld_dir();

    let sync = scan(install.path(), None, ExtractMode::Compatible, |_| {}).expect("sync scan");
    let worker = rimcomplete::indexer::scan_in_worker(install.path(), None, ExtractMode::Compatible, |_| {})
        .expect("worker scan");

    assert_eq!(sync.index, worker.index);
}
