//! Install root configuration
//!
//! The RimWorld install root is resolved from, in order: an explicit value (CLI flag or
//! `RIMWORLD_PATH`, both handled by clap), then the persisted config file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "rimcomplete";
const CONFIG_FILENAME: &str = "config.json";

/// Persisted user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub rimworld_path: Option<PathBuf>,
}

/// Get the default config file path (`<config_dir>/rimcomplete/config.json`)
pub fn default_config_path() -> Result<PathBuf> {
    let config_base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_base.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Load settings, treating a missing file as defaults
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Write settings, creating the parent directory if needed
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize config")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

/// Resolve the install root: explicit value first, then the config file
///
/// Returns `Ok(None)` when nothing is configured.
pub fn resolve_rimworld_path(explicit: Option<&Path>, config_path: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(load_settings(config_path)?.rimworld_path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let config = temp.path().join(CONFIG_FILENAME);
        save_settings(&config, &Settings { rimworld_path: Some("/from/config".into()) })
            .expect("Failed to save settings");

        let resolved = resolve_rimworld_path(Some(Path::new("/from/flag")), &config)
            .expect("Resolution should succeed");
        assert_eq!(resolved, Some(PathBuf::from("/from/flag")));
    }

    #[test]
    fn test_falls_back_to_config_file() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let config = temp.path().join("nested").join(CONFIG_FILENAME);
        save_settings(&config, &Settings { rimworld_path: Some("/games/RimWorld".into()) })
            .expect("Failed to save settings");

        let resolved = resolve_rimworld_path(None, &config).expect("Resolution should succeed");
        assert_eq!(resolved, Some(PathBuf::from("/games/RimWorld")));
    }

    #[test]
    fn test_nothing_configured() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let resolved = resolve_rimworld_path(None, &temp.path().join(CONFIG_FILENAME))
            .expect("Missing config is not an error");
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_corrupt_config_is_error() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let config = temp.path().join(CONFIG_FILENAME);
        fs::write(&config, "not json").expect("Failed to write config");

        let err = resolve_rimworld_path(None, &config).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_settings_json_uses_camel_case() {
        let settings = Settings { rimworld_path: Some("/x".into()) };
        let json = serde_json::to_string(&settings).expect("Failed to serialize");
        assert_eq!(json, r#"{"rimworldPath":"/x"}"#);
    }
}
