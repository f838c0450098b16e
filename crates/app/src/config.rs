//! Settings persistence.

use anyhow::{Context, Result};
use shared::settings::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};

pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com.local", "Mate Engine Analysis", "MateEngineAnalysis")
        .map(|proj| proj.config_dir().join("settings.json"))
}

/// Settings from disk, or defaults when the file is missing or unreadable.
pub fn load_settings_or_default() -> AppSettings {
    let Some(path) = config_path() else {
        return AppSettings::default();
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "no settings file, using defaults");
        return AppSettings::default();
    }
    match load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "ignoring unreadable settings");
            AppSettings::default()
        }
    }
}

pub fn save_settings(settings: &AppSettings) -> Result<()> {
    let path = config_path().context("no config directory on this platform")?;
    save_to(&path, settings)
}

pub fn load_from(path: &Path) -> Result<AppSettings> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("invalid settings in {}", path.display()))
}

pub fn save_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(settings)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}
