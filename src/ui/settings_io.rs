use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::ui::settings::ClientSettings;

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("narrative_client");
    path.push("settings.json");
    path
}

/// Reads settings, falling back to defaults when the file is missing or bad.
pub fn load_settings_from(path: &Path) -> ClientSettings {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => {
            info!(path = %path.display(), "no settings file, using defaults");
            return ClientSettings::default();
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
        ClientSettings::default()
    })
}

pub fn save_settings_to(path: &Path, settings: &ClientSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &ClientSettings) -> anyhow::Result<()> {
    save_settings_to(&settings_path(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = ClientSettings {
            ui_scale: 1.25,
            server_url: "http://10.0.0.2:8000".into(),
            narration_typing_ms: 5,
            ..Default::default()
        };
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), ClientSettings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), ClientSettings::default());
    }
}
