//! User settings file.

use crate::AppError;
use plandraft_core::EditorSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Designer defaults, read once when an editor session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerSettings {
    pub default_grid_visible: bool,
    pub default_snapping_enabled: bool,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            default_grid_visible: true,
            default_snapping_enabled: true,
        }
    }
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub designer: DesignerSettings,
}

impl AppSettings {
    /// `<config dir>/plandraft/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("plandraft").join("settings.json"))
    }

    /// Read settings from `path`.
    ///
    /// A missing file gives the defaults. So does an unreadable one, with a warning.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Initial editor toggles.
    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            grid_visible: self.designer.default_grid_visible,
            snapping_enabled: self.designer.default_snapping_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.editor_settings(), EditorSettings::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"designer":{"defaultSnappingEnabled":false}}"#).unwrap();

        let settings = AppSettings::load(&path).unwrap().editor_settings();
        assert!(settings.grid_visible);
        assert!(!settings.snapping_enabled);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "designer = true").unwrap();
        assert_eq!(AppSettings::load(&path).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = AppSettings::default();
        settings.designer.default_grid_visible = false;

        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path).unwrap(), settings);
    }
}
