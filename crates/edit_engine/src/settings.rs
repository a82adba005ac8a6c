//! Editor settings management
//!
//! Drop zone fractions and history depth are configurable. Settings live in a
//! JSON file inside the host's data directory; a missing file means defaults,
//! and a file that fails to parse or validate is logged and ignored.

use crate::{EditError, Result};
use layout_engine::ZoneConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the settings file inside the data directory
pub const SETTINGS_FILE_NAME: &str = "form_editor.json";

/// Settings for the form editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Edge fractions used to classify drops
    pub drop_zones: ZoneConfig,
    /// Maximum number of undo snapshots kept
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            drop_zones: ZoneConfig::default(),
            history_limit: 100,
        }
    }
}

impl EditorSettings {
    pub fn validate(&self) -> Result<()> {
        self.drop_zones.validate()?;
        if self.history_limit == 0 {
            return Err(EditError::InvalidSettings(
                "historyLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads, saves and updates editor settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: EditorSettings,
}

impl SettingsManager {
    /// Create a settings manager for the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join(SETTINGS_FILE_NAME),
            current: EditorSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, falling back to defaults
    pub fn load_sync(&mut self) -> Result<&EditorSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match Self::parse(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        target: "edit_engine::settings",
                        path = %self.settings_path.display(),
                        "Failed to load settings file, using defaults: {}",
                        e
                    );
                    EditorSettings::default()
                }
            }
        } else {
            EditorSettings::default()
        };
        Ok(&self.current)
    }

    fn parse(content: &str) -> Result<EditorSettings> {
        let settings: EditorSettings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save current settings to disk
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &EditorSettings {
        &self.current
    }

    /// Validate, store and save new settings
    pub fn update_sync(&mut self, settings: EditorSettings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.drop_zones.horizontal_edge, 0.20);
        assert_eq!(settings.drop_zones.field_vertical_edge, 0.30);
        assert_eq!(settings.drop_zones.row_vertical_edge, 0.15);
        assert_eq!(settings.history_limit, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = SettingsManager::parse(r#"{"historyLimit": 5}"#).unwrap();
        assert_eq!(settings.history_limit, 5);
        assert_eq!(settings.drop_zones, ZoneConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SettingsManager::parse(r#"{"historyLimit": 0}"#).is_err());
        assert!(SettingsManager::parse(r#"{"dropZones": {"horizontalEdge": 0.7}}"#).is_err());
    }

    #[test]
    fn test_load_save_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &EditorSettings::default());

        let mut updated = EditorSettings::default();
        updated.drop_zones.row_vertical_edge = 0.25;
        updated.history_limit = 20;
        manager.update_sync(updated.clone()).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path().to_path_buf());
        assert_eq!(manager2.load_sync().unwrap(), &updated);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "{ nope").unwrap();

        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());
        assert_eq!(manager.load_sync().unwrap(), &EditorSettings::default());
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        let mut bad = EditorSettings::default();
        bad.history_limit = 0;
        assert!(matches!(
            manager.update_sync(bad),
            Err(EditError::InvalidSettings(_))
        ));
        assert!(!manager.settings_path().exists());
    }

    #[test]
    fn test_reset_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        let mut changed = EditorSettings::default();
        changed.history_limit = 3;
        manager.update_sync(changed).unwrap();

        let settings = manager.reset_sync().unwrap();
        assert_eq!(settings.history_limit, 100);
    }
}
