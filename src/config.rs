//! Settings store
//!
//! Remembers the last folder DLLs were pulled from in a small JSON file next to
//! the working directory. Loading never fails: anything unexpected on disk reads
//! back as "no folder remembered".

use crate::constant::SETTINGS_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted record. Empty `last_directory` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub last_directory: String,
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the remembered directory, or an empty string if there is none
    /// or the file can't be used.
    pub fn load(&self) -> String {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {:?}", self.path);
                return String::new();
            }
            Err(e) => {
                warn!("Failed to read settings from {:?}: {}", self.path, e);
                return String::new();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => {
                info!("Load settings from {:?}", self.path);
                settings.last_directory
            }
            Err(e) => {
                warn!("Ignoring malformed settings in {:?}: {}", self.path, e);
                String::new()
            }
        }
    }

    /// Overwrite the settings file with `directory` as the only field.
    pub fn save(&self, directory: &str) -> Result<(), ConfigError> {
        let settings = Settings {
            last_directory: directory.to_string(),
        };
        let content = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, content)?;
        info!("Save settings to {:?}", self.path);
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SETTINGS_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use uuid::Uuid;

    fn setup_test_store() -> (SettingsStore, PathBuf) {
        let test_dir = std::env::temp_dir().join(format!("test_settings_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        let store = SettingsStore::new(test_dir.join(SETTINGS_FILE_NAME));
        (store, test_dir)
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    #[test]
    fn test_load_missing_file() {
        let (store, test_dir) = setup_test_store();

        assert_eq!(store.load(), "");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_save_and_load() {
        let (store, test_dir) = setup_test_store();

        store.save("/opt/game/plugins").unwrap();
        assert_eq!(store.load(), "/opt/game/plugins");

        // A fresh store on the same file sees the value, like a restart would
        let reopened = SettingsStore::new(&store.path);
        assert_eq!(reopened.load(), "/opt/game/plugins");

        // Overwrite keeps only the latest value
        store.save(r"C:\Builds\Release 2").unwrap();
        assert_eq!(reopened.load(), r"C:\Builds\Release 2");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_saved_file_has_single_field() {
        let (store, test_dir) = setup_test_store();

        store.save("relative/dir").unwrap();

        let content = fs::read_to_string(&store.path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["last_directory"], "relative/dir");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_load_malformed_file() {
        let (store, test_dir) = setup_test_store();

        fs::write(&store.path, "{ not json").unwrap();
        assert_eq!(store.load(), "", "Invalid JSON should read as unset");

        fs::write(&store.path, r#"{"other": "value"}"#).unwrap();
        assert_eq!(store.load(), "", "Missing field should read as unset");

        fs::write(&store.path, r#"{"last_directory": 42}"#).unwrap();
        assert_eq!(store.load(), "", "Wrong field type should read as unset");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let (_, test_dir) = setup_test_store();
        let store = SettingsStore::new(test_dir.join("missing").join(SETTINGS_FILE_NAME));

        let result = store.save("/some/dir");
        assert!(matches!(result, Err(ConfigError::Io(_))));
        assert_eq!(store.load(), "");

        cleanup_test_dir(&test_dir);
    }
}
