use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the per-user preference file, placed in the home directory.
pub const PREFERENCES_FILE_NAME: &str = ".cookie_cost.json";

/// User preferences persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Ask for confirmation before deleting an ingredient row.
    pub ask_before_delete: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ask_before_delete: true,
        }
    }
}

/// JSON-file backed preference storage.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.cookie_cost.json`, or the working directory if no home directory is known.
    pub fn default_location() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the preference file. A missing file yields the defaults.
    pub fn try_load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid preference file {}", self.path.display()))
    }

    pub fn try_save(&self, preferences: &Preferences) -> Result<()> {
        let json = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Load preferences, falling back to the defaults on any failure.
    pub fn load(&self) -> Preferences {
        match self.try_load() {
            Ok(preferences) => preferences,
            Err(err) => {
                tracing::debug!(error = %err, "using default preferences");
                Preferences::default()
            }
        }
    }

    /// Save preferences. Failures are logged and otherwise ignored.
    pub fn save(&self, preferences: &Preferences) {
        if let Err(err) = self.try_save(preferences) {
            tracing::warn!(error = %err, "could not save preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load(), Preferences::default());
        assert!(store.load().ask_before_delete);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        store.save(&Preferences {
            ask_before_delete: false,
        });

        assert!(!store.load().ask_before_delete);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"ask_before_delete\": false"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_unknown_and_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"cookie_yield": 40}"#).unwrap();

        let store = PreferenceStore::new(&path);
        assert!(store.load().ask_before_delete);
    }

    #[test]
    fn test_save_into_missing_directory_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("nope").join("prefs.json"));
        store.save(&Preferences::default());
        assert!(store.try_save(&Preferences::default()).is_err());
    }
}
