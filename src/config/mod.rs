//! Preference file support for shutterbar.
//!
//! The only persisted setting is the screenshot output folder, stored as a
//! small JSON object at `~/.config/screenshot_app_config.json`. A missing
//! file is normal and yields the defaults; a malformed file is surfaced to
//! the caller, which reports it and falls back to the default folder.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name under `~/.config`.
pub const CONFIG_FILE_NAME: &str = "screenshot_app_config.json";

const DEFAULT_FOLDER_NAME: &str = "Screenshots";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// User preferences. Loaded once at startup, written back immediately when
/// the output folder changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Absolute path screenshots are written to.
    pub output_folder: PathBuf,
}

impl Preferences {
    /// The fallback output folder, `~/Screenshots`.
    pub fn default_folder() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_FOLDER_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FOLDER_NAME))
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            output_folder: Self::default_folder(),
        }
    }
}

/// On-disk shape of the preference file.
#[derive(Debug, Serialize, Deserialize)]
struct PreferencesFile {
    output_folder: PathBuf,
}

/// Handle to the on-disk preference file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the standard location, `~/.config/screenshot_app_config.json`.
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self {
            path: home.join(".config").join(CONFIG_FILE_NAME),
        })
    }

    /// Store at an explicit path (tests, non-standard setups).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences from the file.
    ///
    /// A missing file yields the defaults. Read and parse failures are
    /// returned so the caller can report them and fall back.
    pub fn load(&self) -> Result<Preferences, ConfigError> {
        if !self.path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", self.path.display());
            return Ok(Preferences::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let parsed: PreferencesFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        info!("Loaded config from {}", self.path.display());
        Ok(Preferences {
            output_folder: parsed.output_folder,
        })
    }

    /// Loads preferences, falling back to the defaults on any failure.
    ///
    /// The failure is handed back alongside so the caller can surface it.
    pub fn load_or_default(&self) -> (Preferences, Option<ConfigError>) {
        match self.load() {
            Ok(prefs) => (prefs, None),
            Err(err) => {
                warn!("Falling back to default preferences: {}", err);
                (Preferences::default(), Some(err))
            }
        }
    }

    /// Persists the output folder, creating the parent directory if needed
    /// and overwriting any existing file.
    pub fn save(&self, folder: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string(&PreferencesFile {
            output_folder: folder.to_path_buf(),
        })
        .map_err(|source| ConfigError::Serialize { source })?;

        fs::write(&self.path, contents).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::at(temp.path().join(CONFIG_FILE_NAME))
    }

    #[test]
    fn load_returns_defaults_when_file_missing() {
        let temp = TempDir::new().unwrap();
        let prefs = store_in(&temp).load().unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn load_returns_stored_folder() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), r#"{"output_folder": "/tmp/shots"}"#).unwrap();

        let prefs = store.load().unwrap();
        assert_eq!(prefs.output_folder, PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "not json at all").unwrap();

        let err = store.load().expect_err("malformed file must error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_or_default_falls_back_on_malformed_json() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "{\"output_folder\": 42}").unwrap();

        let (prefs, err) = store.load_or_default();
        assert_eq!(prefs, Preferences::default());
        assert!(err.is_some());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let folder = PathBuf::from("/tmp/round-trip/shots");

        store.save(&folder).unwrap();
        let prefs = store.load().unwrap();
        assert_eq!(prefs.output_folder, folder);
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::at(temp.path().join("nested").join(CONFIG_FILE_NAME));

        store.save(Path::new("/tmp/shots")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_overwrites_previous_value() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.save(Path::new("/tmp/first")).unwrap();
        store.save(Path::new("/tmp/second")).unwrap();

        let prefs = store.load().unwrap();
        assert_eq!(prefs.output_folder, PathBuf::from("/tmp/second"));
    }
}
