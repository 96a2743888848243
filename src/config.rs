use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const APP_DIR: &str = "daily-selfie";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings, read from `<config_dir>/daily-selfie/config.json`.
///
/// Every field is optional in the file:
///
/// ```json
/// { "pictures_dir": "/home/me/Selfies", "reminder_interval_secs": 3600 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the selfie list file is kept
    pub data_dir: PathBuf,
    /// Where captured photos are written
    pub pictures_dir: PathBuf,
    /// Name of the selfie list file inside `data_dir`
    pub list_file_name: String,
    /// Seconds between selfie reminders, 0 turns them off
    pub reminder_interval_secs: u64,
    /// Edge length of list thumbnails in pixels
    pub thumbnail_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pictures_dir: default_pictures_dir(),
            list_file_name: "Daily_Selfie_data.txt".to_string(),
            // Two minutes
            reminder_interval_secs: 2 * 60,
            thumbnail_size: 96,
        }
    }
}

impl AppConfig {
    /// Load the user's config, falling back to defaults.
    /// A broken config file is logged, not fatal.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(Some(config)) => {
                info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read a config file. A missing file is `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
    }

    /// Get the path where the config file should be
    /// - Linux: ~/.config/daily-selfie/config.json
    /// - macOS: ~/Library/Application Support/daily-selfie/config.json
    /// - Windows: %APPDATA%\daily-selfie\config.json
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reminder period, None when reminders are off
    pub fn reminder_interval(&self) -> Option<Duration> {
        (self.reminder_interval_secs > 0).then(|| Duration::from_secs(self.reminder_interval_secs))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_pictures_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.list_file_name, "Daily_Selfie_data.txt");
        assert_eq!(config.reminder_interval(), Some(Duration::from_secs(120)));
        assert!(config.data_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(AppConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap(), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "pictures_dir": "/srv/selfies", "reminder_interval_secs": 0 }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap().unwrap();

        assert_eq!(config.pictures_dir, PathBuf::from("/srv/selfies"));
        assert_eq!(config.reminder_interval(), None);
        assert_eq!(config.thumbnail_size, 96);
        assert_eq!(config.list_file_name, "Daily_Selfie_data.txt");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }
}
