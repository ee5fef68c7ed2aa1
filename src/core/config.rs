//! Configuration module for the library saver
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\library_saver\config.toml
//! - macOS: ~/Library/Application Support/library_saver/config.toml
//! - Linux: ~/.config/library_saver/config.toml

use crate::library::traits::TargetKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name used for config directory
const APP_NAME: &str = "library_saver";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Local override file checked before the standard location
const LOCAL_CONFIG_FILE_NAME: &str = "library_saver.toml";

/// Title of the Photos album videos are saved into
pub const DEFAULT_ALBUM_NAME: &str = "SwiftyYTDL";

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        fs::write(&config_path, Config::generate_default_config())
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target selection
    pub target: TargetConfig,

    /// Photos album settings (mobile target)
    pub album: AlbumConfig,

    /// Downloads folder settings (desktop target)
    pub desktop: DesktopConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Which library the saver writes into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// "mobile" or "desktop"; defaults to the platform the binary was built for
    pub kind: TargetKind,
}

/// Photos album configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfig {
    /// Album title, matched exactly
    pub name: String,
}

/// Desktop target configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Directory to move files into (empty = OS Downloads folder)
    pub downloads_dir: Option<PathBuf>,

    /// Reveal the saved file in the file browser
    pub reveal_in_file_browser: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log to file
    pub log_to_file: bool,

    /// Log file path
    pub log_file: PathBuf,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ALBUM_NAME.to_string(),
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            downloads_dir: None,
            reveal_in_file_browser: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: PathBuf::from("library_saver.log"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        Self::from_toml_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./library_saver.toml (current directory - for development/override)
    /// 2. Standard config location
    ///
    /// If no config file is found, returns default configuration.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::find_config_file().map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// First existing config file, local override first
    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(".").join(LOCAL_CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        get_config_path().filter(|path| path.exists())
    }

    /// Get the path where the config file is (or would be) located.
    pub fn get_active_config_path() -> PathBuf {
        Self::find_config_file()
            .or_else(get_config_path)
            .unwrap_or_else(|| PathBuf::from(".").join(LOCAL_CONFIG_FILE_NAME))
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::WriteError(path.as_ref().to_path_buf(), e.to_string()))?;

        Ok(())
    }

    /// Generate a default config file with comments
    pub fn generate_default_config() -> String {
        include_str!("../../config.example.toml").to_string()
    }
}

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Failed to read the configuration file
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    ReadError(PathBuf, String),

    /// Failed to parse the configuration file (invalid TOML)
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, String),

    /// Failed to serialize configuration to TOML
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(String),

    /// Failed to write configuration file
    #[error("Failed to write config file '{}': {}", .0.display(), .1)]
    WriteError(PathBuf, String),

    /// Could not determine config directory
    #[error("Could not determine configuration directory")]
    ConfigDirNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target.kind, TargetKind::native());
        assert_eq!(config.album.name, DEFAULT_ALBUM_NAME);
        assert!(config.desktop.downloads_dir.is_none());
        assert!(config.desktop.reveal_in_file_browser);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.log_to_file);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [target]
            kind = "mobile"

            [desktop]
            reveal_in_file_browser = false
            "#,
        )
        .unwrap();
        assert_eq!(config.target.kind, TargetKind::Mobile);
        assert!(!config.desktop.reveal_in_file_browser);
        assert_eq!(config.album.name, DEFAULT_ALBUM_NAME);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_target_kind_is_rejected() {
        assert!(Config::from_toml_str("[target]\nkind = \"tablet\"\n").is_err());
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config = Config::from_toml_str(&Config::generate_default_config()).unwrap();
        assert_eq!(config.album, AlbumConfig::default());
        assert_eq!(config.desktop, DesktopConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.target.kind = TargetKind::Desktop;
        config.album.name = "Saved Videos".to_string();
        config.desktop.downloads_dir = Some(dir.path().join("inbox"));
        config.logging.level = "debug".to_string();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[album\nname = ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }
}
