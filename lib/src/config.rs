use crate::error::{ExportError, Result};
use crate::exporter::DEFAULT_FILENAME;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory exports are saved into
    #[serde(default = "crate::utils::get_download_dir")]
    pub download_dir: PathBuf,

    /// Name of the exported file
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Preferred browser when detecting profiles (chrome, firefox, edge)
    #[serde(default)]
    pub browser: Option<String>,

    /// Preferred profile name when detecting profiles
    #[serde(default)]
    pub profile: Option<String>,

    /// Explicit bookmarks file, skips detection
    #[serde(default)]
    pub bookmarks_path: Option<PathBuf>,

    /// Seconds to wait for the responder; 0 waits forever
    #[serde(default = "default_reply_timeout_secs")]
    pub reply_timeout_secs: u64,

    /// Replace an existing file instead of saving a numbered copy
    #[serde(default)]
    pub overwrite: bool,

    /// Open the saved file with the system handler
    #[serde(default)]
    pub open_after_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: crate::utils::get_download_dir(),
            filename: default_filename(),
            browser: None,
            profile: None,
            bookmarks_path: None,
            reply_timeout_secs: default_reply_timeout_secs(),
            overwrite: false,
            open_after_export: false,
        }
    }
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_reply_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        // An empty or comment-only file deserializes to unit, not a map.
        if contents.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents)?;
        if config.filename.trim().is_empty() {
            return Err(ExportError::Config("filename must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Load configuration from default location (~/.config/markport/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to load config from {:?}: {}. Using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// How long the exporter waits for a reply.
    pub fn reply_timeout(&self) -> Option<Duration> {
        match self.reply_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filename, "bookmarks.json");
        assert_eq!(config.reply_timeout(), Some(Duration::from_secs(30)));
        assert!(!config.overwrite);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            download_dir: PathBuf::from("/tmp/exports"),
            filename: "backup.json".to_string(),
            browser: Some("firefox".to_string()),
            profile: None,
            bookmarks_path: None,
            reply_timeout_secs: 5,
            overwrite: true,
            open_after_export: false,
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "browser: chrome\nreply_timeout_secs: 0\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.browser.as_deref(), Some("chrome"));
        assert_eq!(config.filename, "bookmarks.json");
        assert_eq!(config.reply_timeout(), None);
    }

    #[test]
    fn test_load_comment_only_config() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "# Empty config\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.filename, "bookmarks.json");
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "filename: ''\n").unwrap();

        let err = Config::load_from_path(temp_file.path()).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }
}
