//! Configuration for the cheatsheet library.
//!
//! Configuration is a single TOML file. Missing files and missing sections
//! fall back to defaults, so an empty file is a valid configuration.
//!
//! ## File Location
//!
//! `config.toml` inside `$CHEATSHEET_CONFIG_DIR` when set, otherwise the
//! platform config directory:
//! - Linux: `~/.config/cheatsheet/config.toml`
//! - macOS: `~/Library/Application Support/dev.cheatsheet.cheatsheet/config.toml`
//! - Windows: `%APPDATA%\cheatsheet\cheatsheet\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [paths]
//! root = "/home/user/.local/share/cheatsheet"
//!
//! [import]
//! default_name = "Imported from Markdown"
//!
//! [search]
//! limit = 50
//! ```
//!
//! ## Environment
//!
//! - `CHEATSHEET_CONFIG_DIR`: directory holding `config.toml`
//! - `CHEATSHEET_DATA_DIR`: overrides `paths.root`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config directory.
pub const CONFIG_DIR_ENV: &str = "CHEATSHEET_CONFIG_DIR";
/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "CHEATSHEET_DATA_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Global configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File system paths.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Markdown import settings.
    #[serde(default)]
    pub import: ImportConfig,
    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// File system paths configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory holding `index.json` and `cheatsheets/`.
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: directories::ProjectDirs::from("dev", "cheatsheet", "cheatsheet").map_or_else(
                || {
                    directories::BaseDirs::new().map_or_else(
                        || PathBuf::from(".cheatsheet"),
                        |base| base.home_dir().join(".cheatsheet"),
                    )
                },
                |dirs| dirs.data_dir().to_path_buf(),
            ),
        }
    }
}

/// Markdown import settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Name given to Markdown imports that do not specify one.
    pub default_name: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_name: "Imported from Markdown".to_string(),
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default maximum number of results shown.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

impl Config {
    /// Load configuration from the default location, then apply environment overrides.
    ///
    /// Returns defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from `path`, returning defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Config("Invalid config path".into()))?;
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error when no platform config directory exists and
    /// `CHEATSHEET_CONFIG_DIR` is unset.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join(CONFIG_FILE));
            }
        }

        let project_dirs = directories::ProjectDirs::from("dev", "cheatsheet", "cheatsheet")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply environment overrides read through `var`.
    #[must_use]
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = var(DATA_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                self.paths.root = PathBuf::from(trimmed);
            }
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.import.default_name, "Imported from Markdown");
        assert_eq!(config.search.limit, 50);
        assert!(!config.paths.root.as_os_str().is_empty());
    }

    #[test]
    fn test_config_save_and_load_roundtrip() -> Result<()> {
        // Given: a customised config
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = Config {
            paths: PathsConfig {
                root: temp_dir.path().join("data"),
            },
            import: ImportConfig {
                default_name: "From notes".to_string(),
            },
            search: SearchConfig { limit: 7 },
        };

        // When: saving and loading it back
        config.save_to(&path)?;
        let loaded = Config::load_from(&path)?;

        // Then
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[search]\nlimit = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.search.limit, 3);
        assert_eq!(config.import, ImportConfig::default());
    }

    #[test]
    fn test_config_parse_invalid_toml() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[search\nlimit = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config::default().with_overrides(|key| {
            (key == DATA_DIR_ENV).then(|| "/tmp/cheatsheets".to_string())
        });
        assert_eq!(config.paths.root, PathBuf::from("/tmp/cheatsheets"));

        let untouched = Config::default().with_overrides(|_| Some("   ".to_string()));
        assert_eq!(untouched.paths.root, Config::default().paths.root);
    }

    proptest! {
        #[test]
        fn test_config_values_roundtrip(
            limit in 1usize..10_000,
            name in r"[A-Za-z0-9 _.:()-]{0,40}",
        ) {
            let config = Config {
                import: ImportConfig { default_name: name },
                search: SearchConfig { limit },
                ..Config::default()
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let back: Config = toml::from_str(&toml).unwrap();
            prop_assert_eq!(back, config);
        }
    }
}
