//! Persisted user configuration.
//!
//! fidy remembers a single value between runs: the display name used in its
//! greetings. It is stored as pretty-printed JSON in `~/.fidy/config.json`:
//!
//! ```json
//! {
//!   "name": "Ada"
//! }
//! ```
//!
//! Access goes through the [`ConfigStore`] trait so the CLI can be driven against
//! any location (or an in-memory store) without touching the user's home.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user configuration directory inside the home directory.
pub const CONFIG_DIR_NAME: &str = ".fidy";

/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur while reading or writing the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The home directory could not be determined.
    HomeDirUnavailable,
    /// IO error while reading or writing the configuration.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file exists but is not a valid configuration.
    Invalid { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::HomeDirUnavailable => {
                write!(f, "Could not determine the home directory")
            }
            ConfigError::Io { path, source } => {
                write!(f, "IO error on configuration {}: {}", path.display(), source)
            }
            ConfigError::Invalid { path, reason } => {
                write!(f, "Invalid configuration {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Display name used in greetings. Empty when the user never set one.
    #[serde(default)]
    pub name: String,
}

impl Config {
    /// Returns the stored name, if one was set.
    pub fn display_name(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Loads and saves the persisted [`Config`].
pub trait ConfigStore {
    /// Reads the configuration. A store that holds nothing yet yields the default.
    fn load(&self) -> Result<Config, ConfigError>;

    /// Replaces the stored configuration.
    fn save(&self, config: &Config) -> Result<(), ConfigError>;
}

/// A [`ConfigStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Creates a store reading and writing the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default per-user location, `~/.fidy/config.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HomeDirUnavailable` if the home directory is unknown.
    pub fn at_default_location() -> Result<Self, ConfigError> {
        default_config_path().map(Self::new)
    }

    /// The file this store uses.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(config).map_err(|e| ConfigError::Invalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        fs::write(&self.path, json).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// A [`ConfigStore`] that only lives as long as the process.
///
/// Used when the home directory cannot be located, so a name given with `-name`
/// still shows up in this run's greeting.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: RefCell<Config>,
}

impl MemoryConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            config: RefCell::new(config),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        Ok(self.config.borrow().clone())
    }

    fn save(&self, config: &Config) -> Result<(), ConfigError> {
        *self.config.borrow_mut() = config.clone();
        Ok(())
    }
}

/// Returns `~/.fidy/config.json` for the current user.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::HomeDirUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonConfigStore::new(temp_dir.path().join("config.json"));

        let config = store.load().expect("missing file should not be an error");
        assert_eq!(config, Config::default());
        assert_eq!(config.display_name(), None);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(".fidy").join("config.json");
        let store = JsonConfigStore::new(&path);

        store
            .save(&Config {
                name: "Ada".to_string(),
            })
            .expect("save should succeed");

        assert!(path.is_file());
        let reloaded = store.load().expect("load should succeed");
        assert_eq!(reloaded.display_name(), Some("Ada"));
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonConfigStore::new(temp_dir.path().join("config.json"));
        store
            .save(&Config {
                name: "Grace".to_string(),
            })
            .expect("save should succeed");

        let content = fs::read_to_string(store.path()).expect("Failed to read config");
        assert_eq!(content, "{\n  \"name\": \"Grace\"\n}");
    }

    #[test]
    fn test_unknown_fields_and_missing_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "dark"}"#).expect("Failed to write config");

        let config = JsonConfigStore::new(&path).load().expect("load should succeed");
        assert_eq!(config.name, "");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").expect("Failed to write config");

        let result = JsonConfigStore::new(&path).load();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryConfigStore::default();
        assert_eq!(store.load().expect("load should succeed"), Config::default());

        let config = Config {
            name: "Linus".to_string(),
        };
        store.save(&config).expect("save should succeed");
        assert_eq!(store.load().expect("load should succeed"), config);
    }

    #[test]
    fn test_blank_name_is_not_a_display_name() {
        let config = Config {
            name: "   ".to_string(),
        };
        assert_eq!(config.display_name(), None);
    }
}
