//! Persisted hotkey configuration for the overlay.
//!
//! The file is a flat mapping holding the toggle `keybind` and, optionally,
//! an `exit_key`. The on-disk format follows the file extension: `.toml` is
//! TOML, `.yaml`/`.yml` is YAML, anything else is JSON.

mod key;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use key::{Keybind, DEFAULT_EXIT_KEY, DEFAULT_KEYBIND};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access configuration at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML configuration: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to serialize TOML configuration: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid key identifier: {0}")]
    InvalidKey(String),
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindConfig {
    pub keybind: Keybind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_key: Option<Keybind>,
}

impl KeybindConfig {
    pub fn new(keybind: Keybind) -> Self {
        Self {
            keybind,
            exit_key: None,
        }
    }

    pub fn parse(input: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(input)?,
            ConfigFormat::Toml => toml::from_str(input)?,
            ConfigFormat::Yaml => serde_yaml::from_str(input)?,
        };
        Ok(config)
    }

    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let serialized = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(serialized)
    }

    /// Reads the configuration, failing on a missing or malformed file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, ConfigFormat::from_path(path))
    }

    /// Reads the configuration, falling back to the built-in defaults when the
    /// file is missing or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                debug!(path = %path.display(), keybind = %config.keybind, "loaded keybind configuration");
                config
            }
            Err(err) if err.is_not_found() => {
                debug!(path = %path.display(), "no keybind configuration found; using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load keybind configuration; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Writes the configuration, creating the parent directory if required.
    pub fn persist(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let serialized = self.render(ConfigFormat::from_path(path))?;
        fs::write(path, serialized).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn exit_key(&self) -> Keybind {
        self.exit_key.clone().unwrap_or_else(Keybind::exit_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_keybind_from_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "keybind": "F8" }"#).unwrap();

        let config = KeybindConfig::load(&path).unwrap();
        assert_eq!(config.keybind.as_str(), "F8");
        assert_eq!(config.exit_key().as_str(), DEFAULT_EXIT_KEY);
    }

    #[test]
    fn loads_legacy_numeric_keybind() {
        let config =
            KeybindConfig::parse(r#"{"keybind": 326}"#, ConfigFormat::Json).unwrap();
        assert_eq!(config.keybind.as_str(), "Numpad6");
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = KeybindConfig::load(&path).unwrap_err();
        assert!(err.is_not_found());

        let config = KeybindConfig::load_or_default(&path);
        assert_eq!(config.keybind.as_str(), DEFAULT_KEYBIND);
        assert!(config.exit_key.is_none());
    }

    #[test]
    fn corrupt_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ keybind: ").unwrap();

        assert!(matches!(
            KeybindConfig::load(&path),
            Err(ConfigError::Json(_))
        ));
        assert_eq!(KeybindConfig::load_or_default(&path), KeybindConfig::default());
    }

    #[test]
    fn empty_mapping_uses_default_keybind() {
        let config = KeybindConfig::parse("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config.keybind, Keybind::default());
    }

    #[test]
    fn persisted_json_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.json");
        let config = KeybindConfig::new(Keybind::parse("kp_5").unwrap());

        config.persist(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"keybind\": \"Numpad5\""));
        assert!(!written.contains("exit_key"));

        assert_eq!(KeybindConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn persisted_toml_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = KeybindConfig {
            keybind: Keybind::parse("a").unwrap(),
            exit_key: Some(Keybind::parse("q").unwrap()),
        };

        config.persist(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("keybind = \"KeyA\""));

        let loaded = KeybindConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.exit_key().as_str(), "KeyQ");
    }

    #[test]
    fn persisted_yaml_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let config = KeybindConfig::new(Keybind::parse("kp_5").unwrap());

        config.persist(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("keybind: Numpad5"), "{written}");

        assert_eq!(KeybindConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn loads_hand_written_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "keybind: kp_5
exit_key: q
").unwrap();

        let config = KeybindConfig::load_or_default(&path);
        assert_eq!(config.keybind.as_str(), "Numpad5");
        assert_eq!(config.exit_key().as_str(), "KeyQ");

        fs::write(&path, "keybind: [unclosed").unwrap();
        assert!(matches!(
            KeybindConfig::load(&path),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/config.TOML")),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")),
            ConfigFormat::Yaml
        );
        assert_eq!(ConfigFormat::from_path(Path::new("keys.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }
}
