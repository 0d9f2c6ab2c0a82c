//! JSON configuration store.
//!
//! Settings live in `<config dir>/quill/config.json` (or the path in
//! `QUILL_CONFIG`). A missing file means defaults. The API key may also come
//! from `GEMINI_API_KEY`, which takes precedence over the file.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::commit::GenerationConfig;
use crate::error::ConfigError;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "QUILL_CONFIG";

/// Supplies the API key without writing it to disk.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Model used when the config does not name one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Contents of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub use_conventional_format: bool,
    pub max_message_length: usize,
    pub include_body: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_instructions: Option<String>,
    pub auto_push: bool,
}

impl Default for Config {
    fn default() -> Self {
        let generation = GenerationConfig::default();
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            use_conventional_format: generation.use_conventional_format,
            max_message_length: generation.max_message_length,
            include_body: generation.include_body,
            extra_instructions: generation.extra_instructions,
            auto_push: false,
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(p) = env::var(CONFIG_PATH_ENV_VAR)
            && !p.is_empty()
        {
            return Ok(PathBuf::from(p));
        }
        dirs::config_dir()
            .map(|dir| dir.join("quill").join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write pretty JSON atomically, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent).map_err(write_err)?;

        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Set one key from its textual value, using the JSON key names.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "apiKey" => self.api_key = non_empty(value),
            "model" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(invalid(key, "model name cannot be empty"));
                }
                self.model = value.to_string();
            }
            "useConventionalFormat" => self.use_conventional_format = parse_bool(key, value)?,
            "maxMessageLength" => {
                self.max_message_length = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(key, "expected a positive integer"))?;
            }
            "includeBody" => self.include_body = parse_bool(key, value)?,
            "extraInstructions" => self.extra_instructions = non_empty(value),
            "autoPush" => self.auto_push = parse_bool(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_message_length == 0 {
            return Err(invalid("maxMessageLength", "must be greater than 0"));
        }
        Ok(())
    }

    /// The API key, preferring the environment over the file.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        env::var(API_KEY_ENV_VAR)
            .ok()
            .and_then(|k| non_empty(&k))
            .or_else(|| self.api_key.clone().and_then(|k| non_empty(&k)))
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Settings for the prompt builder.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            use_conventional_format: self.use_conventional_format,
            max_message_length: self.max_message_length,
            include_body: self.include_body,
            extra_instructions: self.extra_instructions.clone(),
        }
    }

    /// Copy suitable for display, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        shown.api_key = self.api_key.as_deref().map(mask_key);
        shown
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.use_conventional_format);
        assert_eq!(config.max_message_length, 72);
        assert!(!config.include_body);
        assert!(!config.auto_push);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"includeBody": true}"#).unwrap();
        assert!(config.include_body);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_message_length, 72);
    }

    #[test]
    fn test_set_parses_values() {
        let mut config = Config::default();
        config.set("useConventionalFormat", "false").unwrap();
        config.set("maxMessageLength", "50").unwrap();
        config.set("extraInstructions", "Reference the ticket").unwrap();
        config.set("autoPush", "yes").unwrap();

        assert!(!config.use_conventional_format);
        assert_eq!(config.max_message_length, 50);
        assert_eq!(config.extra_instructions.as_deref(), Some("Reference the ticket"));
        assert!(config.auto_push);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("includeBody", "maybe"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            config.set("maxMessageLength", "0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            config.set("colour", "blue"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_blank_extra_instructions_clears() {
        let mut config = Config::default();
        config.set("extraInstructions", "x").unwrap();
        config.set("extraInstructions", "  ").unwrap();
        assert!(config.extra_instructions.is_none());
    }

    #[test]
    fn test_generation_projection() {
        let mut config = Config::default();
        config.include_body = true;
        config.extra_instructions = Some("Be terse".to_string());

        let generation = config.generation();
        assert!(generation.include_body);
        assert_eq!(generation.extra_instructions.as_deref(), Some("Be terse"));
    }

    #[test]
    fn test_redacted_masks_key() {
        let config = Config {
            api_key: Some("AIzaSecret1234".to_string()),
            ..Config::default()
        };
        assert_eq!(config.redacted().api_key.as_deref(), Some("****1234"));
    }
}
