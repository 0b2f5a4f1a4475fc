//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the postcard list lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_file")]
    pub file: String,
}

fn default_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("postcards").join("postcards.txt").to_string_lossy().to_string())
        .unwrap_or_else(|| "./postcards.txt".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
        }
    }
}

impl StorageConfig {
    /// Configured file path with a leading `~/` expanded
    pub fn path(&self) -> PathBuf {
        match (self.file.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.file),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// True when structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("postcards").join("config.toml")),
            Some(PathBuf::from("./postcards.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(file) = lookup("POSTCARDS_FILE") {
            self.storage.file = file;
        }
        if let Some(level) = lookup("POSTCARDS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("POSTCARDS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    // TOML-quoted, backslashes in Windows paths included
    let file = toml::Value::String(default_file()).to_string();

    format!(
        r#"# Postcards Configuration
#
# Environment variables override these settings:
# - POSTCARDS_FILE
# - POSTCARDS_LOG_LEVEL
# - POSTCARDS_LOG_FORMAT

[storage]
# Postcard list used when --file is not given
file = {file}

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.storage.file.ends_with("postcards.txt"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.file, default_file());
        assert_eq!(config.storage.file, Config::default().storage.file);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[logging]\nformat = \"json\"\n").unwrap();
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.file.ends_with("postcards.txt"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("POSTCARDS_FILE", "/tmp/cards.txt"),
            ("POSTCARDS_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.path(), PathBuf::from("/tmp/cards.txt"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("postcards.toml");
        std::fs::write(&path, "[storage]\nfile = \"cards.txt\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.storage.file, "cards.txt");
        assert_eq!(config.storage.path(), PathBuf::from("cards.txt"));
    }

    #[test]
    fn test_home_expansion() {
        let storage = StorageConfig {
            file: "~/cards/postcards.txt".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage.path(), home.join("cards/postcards.txt"));
        }
    }

    #[test]
    fn test_load_errors_name_the_path() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io { path, .. }) if path == missing
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[storage\n").unwrap();
        assert!(matches!(
            Config::load(&broken),
            Err(ConfigError::Parse { path, .. }) if path == broken
        ));
    }
}
