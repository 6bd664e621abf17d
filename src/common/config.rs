//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};
use crate::bigbang::{OwnershipMode, MAX_CAPACITY};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Container/Element driver settings
    #[serde(default)]
    pub bigbang: BigbangConfig,

    /// Fibonacci table settings
    #[serde(default)]
    pub fibo: FiboConfig,

    /// Controlled map settings
    #[serde(default)]
    pub map: MapConfig,

    /// Terminal output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Container/Element driver settings
#[derive(Debug, Deserialize)]
pub struct BigbangConfig {
    /// Number of container slots
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Whether the container owns or merely views its elements
    #[serde(default)]
    pub ownership: OwnershipMode,

    /// Insert the peer element before the primary one
    #[serde(default)]
    pub peer_first: bool,
}

impl Default for BigbangConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            ownership: OwnershipMode::default(),
            peer_first: false,
        }
    }
}

fn default_capacity() -> usize {
    10
}

/// Fibonacci table settings
#[derive(Debug, Deserialize)]
pub struct FiboConfig {
    /// First (largest) n of the printed table
    #[serde(default = "default_fibo_start")]
    pub start: u32,
}

impl Default for FiboConfig {
    fn default() -> Self {
        Self {
            start: default_fibo_start(),
        }
    }
}

fn default_fibo_start() -> u32 {
    9
}

/// Controlled map settings
#[derive(Debug, Deserialize, Default)]
pub struct MapConfig {
    /// File receiving the replay log (stderr when unset)
    pub log_path: Option<PathBuf>,
}

/// Terminal output settings
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Colour scenario runner output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        if !(1..=MAX_CAPACITY).contains(&config.bigbang.capacity) {
            return Err(Error::Config(format!(
                "bigbang.capacity must be between 1 and {}",
                MAX_CAPACITY
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.bigbang.capacity, 10);
        assert_eq!(config.bigbang.ownership, OwnershipMode::Owning);
        assert!(!config.bigbang.peer_first);
        assert_eq!(config.fibo.start, 9);
        assert!(config.map.log_path.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml_str(
            r#"
[bigbang]
capacity = 2
ownership = "viewing"
peer_first = true

[fibo]
start = 20

[output]
color = false
"#,
        )
        .unwrap();
        assert_eq!(config.bigbang.capacity, 2);
        assert_eq!(config.bigbang.ownership, OwnershipMode::Viewing);
        assert!(config.bigbang.peer_first);
        assert_eq!(config.fibo.start, 20);
        assert!(!config.output.color);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_toml_str("[bigbang]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let err = Config::from_toml_str("[bigbang]\ncapacity = 1000000000000\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let config = Config::from_toml_str(&format!("[bigbang]\ncapacity = {}\n", MAX_CAPACITY));
        assert_eq!(config.unwrap().bigbang.capacity, MAX_CAPACITY);
    }

    #[test]
    fn test_unknown_ownership_is_parse_error() {
        let err = Config::from_toml_str("[bigbang]\nownership = \"both\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fibo]\nstart = 4\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fibo.start, 4);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
