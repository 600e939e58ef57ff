//! Configuration management for LiquidDoc
//!
//! Reads an optional `config.toml` and lets `LIQUIDDOC_*` environment
//! variables override it. Every key has a built-in default.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::storage::{FileBackend, KeyValueStore, MemoryBackend};

/// Where the key-value store keeps its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key under `store_dir`
    File,
    /// Process memory; nothing persists
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Storage backend (`file` or `memory`)
    /// Environment: LIQUIDDOC_BACKEND
    pub backend: BackendKind,

    /// Directory of the file backend
    /// Environment: LIQUIDDOC_STORE_DIR
    pub store_dir: String,

    /// Optional cap on stored keys plus values, in bytes
    #[serde(default)]
    pub quota_bytes: Option<u64>,

    /// Longest console line accepted
    pub max_command_length: usize,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            store_dir: ".liquiddoc".to_string(),
            quota_bytes: None,
            max_command_length: 512,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("backend", "file")?
            .set_default("store_dir", defaults.store_dir)?
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .set_default("log_level", defaults.log_level)?
            // Packaged layout first, then the working directory.
            .add_source(File::with_name("liquiddoc/config").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("LIQUIDDOC").try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendKind::File && self.store_dir.trim().is_empty() {
            return Err(ConfigError::Message(
                "store_dir cannot be empty for the file backend".into(),
            ));
        }

        if self.quota_bytes == Some(0) {
            return Err(ConfigError::Message(
                "quota_bytes must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.store_dir)
    }

    /// Opens the configured backend and wraps it in a store.
    pub fn open_store(&self) -> Result<KeyValueStore, StoreError> {
        let store = match (self.backend, self.quota_bytes) {
            (BackendKind::Memory, None) => KeyValueStore::new(MemoryBackend::new()),
            (BackendKind::Memory, Some(quota)) => KeyValueStore::new(MemoryBackend::with_quota(quota)),
            (BackendKind::File, None) => KeyValueStore::new(FileBackend::open(self.store_path())?),
            (BackendKind::File, Some(quota)) => {
                KeyValueStore::new(FileBackend::open(self.store_path())?.with_quota(quota))
            }
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_quota() {
        let config = AppConfig {
            quota_bytes: Some(0),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_store_dir_for_file_backend() {
        let mut config = AppConfig {
            store_dir: " ".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.backend = BackendKind::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn opens_file_store_in_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            store_dir: dir.path().join("data").to_string_lossy().into_owned(),
            ..AppConfig::default()
        };

        let store = config.open_store().unwrap();
        assert!(store.set("theme", "light"));
        assert!(dir.path().join("data").join("theme.json").is_file());
    }

    #[test]
    fn deserializes_from_toml_source() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "backend = \"memory\"\nstore_dir = \"x\"\nquota_bytes = 4096\nmax_command_length = 80\nlog_level = \"debug\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.quota_bytes, Some(4096));
        assert_eq!(config.max_command_length, 80);
    }
}
