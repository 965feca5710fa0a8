use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AppError, ErrorKind, DEFAULT_STORAGE_KEY, MAX_STORAGE_KEY_LENGTH};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid storage key '{key}': {reason}")]
    InvalidStorageKey { key: String, reason: &'static str },
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::new(ErrorKind::InvalidConfig, e.to_string())
    }
}

/// Where the pet collection lives in the shell's key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn with_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self { key: key.into() };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = &self.key;
        let invalid = |reason| ConfigError::InvalidStorageKey {
            key: key.chars().take(50).collect(),
            reason,
        };

        if key.trim().is_empty() {
            return Err(invalid("key cannot be empty"));
        }
        if key.len() > MAX_STORAGE_KEY_LENGTH {
            return Err(invalid("key exceeds maximum length"));
        }
        if key.chars().any(char::is_control) {
            return Err(invalid("key contains control characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_is_valid() {
        let config = StorageConfig::default();
        assert_eq!(config.key, "@pet-manager-pets");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_blank_key() {
        assert!(StorageConfig::with_key("").is_err());
        assert!(StorageConfig::with_key("   ").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(StorageConfig::with_key("pets\0").is_err());
        assert!(StorageConfig::with_key("pets\nkey").is_err());
    }

    #[test]
    fn rejects_overlong_key() {
        let long_key = "k".repeat(MAX_STORAGE_KEY_LENGTH + 1);
        assert!(StorageConfig::with_key(long_key).is_err());
    }

    #[test]
    fn config_error_maps_to_fatal_app_error() {
        let err: AppError = StorageConfig::with_key("").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::InvalidConfig);
        assert!(err.is_fatal());
    }
}
