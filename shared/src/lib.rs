#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod form;
pub mod model;
pub mod notice;
pub mod persistence;
pub mod search;
pub mod store;
pub mod view;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::StorageConfig;
pub use event::Event;
pub use model::{Model, Pet, PetId};
pub use search::SearchField;
pub use view::ViewModel;

pub const DEFAULT_STORAGE_KEY: &str = "@pet-manager-pets";
pub const MAX_STORAGE_KEY_LENGTH: usize = 512;

pub const MSG_ADDED: &str = "Successfully added new pet!";
pub const MSG_UPDATED: &str = "Successfully updated pet!";
pub const MSG_DELETED: &str = "Successfully deleted pet!";
pub const MSG_DUPLICATE_NAME: &str = "Duplicate names not allowed";
pub const MSG_NO_CHANGES: &str = "No changes detected";
pub const MSG_REQUIRED_FIELDS: &str = "Name and Age fields are required";
pub const MSG_PET_MISSING: &str = "This pet no longer exists";
pub const MSG_ID_CONFLICT: &str = "This pet already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Recoverable,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Storage,
    Serialization,
    Deserialization,
    Corrupted,
    InvalidConfig,
    PhotoPicker,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Storage => "STORAGE_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Corrupted => "CORRUPTED_DATA",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::PhotoPicker => "PHOTO_PICKER_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::PhotoPicker => ErrorSeverity::Recoverable,

            Self::Storage
            | Self::Serialization
            | Self::Deserialization
            | Self::Corrupted
            | Self::InvalidConfig => ErrorSeverity::Fatal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            internal_message: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity, ErrorSeverity::Fatal)
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Storage => {
                "Your pets could not be read from or written to this device.".into()
            }
            ErrorKind::Serialization => "Your pets could not be saved.".into(),
            ErrorKind::Deserialization | ErrorKind::Corrupted => {
                "Saved pet data is damaged and was not loaded. Changes will not be saved.".into()
            }
            ErrorKind::InvalidConfig => "The app is misconfigured.".into(),
            ErrorKind::PhotoPicker => self.message.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " ({internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
    #[error("Stored data is corrupted: {reason}")]
    Corrupted { reason: String },
    #[error("Storage read failed: {0}")]
    ReadFailed(String),
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        let kind = match &e {
            PersistenceError::SerializationFailed(_) => ErrorKind::Serialization,
            PersistenceError::DeserializationFailed(_) => ErrorKind::Deserialization,
            PersistenceError::Corrupted { .. } => ErrorKind::Corrupted,
            PersistenceError::ReadFailed(_) | PersistenceError::WriteFailed(_) => {
                ErrorKind::Storage
            }
        };
        AppError::new(kind, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_errors_are_fatal() {
        let err: AppError = PersistenceError::ReadFailed("disk gone".into()).into();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.is_fatal());
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn corrupted_blob_maps_to_corrupted_kind() {
        let err: AppError = PersistenceError::Corrupted {
            reason: "duplicate id".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Corrupted);
        assert!(err.user_facing_message().contains("damaged"));
    }

    #[test]
    fn recoverable_kinds_pass_message_through() {
        let err = AppError::new(ErrorKind::PhotoPicker, "Photo library unavailable");
        assert!(!err.is_fatal());
        assert_eq!(err.user_facing_message(), "Photo library unavailable");
    }

    #[test]
    fn display_includes_code_and_internal_detail() {
        let err = AppError::new(ErrorKind::Storage, "write failed").with_internal("EACCES");
        assert_eq!(err.to_string(), "[STORAGE_ERROR] write failed (EACCES)");
    }

    #[test]
    fn context_is_recorded() {
        let err = AppError::new(ErrorKind::Storage, "x").with_context("key", "@pets");
        assert_eq!(err.context.get("key").map(String::as_str), Some("@pets"));
    }
}
