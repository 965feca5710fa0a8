use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::{ConfigError, StorageConfig};
use crate::form::EditBuffer;
use crate::notice::Notices;
use crate::search::SearchQuery;
use crate::store::PetStore;
use crate::AppError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PetId(pub String);

impl PetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pet entry as persisted and rendered.
///
/// `image` is an opaque URI handed back by the shell's photo picker; the core
/// never dereferences it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Pet {
    pub fn new(id: PetId, name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age: age.into(),
            description: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image = non_empty(uri.into());
        self
    }

    /// Empty optional text is the same as absent text.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.description = self.description.and_then(non_empty);
        self.image = self.image.and_then(non_empty);
        self
    }

    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

// Redact debug output because names and descriptions are user-provided content.
impl fmt::Debug for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pet")
            .field("id", &self.id)
            .field("name_len", &self.name.len())
            .field("age", &self.age)
            .field("description_present", &self.description.is_some())
            .field("image_present", &self.image.is_some())
            .finish()
    }
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: StorageConfig,
    pub store: PetStore,
    pub form: EditBuffer,
    pub search: SearchQuery,
    pub notices: Notices,
    pub storage_error: Option<AppError>,
}

impl Model {
    pub fn with_config(config: StorageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn set_storage_error(&mut self, error: AppError) {
        self.storage_error = Some(error);
    }

    pub fn clear_storage_error(&mut self) {
        self.storage_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case() {
        let pet = Pet::new(PetId::new("1"), "Rex", "3");
        assert!(pet.has_name("rex"));
        assert!(pet.has_name("REX"));
        assert!(!pet.has_name("Rexy"));
    }

    #[test]
    fn empty_optionals_normalize_to_none() {
        let pet = Pet {
            id: PetId::new("1"),
            name: "Rex".into(),
            age: "3".into(),
            description: Some(String::new()),
            image: Some(String::new()),
        }
        .normalized();
        assert_eq!(pet.description, None);
        assert_eq!(pet.image, None);
    }

    #[test]
    fn serializes_stored_field_names_and_omits_absent_optionals() {
        let pet = Pet::new(PetId::new("42"), "Rex", "3").with_description("good boy");
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "42", "name": "Rex", "age": "3", "description": "good boy"})
        );
    }

    #[test]
    fn debug_output_hides_user_content() {
        let pet = Pet::new(PetId::new("1"), "Secret Name", "3").with_description("private");
        let debug = format!("{pet:?}");
        assert!(!debug.contains("Secret Name"));
        assert!(!debug.contains("private"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(PetId::generate(), PetId::generate());
    }

    #[test]
    fn model_rejects_invalid_config() {
        let config = StorageConfig { key: String::new() };
        assert!(Model::with_config(config).is_err());
    }
}
