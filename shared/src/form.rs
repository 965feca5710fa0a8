use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{non_empty, Pet, PetId};
use crate::MSG_REQUIRED_FIELDS;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{}", MSG_REQUIRED_FIELDS)]
    MissingRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Pet),
    Update(Pet),
}

/// Strips everything except ASCII digits.
#[must_use]
pub fn sanitize_age(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Transient edit state for the add/update form. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    name: String,
    age: String,
    description: String,
    image: Option<String>,
    editing: Option<Pet>,
}

impl EditBuffer {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&Pet> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: &str) {
        self.age = sanitize_age(age);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_image(&mut self, uri: impl Into<String>) {
        self.image = non_empty(uri.into());
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Loads `pet` into the buffer verbatim and remembers it as the edit target.
    pub fn begin_edit(&mut self, pet: &Pet) {
        self.name.clone_from(&pet.name);
        self.age.clone_from(&pet.age);
        self.description = pet.description.clone().unwrap_or_default();
        self.image.clone_from(&pet.image);
        self.editing = Some(pet.clone());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the candidate record. The existing id is reused while editing;
    /// otherwise `mint_id` supplies a fresh one.
    pub fn submission(&self, mint_id: impl FnOnce() -> PetId) -> Result<Submission, FormError> {
        if self.name.is_empty() || self.age.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let id = self
            .editing
            .as_ref()
            .map_or_else(mint_id, |pet| pet.id.clone());
        let pet = Pet {
            id,
            name: self.name.clone(),
            age: self.age.clone(),
            description: non_empty(self.description.clone()),
            image: self.image.clone(),
        };

        Ok(if self.is_editing() {
            Submission::Update(pet)
        } else {
            Submission::Create(pet)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn filled(name: &str, age: &str) -> EditBuffer {
        let mut buffer = EditBuffer::default();
        buffer.set_name(name);
        buffer.set_age(age);
        buffer
    }

    #[test]
    fn age_keeps_only_digits() {
        assert_eq!(sanitize_age("1a2-b3"), "123");
        assert_eq!(sanitize_age("three"), "");
        assert_eq!(sanitize_age("４2"), "2");
    }

    #[test]
    fn missing_name_or_age_fails_validation() {
        assert_eq!(
            filled("", "3").submission(PetId::generate),
            Err(FormError::MissingRequired)
        );
        assert_eq!(
            filled("Rex", "abc").submission(PetId::generate),
            Err(FormError::MissingRequired)
        );
        assert_eq!(
            FormError::MissingRequired.to_string(),
            "Name and Age fields are required"
        );
    }

    #[test]
    fn new_record_gets_minted_id() {
        let mut buffer = filled("Rex", "3");
        buffer.set_description("");
        buffer.set_image("file:///rex.jpg");
        let submission = buffer.submission(|| PetId::new("minted")).unwrap();
        assert_matches!(submission, Submission::Create(pet) => {
            assert_eq!(pet.id, PetId::new("minted"));
            assert_eq!(pet.description, None);
            assert_eq!(pet.image.as_deref(), Some("file:///rex.jpg"));
        });
    }

    #[test]
    fn editing_reuses_existing_id() {
        let existing = Pet::new(PetId::new("1"), "Rex", "3").with_description("brown");
        let mut buffer = EditBuffer::default();
        buffer.begin_edit(&existing);
        assert_eq!(buffer.name(), "Rex");
        assert_eq!(buffer.description(), "brown");
        buffer.set_age("4");

        let submission = buffer
            .submission(|| panic!("must not mint an id while editing"))
            .unwrap();
        assert_matches!(submission, Submission::Update(pet) => {
            assert_eq!(pet.id, PetId::new("1"));
            assert_eq!(pet.age, "4");
        });
    }

    #[test]
    fn unchanged_edit_builds_identical_record() {
        let existing = Pet::new(PetId::new("1"), "Rex", "3");
        let mut buffer = EditBuffer::default();
        buffer.begin_edit(&existing);
        assert_eq!(
            buffer.submission(PetId::generate),
            Ok(Submission::Update(existing))
        );
    }

    #[test]
    fn stored_age_with_non_digits_is_loaded_verbatim() {
        let existing = Pet::new(PetId::new("1"), "Rex", "3 yrs");
        let mut buffer = EditBuffer::default();
        buffer.begin_edit(&existing);
        assert_eq!(buffer.age(), "3 yrs");
        assert_eq!(
            buffer.submission(PetId::generate),
            Ok(Submission::Update(existing))
        );

        buffer.set_age("4 yrs");
        assert_eq!(buffer.age(), "4");
    }

    #[test]
    fn clear_resets_everything() {
        let mut buffer = filled("Rex", "3");
        buffer.begin_edit(&Pet::new(PetId::new("1"), "Rex", "3"));
        buffer.clear();
        assert_eq!(buffer, EditBuffer::default());
        assert!(!buffer.is_editing());
    }

    proptest! {
        #[test]
        fn sanitized_age_is_digits_only(input in ".*") {
            let age = sanitize_age(&input);
            prop_assert!(age.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
