use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Pet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Name,
    Age,
    Description,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [Self::Name, Self::Age, Self::Description];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Description => "description",
        }
    }

    /// The field's text on `pet`; empty text counts as absent.
    #[must_use]
    pub fn value_of(self, pet: &Pet) -> Option<&str> {
        let value = match self {
            Self::Name => Some(pet.name.as_str()),
            Self::Age => Some(pet.age.as_str()),
            Self::Description => pet.description.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub value: String,
    pub field: SearchField,
}

impl SearchQuery {
    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        if self.value.is_empty() {
            return true;
        }
        self.field
            .value_of(pet)
            .is_some_and(|text| text.contains(self.value.as_str()))
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Filter by {}", self.field)
    }
}

/// Case-sensitive substring filter over the selected field, preserving order.
#[must_use]
pub fn filter_pets<'a>(pets: &'a [Pet], query: &SearchQuery) -> Vec<&'a Pet> {
    pets.iter().filter(|pet| query.matches(pet)).collect()
}
