use serde::{Deserialize, Serialize};

use crate::form::EditBuffer;
use crate::model::Pet;
use crate::search::{SearchField, SearchQuery};
use crate::{AppError, ErrorSeverity};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetView {
    pub id: String,
    pub name: String,
    pub age: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<&Pet> for PetView {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            name: pet.name.clone(),
            age: pet.age.clone(),
            description: pet.description.clone(),
            image: pet.image.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchView {
    pub value: String,
    pub field: SearchField,
    pub label: String,
    pub fields: Vec<SearchField>,
}

impl From<&SearchQuery> for SearchView {
    fn from(query: &SearchQuery) -> Self {
        Self {
            value: query.value.clone(),
            field: query.field,
            label: query.label(),
            fields: SearchField::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormView {
    pub name: String,
    pub age: String,
    pub description: String,
    pub image: Option<String>,
    pub is_editing: bool,
    pub editing_id: Option<String>,
    pub submit_label: String,
    pub can_cancel: bool,
}

impl From<&EditBuffer> for FormView {
    fn from(buffer: &EditBuffer) -> Self {
        let is_editing = buffer.is_editing();
        Self {
            name: buffer.name().to_string(),
            age: buffer.age().to_string(),
            description: buffer.description().to_string(),
            image: buffer.image().map(str::to_string),
            is_editing,
            editing_id: buffer.editing().map(|pet| pet.id.to_string()),
            submit_label: if is_editing { "Update Pet" } else { "Add Pet" }.to_string(),
            can_cancel: is_editing,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub is_fatal: bool,
    pub error_code: String,
}

impl From<&AppError> for UserFacingError {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.user_facing_message(),
            is_fatal: e.severity == ErrorSeverity::Fatal,
            error_code: e.code().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub is_loading: bool,
    pub pets: Vec<PetView>,
    pub total_count: usize,
    pub search: SearchView,
    pub form: FormView,
    pub errors: Vec<String>,
    pub success: Option<String>,
    pub storage_error: Option<UserFacingError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PetId;

    #[test]
    fn form_labels_follow_edit_state() {
        let mut buffer = EditBuffer::default();
        let view = FormView::from(&buffer);
        assert_eq!(view.submit_label, "Add Pet");
        assert!(!view.can_cancel);

        buffer.begin_edit(&Pet::new(PetId::new("7"), "Rex", "3"));
        let view = FormView::from(&buffer);
        assert_eq!(view.submit_label, "Update Pet");
        assert!(view.can_cancel);
        assert_eq!(view.editing_id.as_deref(), Some("7"));
    }

    #[test]
    fn search_view_lists_fields_in_order() {
        let view = SearchView::from(&SearchQuery::default());
        assert_eq!(view.label, "Filter by name");
        assert_eq!(
            view.fields,
            [SearchField::Name, SearchField::Age, SearchField::Description]
        );
    }
}
