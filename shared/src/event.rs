use serde::{Deserialize, Serialize};

use crate::capabilities::PhotoPickerResult;
use crate::model::PetId;
use crate::persistence::{StorageRead, StorageWrite};
use crate::search::SearchField;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    AppStarted,

    // Form input
    NameChanged(String),
    AgeChanged(String),
    DescriptionChanged(String),
    FieldFocused,
    PhotoPickRequested,
    PhotoCleared,
    SubmitRequested,
    CancelRequested,
    MessagesDismissed,

    // List item actions
    EditRequested { id: PetId },
    DeleteRequested { id: PetId },

    // Search
    SearchValueChanged(String),
    SearchFieldSelected(SearchField),

    // Capability responses
    #[serde(skip)]
    PetsLoaded(StorageRead),
    #[serde(skip)]
    PetsSaved(StorageWrite),
    #[serde(skip)]
    PhotoPicked(PhotoPickerResult),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::NameChanged(_) => "name_changed",
            Self::AgeChanged(_) => "age_changed",
            Self::DescriptionChanged(_) => "description_changed",
            Self::FieldFocused => "field_focused",
            Self::PhotoPickRequested => "photo_pick_requested",
            Self::PhotoCleared => "photo_cleared",
            Self::SubmitRequested => "submit_requested",
            Self::CancelRequested => "cancel_requested",
            Self::MessagesDismissed => "messages_dismissed",
            Self::EditRequested { .. } => "edit_requested",
            Self::DeleteRequested { .. } => "delete_requested",
            Self::SearchValueChanged(_) => "search_value_changed",
            Self::SearchFieldSelected(_) => "search_field_selected",
            Self::PetsLoaded(_) => "pets_loaded",
            Self::PetsSaved(_) => "pets_saved",
            Self::PhotoPicked(_) => "photo_picked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_events_deserialize() {
        let event: Event =
            serde_json::from_str(r#"{"SearchFieldSelected":"description"}"#).unwrap();
        assert_eq!(event, Event::SearchFieldSelected(SearchField::Description));

        let event: Event = serde_json::from_str(r#"{"DeleteRequested":{"id":"42"}}"#).unwrap();
        assert_eq!(
            event,
            Event::DeleteRequested {
                id: PetId::new("42")
            }
        );
    }

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(size <= 64, "Event enum is {size} bytes");
    }
}
