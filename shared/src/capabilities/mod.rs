mod photo_picker;

pub use self::photo_picker::{
    MediaType, PhotoPicker, PhotoPickerError, PhotoPickerOperation, PhotoPickerOutput,
    PhotoPickerResult, PickerOptions,
};

pub use crux_core::render::Render;
pub use crux_kv::KeyValue;

use crate::event::Event;

pub type AppKv = KeyValue<Event>;

// The derive reads the event type from each field's generic argument.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub key_value: KeyValue<Event>,
    pub photo_picker: PhotoPicker<Event>,
}
