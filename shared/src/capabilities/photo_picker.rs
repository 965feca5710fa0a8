use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ASPECT: (u32, u32) = (4, 3);
pub const MAX_QUALITY: u8 = 100;

/// Asks the shell to let the user choose an image from the photo library.
/// The shell answers with an opaque URI the core stores verbatim.
pub struct PhotoPicker<Ev> {
    context: CapabilityContext<PhotoPickerOperation, Ev>,
}

impl<Ev> Capability<Ev> for PhotoPicker<Ev> {
    type Operation = PhotoPickerOperation;
    type MappedSelf<MappedEv> = PhotoPicker<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        PhotoPicker::new(self.context.map_event(f))
    }
}

impl<Ev> PhotoPicker<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<PhotoPickerOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn pick_image<F>(&self, options: PickerOptions, make_event: F)
    where
        F: FnOnce(PhotoPickerResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        let operation = PhotoPickerOperation::PickImage {
            options: options.validated(),
        };
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(make_event(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhotoPickerOperation {
    PickImage { options: PickerOptions },
}

impl Operation for PhotoPickerOperation {
    type Output = PhotoPickerResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Images,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerOptions {
    pub media_type: MediaType,
    pub allows_editing: bool,
    pub aspect: (u32, u32),
    /// Percent, 0..=100.
    pub quality: u8,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media_type: MediaType::Images,
            allows_editing: true,
            aspect: DEFAULT_ASPECT,
            quality: MAX_QUALITY,
        }
    }
}

impl PickerOptions {
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.quality = self.quality.min(MAX_QUALITY);
        if self.aspect.0 == 0 || self.aspect.1 == 0 {
            self.aspect = DEFAULT_ASPECT;
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhotoPickerOutput {
    Selected { uri: String },
    Cancelled,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhotoPickerError {
    #[error("photo library permission denied")]
    PermissionDenied,

    #[error("photo picker unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type PhotoPickerResult = Result<PhotoPickerOutput, PhotoPickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_picker() {
        let options = PickerOptions::default();
        assert_eq!(options.media_type, MediaType::Images);
        assert!(options.allows_editing);
        assert_eq!(options.aspect, (4, 3));
        assert_eq!(options.quality, 100);
    }

    #[test]
    fn validated_clamps_quality_and_aspect() {
        let options = PickerOptions {
            quality: 250,
            aspect: (0, 9),
            ..PickerOptions::default()
        }
        .validated();
        assert_eq!(options.quality, MAX_QUALITY);
        assert_eq!(options.aspect, DEFAULT_ASPECT);
    }

    #[test]
    fn validated_keeps_values_in_range() {
        let options = PickerOptions {
            quality: 80,
            aspect: (1, 1),
            ..PickerOptions::default()
        };
        let validated = options.clone().validated();
        assert_eq!(validated, options);
    }
}
