use tracing::{debug, error, info, warn};

use crate::capabilities::{Capabilities, PhotoPickerOutput, PickerOptions};
use crate::event::Event;
use crate::form::Submission;
use crate::model::{Model, PetId};
use crate::persistence::{load_pets, PetRepository};
use crate::search::filter_pets;
use crate::store::{StoreLifecycle, StoreOutcome};
use crate::view::{FormView, PetView, SearchView, UserFacingError, ViewModel};
use crate::{AppError, ErrorKind, MSG_PET_MISSING};

#[derive(Default)]
pub struct App;

impl App {
    /// Saves the whole collection. No-op until the initial load has finished.
    fn persist(model: &mut Model, caps: &Capabilities) {
        if !model.store.is_ready() {
            debug!(lifecycle = ?model.store.lifecycle(), "Skipping save");
            return;
        }

        let repository = PetRepository::new(&model.config);
        if let Err(e) = repository.request_save(&caps.key_value, model.store.list()) {
            error!(error = %e, "Failed to encode pets");
            model.set_storage_error(e.into());
        }
    }

    /// Success clears the form and persists; anything else becomes an error
    /// notice and leaves the form as it was.
    fn apply_outcome(model: &mut Model, caps: &Capabilities, outcome: StoreOutcome) {
        if outcome.is_success() {
            model.notices.set_success(outcome.message());
            model.form.clear();
            Self::persist(model, caps);
        } else {
            model.notices.push_error(outcome.message());
        }
    }

    fn submit(model: &mut Model, caps: &Capabilities) {
        model.notices.clear();

        let outcome = match model.form.submission(PetId::generate) {
            Ok(Submission::Create(pet)) => model.store.add(pet),
            Ok(Submission::Update(pet)) => model.store.update(pet),
            Err(e) => {
                model.notices.push_error(e.to_string());
                return;
            }
        };
        Self::apply_outcome(model, caps, outcome);
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), "update");

        match event {
            Event::AppStarted => {
                if model.store.begin_loading() {
                    PetRepository::new(&model.config).request_load(&caps.key_value);
                } else {
                    debug!("Store already initialized");
                }
            }

            Event::PetsLoaded(read) => {
                if model.store.lifecycle() != StoreLifecycle::Loading {
                    warn!(lifecycle = ?model.store.lifecycle(), "Ignoring unexpected load result");
                    return;
                }
                match load_pets(read) {
                    Ok(stored) => model.store.complete_load(stored),
                    Err(e) => {
                        error!(error = %e, "Failed to load pets");
                        model.store.fail_load();
                        model.set_storage_error(
                            AppError::from(e).with_context("key", model.config.key.clone()),
                        );
                    }
                }
            }

            Event::PetsSaved(result) => match result {
                Ok(()) => {
                    debug!("Pets saved");
                    // A load failure stays visible; a stale write failure does not.
                    if !model.store.is_ready() || model.storage_error.is_none() {
                        return;
                    }
                    model.clear_storage_error();
                }
                Err(e) => {
                    warn!(error = %e, "Failed to save pets");
                    model.set_storage_error(e.into());
                }
            },

            Event::NameChanged(name) => model.form.set_name(name),
            Event::AgeChanged(age) => model.form.set_age(&age),
            Event::DescriptionChanged(description) => model.form.set_description(description),
            Event::FieldFocused => model.notices.clear_success(),

            Event::PhotoPickRequested => {
                caps.photo_picker
                    .pick_image(PickerOptions::default(), Event::PhotoPicked);
                return;
            }

            Event::PhotoPicked(result) => match result {
                Ok(PhotoPickerOutput::Selected { uri }) => model.form.set_image(uri),
                Ok(PhotoPickerOutput::Cancelled) => {
                    debug!("Photo pick cancelled");
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "Photo pick failed");
                    let error = AppError::new(ErrorKind::PhotoPicker, e.to_string());
                    model.notices.push_error(error.user_facing_message());
                }
            },

            Event::PhotoCleared => model.form.clear_image(),

            Event::SubmitRequested => Self::submit(model, caps),

            Event::CancelRequested => model.form.clear(),

            Event::MessagesDismissed => model.notices.clear(),

            Event::EditRequested { id } => {
                model.notices.clear();
                match model.store.get(&id) {
                    Some(pet) => model.form.begin_edit(pet),
                    None => model.notices.push_error(MSG_PET_MISSING),
                }
            }

            Event::DeleteRequested { id } => {
                let outcome = model.store.delete(&id);
                if let StoreOutcome::Missing(_) = outcome {
                    debug!(pet_id = %id, "Delete of unknown pet ignored");
                    return;
                }
                info!(pet_id = %id, "Pet deleted");
                Self::apply_outcome(model, caps, outcome);
            }

            Event::SearchValueChanged(value) => model.search.value = value,
            Event::SearchFieldSelected(field) => model.search.field = field,
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        let pets = filter_pets(model.store.list(), &model.search)
            .into_iter()
            .map(PetView::from)
            .collect();

        ViewModel {
            is_loading: model.store.is_loading(),
            pets,
            total_count: model.store.len(),
            search: SearchView::from(&model.search),
            form: FormView::from(&model.form),
            errors: model.notices.errors().to_vec(),
            success: model.notices.success().map(str::to_string),
            storage_error: model.storage_error.as_ref().map(UserFacingError::from),
        }
    }
}
