use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::model::{Pet, PetId};
use crate::{
    MSG_ADDED, MSG_DELETED, MSG_DUPLICATE_NAME, MSG_ID_CONFLICT, MSG_NO_CHANGES, MSG_PET_MISSING,
    MSG_UPDATED,
};

/// Load state of the store. Saving is only allowed once `Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreLifecycle {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    /// The initial load failed. The store keeps working in memory but must
    /// never overwrite what is on disk.
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    Added(PetId),
    Updated(PetId),
    Deleted(PetId),
    DuplicateName,
    IdConflict(PetId),
    NoChange,
    Missing(PetId),
}

impl StoreOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Updated(_) | Self::Deleted(_))
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Added(_) => MSG_ADDED,
            Self::Updated(_) => MSG_UPDATED,
            Self::Deleted(_) => MSG_DELETED,
            Self::DuplicateName => MSG_DUPLICATE_NAME,
            Self::IdConflict(_) => MSG_ID_CONFLICT,
            Self::NoChange => MSG_NO_CHANGES,
            Self::Missing(_) => MSG_PET_MISSING,
        }
    }
}

/// The single authoritative, ordered collection of pets.
#[derive(Debug, Default)]
pub struct PetStore {
    lifecycle: StoreLifecycle,
    pets: Vec<Pet>,
}

impl PetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lifecycle(&self) -> StoreLifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle == StoreLifecycle::Ready
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(
            self.lifecycle,
            StoreLifecycle::Uninitialized | StoreLifecycle::Loading
        )
    }

    #[must_use]
    pub fn list(&self) -> &[Pet] {
        &self.pets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| &p.id == id)
    }

    /// Returns `false` if a load was already started.
    pub fn begin_loading(&mut self) -> bool {
        if self.lifecycle != StoreLifecycle::Uninitialized {
            return false;
        }
        self.lifecycle = StoreLifecycle::Loading;
        true
    }

    /// Finishes the initial load. Stored pets replace the in-memory ones; an
    /// absent blob keeps whatever is already there.
    #[instrument(skip(self, stored))]
    pub fn complete_load(&mut self, stored: Option<Vec<Pet>>) {
        if let Some(pets) = stored {
            if !self.pets.is_empty() {
                warn!(
                    discarded = self.pets.len(),
                    "Replacing pets created before load completed"
                );
            }
            self.pets = pets;
        }
        self.lifecycle = StoreLifecycle::Ready;
        info!(count = self.pets.len(), "Store ready");
    }

    pub fn fail_load(&mut self) {
        self.lifecycle = StoreLifecycle::LoadFailed;
    }

    #[instrument(skip(self, pet), fields(pet_id = %pet.id))]
    pub fn add(&mut self, pet: Pet) -> StoreOutcome {
        if self.pets.iter().any(|p| p.has_name(&pet.name)) {
            debug!("Rejected add: duplicate name");
            return StoreOutcome::DuplicateName;
        }
        if self.get(&pet.id).is_some() {
            warn!("Rejected add: id already present");
            return StoreOutcome::IdConflict(pet.id);
        }

        let id = pet.id.clone();
        self.pets.push(pet);
        debug!(count = self.pets.len(), "Pet added");
        StoreOutcome::Added(id)
    }

    #[instrument(skip(self, candidate), fields(pet_id = %candidate.id))]
    pub fn update(&mut self, candidate: Pet) -> StoreOutcome {
        let Some(index) = self.pets.iter().position(|p| p.id == candidate.id) else {
            warn!("Rejected update: pet not found");
            return StoreOutcome::Missing(candidate.id);
        };

        if self.pets[index] == candidate {
            return StoreOutcome::NoChange;
        }

        let name_taken = self
            .pets
            .iter()
            .any(|p| p.id != candidate.id && p.has_name(&candidate.name));
        if name_taken {
            debug!("Rejected update: duplicate name");
            return StoreOutcome::DuplicateName;
        }

        let id = candidate.id.clone();
        self.pets[index] = candidate;
        debug!("Pet updated");
        StoreOutcome::Updated(id)
    }

    #[instrument(skip(self), fields(pet_id = %id))]
    pub fn delete(&mut self, id: &PetId) -> StoreOutcome {
        match self.pets.iter().position(|p| &p.id == id) {
            Some(index) => {
                self.pets.remove(index);
                debug!(count = self.pets.len(), "Pet deleted");
                StoreOutcome::Deleted(id.clone())
            }
            None => StoreOutcome::Missing(id.clone()),
        }
    }

    /// Checks a collection against the store's uniqueness rules.
    pub fn check_invariants(pets: &[Pet]) -> Result<(), String> {
        let mut ids = HashSet::with_capacity(pets.len());
        let mut names = HashSet::with_capacity(pets.len());
        for pet in pets {
            if !ids.insert(pet.id.as_str()) {
                return Err(format!("duplicate id {}", pet.id));
            }
            if !names.insert(pet.name.to_lowercase()) {
                return Err(format!("duplicate name on pet {}", pet.id));
            }
        }
        Ok(())
    }
}
