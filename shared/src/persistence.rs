use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::capabilities::AppKv;
use crate::config::StorageConfig;
use crate::event::Event;
use crate::model::Pet;
use crate::store::PetStore;
use crate::PersistenceError;

pub type StorageRead = Result<Option<Vec<u8>>, PersistenceError>;
pub type StorageWrite = Result<(), PersistenceError>;

/// Serializes the whole collection as one JSON array.
pub fn encode_pets(pets: &[Pet]) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(pets).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Parses a stored blob. Malformed JSON and collections that break the
/// store's uniqueness rules are both errors.
pub fn decode_pets(bytes: &[u8]) -> Result<Vec<Pet>, PersistenceError> {
    let pets: Vec<Pet> = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
    let pets: Vec<Pet> = pets.into_iter().map(Pet::normalized).collect();
    PetStore::check_invariants(&pets).map_err(|reason| PersistenceError::Corrupted { reason })?;
    Ok(pets)
}

pub fn read_result<E: Debug>(result: Result<Option<Vec<u8>>, E>) -> StorageRead {
    result.map_err(|e| PersistenceError::ReadFailed(format!("{e:?}")))
}

pub fn write_result<T, E: Debug>(result: Result<T, E>) -> StorageWrite {
    result
        .map(|_| ())
        .map_err(|e| PersistenceError::WriteFailed(format!("{e:?}")))
}

/// `None` when nothing has been stored yet.
pub fn load_pets(read: StorageRead) -> Result<Option<Vec<Pet>>, PersistenceError> {
    read?.map(|bytes| decode_pets(&bytes)).transpose()
}

/// Reads and writes the pet collection under a single key.
#[derive(Debug, Clone)]
pub struct PetRepository {
    key: String,
}

impl PetRepository {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            key: config.key.clone(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[instrument(skip(self, kv), fields(key = %self.key))]
    pub fn request_load(&self, kv: &AppKv) {
        debug!("Requesting stored pets");
        kv.get(self.key.clone(), |result| Event::PetsLoaded(read_result(result)));
    }

    /// Fire-and-forget: the write result comes back as `Event::PetsSaved`
    /// and nothing waits on it.
    #[instrument(skip(self, kv, pets), fields(key = %self.key, count = pets.len()))]
    pub fn request_save(&self, kv: &AppKv, pets: &[Pet]) -> StorageWrite {
        let bytes = encode_pets(pets)?;
        debug!(bytes = bytes.len(), "Writing pets");
        kv.set(self.key.clone(), bytes, |result| {
            Event::PetsSaved(write_result(result))
        });
        Ok(())
    }
}
