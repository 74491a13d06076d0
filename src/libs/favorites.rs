use std::sync::Arc;

use log::{info, warn};

use crate::libs::constants::FAVORITES_STORAGE_KEY;
use crate::libs::error::{AnyResult, PetflixError};
use crate::libs::storage::KeyValueStorage;

/**
 * Ordered, duplicate-free list of favorited video IDs, persisted as a JSON
 * array of strings under a single storage key.
 *
 * Favorites are a convenience: no storage failure ever escapes this type.
 * Reads degrade to an empty list and writes to no-ops.
 */
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, FAVORITES_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: &str) -> Self {
        FavoritesStore {
            storage,
            key: key.to_string(),
        }
    }

    /// Current favorites, empty when the entry is missing or not a list of strings
    pub fn list(&self) -> Vec<String> {
        match self.read() {
            Ok(ids) => ids,
            Err(err) => {
                warn!("Could not read favorites, assuming none: {}", err);
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|favorite| favorite == id)
    }

    /// Append `id` unless already present
    pub fn add(&self, id: &str) {
        let mut ids = self.list();
        if ids.iter().any(|favorite| favorite == id) {
            return;
        }

        ids.push(id.to_string());
        if self.write(&ids) {
            info!("Added {:?} to favorites", id);
        }
    }

    /// Remove every occurrence of `id`
    pub fn remove(&self, id: &str) {
        let mut ids = self.list();
        ids.retain(|favorite| favorite != id);
        if self.write(&ids) {
            info!("Removed {:?} from favorites", id);
        }
    }

    /// Flip the membership of `id`, returns whether it is now a favorite
    pub fn toggle(&self, id: &str) -> bool {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
        self.contains(id)
    }

    fn read(&self) -> AnyResult<Vec<String>> {
        match self.storage.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, ids: &[String]) -> bool {
        let result = serde_json::to_string(ids)
            .map_err(PetflixError::from)
            .and_then(|json| self.storage.set(&self.key, &json));

        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("Could not persist favorites: {}", err);
                false
            }
        }
    }
}
