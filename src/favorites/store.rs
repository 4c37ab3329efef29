use std::collections::BTreeSet;
use std::fmt;

use super::blob::{BlobError, BlobStore};
use crate::catalog::{RecordId, RecordStore};

/// Default blob key holding the favorites list.
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// What: Non-fatal failure while persisting favorites.
///
/// Inputs: Generated by [`FavoritesStore::toggle`] and [`FavoritesStore::save`].
///
/// Output: Implements `Display`/`Error`; the in-memory set stays authoritative.
#[derive(Debug)]
pub enum FavoritesError {
    /// The blob store rejected or failed the write.
    Storage(BlobError),
    /// The set could not be serialized.
    Encode(serde_json::Error),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to save favorites: {err}"),
            Self::Encode(err) => write!(f, "failed to encode favorites: {err}"),
        }
    }
}

impl std::error::Error for FavoritesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<BlobError> for FavoritesError {
    fn from(value: BlobError) -> Self {
        Self::Storage(value)
    }
}

/// Result of flipping one record's favorite membership.
#[derive(Debug)]
pub struct ToggleOutcome {
    /// Membership after the flip.
    pub is_favorite: bool,
    /// Persistence failure, if any. The flip itself always took effect.
    pub warning: Option<FavoritesError>,
}

/// Persisted set of favorited record ids.
///
/// All mutation goes through [`toggle`](Self::toggle) or [`clear_all`](Self::clear_all);
/// every mutation writes the full set back to the blob store immediately.
pub struct FavoritesStore {
    /// Current favorites; sorted so the persisted list is canonical.
    ids: BTreeSet<RecordId>,
    /// Backend holding the serialized list.
    blob: Box<dyn BlobStore + Send>,
    /// Key under which the list is stored.
    key: String,
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// What: Load favorites from the blob store, self-healing on bad data.
    ///
    /// Inputs:
    /// - `blob`: Persistent key-value backend.
    /// - `key`: Key holding the serialized id list.
    /// - `records`: Record store used to drop ids that no longer exist.
    ///
    /// Output:
    /// - A ready store. Never fails.
    ///
    /// Details:
    /// - Missing key or unreadable backend yields an empty set.
    /// - A blob that is not a JSON list of integer ids is cleared and treated as empty.
    /// - Ids unknown to `records` are filtered out of the in-memory set.
    pub fn load(blob: Box<dyn BlobStore + Send>, key: &str, records: &RecordStore) -> Self {
        let mut store = Self {
            ids: BTreeSet::new(),
            blob,
            key: key.to_string(),
        };
        let raw = match store.blob.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "[Favorites] No stored favorites");
                return store;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "[Favorites] Failed to read favorites");
                return store;
            }
        };
        match serde_json::from_str::<Vec<RecordId>>(&raw) {
            Ok(list) => {
                let total = list.len();
                store.ids = list.into_iter().filter(|id| records.contains(*id)).collect();
                if store.ids.len() != total {
                    tracing::info!(
                        key,
                        dropped = total - store.ids.len(),
                        "[Favorites] Dropped unknown or duplicate ids"
                    );
                }
                tracing::debug!(key, count = store.ids.len(), "[Favorites] Loaded favorites");
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "[Favorites] Corrupt favorites blob; resetting");
                if let Err(e) = store.blob.clear(key) {
                    tracing::warn!(key, error = %e, "[Favorites] Failed to clear corrupt blob");
                }
            }
        }
        store
    }

    /// Whether `id` is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no record is a favorite.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorites in ascending id order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.ids.iter().copied()
    }

    /// Key under which the list is persisted.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// What: Flip membership of `id` and persist the full set.
    ///
    /// Inputs:
    /// - `id`: Record to flip.
    ///
    /// Output:
    /// - [`ToggleOutcome`] with the new membership and an optional persistence warning.
    ///
    /// Details:
    /// - Each call inverts the current state, so rapid repeated calls stay consistent.
    pub fn toggle(&mut self, id: RecordId) -> ToggleOutcome {
        let is_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        tracing::debug!(id, is_favorite, "[Favorites] Toggled");
        ToggleOutcome {
            is_favorite,
            warning: self.save().err(),
        }
    }

    /// What: Write the full set to the blob store.
    ///
    /// Inputs: None
    ///
    /// Output:
    /// - `Ok(())` on success; [`FavoritesError`] otherwise. Memory is left untouched either way.
    ///
    /// Details:
    /// - An empty set clears the blob instead of writing `[]`, so a session that ends
    ///   with no favorites leaves storage as it found it.
    ///
    /// # Errors
    /// Returns an error when encoding or the backend write or clear fails.
    pub fn save(&mut self) -> Result<(), FavoritesError> {
        if self.ids.is_empty() {
            // An absent blob already loads as the empty set.
            self.blob.clear(&self.key).map_err(|e| {
                tracing::warn!(key = %self.key, error = %e, "[Persist] Failed to clear favorites");
                FavoritesError::from(e)
            })?;
            tracing::debug!(key = %self.key, "[Persist] Favorites empty; blob cleared");
            return Ok(());
        }
        let list: Vec<RecordId> = self.ids.iter().copied().collect();
        let encoded = serde_json::to_string(&list).map_err(FavoritesError::Encode)?;
        match self.blob.set(&self.key, &encoded) {
            Ok(()) => {
                tracing::debug!(key = %self.key, count = list.len(), "[Persist] Favorites persisted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "[Persist] Failed to write favorites");
                Err(e.into())
            }
        }
    }

    /// What: Drop every favorite and erase the persisted blob.
    ///
    /// Inputs: None
    ///
    /// Output:
    /// - `Ok(())` when the blob was cleared.
    ///
    /// # Errors
    /// Returns an error when the backend cannot remove the blob; memory is cleared regardless.
    pub fn clear_all(&mut self) -> Result<(), FavoritesError> {
        self.ids.clear();
        self.blob.clear(&self.key)?;
        tracing::info!(key = %self.key, "[Favorites] Cleared all favorites");
        Ok(())
    }
}
