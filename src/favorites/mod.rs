//! Favorites: a persisted set of record ids on top of a key-value blob store.

mod blob;
mod store;

pub use blob::{BlobError, BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{DEFAULT_FAVORITES_KEY, FavoritesError, FavoritesStore, ToggleOutcome};
