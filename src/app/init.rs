//! Startup loading shared by the TUI and the command-line modes.

use casebook::catalog::{CatalogError, RecordStore};
use casebook::favorites::{FavoritesStore, FileBlobStore};
use casebook::theme::{self, Settings};

/// What: Load `settings.conf` from the configuration directory.
///
/// Output:
/// - Parsed settings; a skeleton file is written on first run.
pub fn load_settings() -> Settings {
    let path = theme::settings_path();
    let settings = theme::load_settings(&path);
    tracing::debug!(path = %path.display(), "[Init] Settings loaded");
    settings
}

/// What: Load the record dataset.
///
/// Inputs:
/// - `data_override`: `--data` path, taking precedence over `dataset_path` in settings.
/// - `settings`: Loaded settings.
///
/// Output:
/// - The record store, or the error to show on the fatal screen.
///
/// # Errors
/// Returns the [`CatalogError`] from [`RecordStore::load_json`] for the resolved path.
pub fn open_catalog(
    data_override: Option<&str>,
    settings: &Settings,
) -> Result<RecordStore, CatalogError> {
    let path = theme::resolve_dataset_path(data_override.or(settings.dataset_path.as_deref()));
    tracing::info!(path = %path.display(), "[Init] Loading dataset");
    let store = RecordStore::load_json(&path)?;
    tracing::info!(
        records = store.len(),
        categories = store.groups().len(),
        "[Init] Dataset loaded"
    );
    Ok(store)
}

/// What: Load favorites from the lists directory.
///
/// Inputs:
/// - `settings`: Provides the storage key.
/// - `store`: Record set used to drop ids that no longer exist.
///
/// Output:
/// - Favorites store; never fails, a corrupt file starts empty.
pub fn open_favorites(settings: &Settings, store: &RecordStore) -> FavoritesStore {
    let blob = FileBlobStore::new(theme::lists_dir());
    FavoritesStore::load(Box::new(blob), &settings.favorites_key, store)
}
