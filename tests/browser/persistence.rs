//! Favorites persistence through the file-backed blob store.

use casebook::favorites::{FavoritesStore, FileBlobStore};

use super::common::mixed;

#[test]
/// What: Toggling twice restores membership and the exact persisted blob.
///
/// Inputs:
/// - File store holding favorites {2, 5}; toggle 4 twice, then 2 twice.
///
/// Output:
/// - File content after each pair equals the content before it.
fn toggle_twice_round_trips_blob() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blob = FileBlobStore::new(dir.path());
    let path = blob.path_for("favorites");
    std::fs::write(&path, "[2,5]").expect("seed");
    let store = mixed();
    let mut fav = FavoritesStore::load(Box::new(blob), "favorites", &store);
    let before = std::fs::read_to_string(&path).expect("read");
    for id in [4, 2] {
        let was = fav.is_favorite(id);
        assert_ne!(fav.toggle(id).is_favorite, was);
        assert!(fav.toggle(id).warning.is_none());
        assert_eq!(fav.is_favorite(id), was);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), before);
    }
}

#[test]
/// What: Toggling twice on a fresh install leaves no favorites file behind.
///
/// Inputs:
/// - Empty lists directory; toggle 1 twice.
///
/// Output:
/// - The file exists between the toggles and is gone again afterwards.
fn toggle_twice_without_file_leaves_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blob = FileBlobStore::new(dir.path());
    let path = blob.path_for("favorites");
    let store = mixed();
    let mut fav = FavoritesStore::load(Box::new(blob), "favorites", &store);
    assert!(!path.exists());
    assert!(fav.toggle(1).is_favorite);
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "[1]");
    assert!(!fav.toggle(1).is_favorite);
    assert!(!path.exists());
    assert!(FavoritesStore::load(Box::new(FileBlobStore::new(dir.path())), "favorites", &store).is_empty());
}

#[test]
/// What: Favorites survive a reload; corrupt and stale entries self-heal.
fn reload_filters_unknown_and_resets_corrupt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = mixed();
    {
        let blob = FileBlobStore::new(dir.path());
        std::fs::write(blob.path_for("favorites"), "[3, 999]").expect("seed");
        let fav = FavoritesStore::load(Box::new(blob), "favorites", &store);
        assert_eq!(fav.ids().collect::<Vec<_>>(), vec![3]);
    }
    let blob = FileBlobStore::new(dir.path());
    let path = blob.path_for("favorites");
    std::fs::write(&path, "{not json").expect("seed");
    let fav = FavoritesStore::load(Box::new(blob), "favorites", &store);
    assert!(fav.is_empty());
    assert!(!path.exists());
}
