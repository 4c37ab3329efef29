//! Shared fixtures for browser tests.

use casebook::catalog::{Record, RecordStore};
use casebook::favorites::{FavoritesStore, MemoryBlobStore};
use casebook::state::AppState;
use casebook::theme::Settings;

/// What: Build a record with only the fields a test cares about.
pub fn rec(id: i64, title: &str, category: Option<&str>) -> Record {
    Record {
        id,
        title: title.to_string(),
        category: category.map(str::to_string),
        description: String::new(),
        example: String::new(),
        related: Vec::new(),
    }
}

/// What: Two records in category "X" (Alpha, Beta).
pub fn alpha_beta() -> RecordStore {
    RecordStore::new(vec![rec(1, "Alpha", Some("X")), rec(2, "Beta", Some("X"))])
        .expect("records")
}

/// What: A mixed catalog across several categories, one uncategorized.
pub fn mixed() -> RecordStore {
    let mut closure = rec(3, "Closure", Some("Scope"));
    closure.description = "Functions capturing their environment".into();
    closure.related = vec![1, 42];
    RecordStore::new(vec![
        rec(1, "Hoisting", Some("Scope")),
        rec(2, "Promise chaining", Some("Async")),
        closure,
        rec(4, "Event loop", Some("Async")),
        rec(5, "Tagged templates", None),
        rec(6, "Generators", Some("Iteration")),
    ])
    .expect("records")
}

/// What: Favorites over an in-memory blob seeded with `ids`.
pub fn favorites(store: &RecordStore, ids: &[i64]) -> FavoritesStore {
    let blob = serde_json::to_string(ids).expect("json");
    FavoritesStore::load(
        Box::new(MemoryBlobStore::with_entry("favorites", &blob)),
        "favorites",
        store,
    )
}

/// What: Application state over `store` with no favorites.
pub fn app(store: RecordStore) -> AppState {
    let fav = favorites(&store, &[]);
    AppState::new(store, fav, Settings::default())
}
