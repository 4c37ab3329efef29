//! View invariants checked across every combination of a few inputs.

use casebook::catalog::{CategoryGroup, RecordStore};
use casebook::favorites::FavoritesStore;
use casebook::view::{self, ViewInputs};

use super::common::{favorites, mixed};

/// Inputs worth checking: empty, partial, no-match and id searches, both view modes.
fn all_inputs() -> Vec<ViewInputs> {
    let mut out = Vec::new();
    for term in ["", "o", "ASYNC", "zzz", "3", " loop "] {
        for favorites_only in [false, true] {
            out.push(ViewInputs {
                search_text: term.to_string(),
                favorites_only,
            });
        }
    }
    out
}

fn fixtures() -> Vec<(RecordStore, FavoritesStore)> {
    [&[][..], &[2, 5][..], &[1, 2, 3, 4, 5, 6][..]]
        .into_iter()
        .map(|ids| {
            let store = mixed();
            let fav = favorites(&store, ids);
            (store, fav)
        })
        .collect()
}

#[test]
/// What: Computing twice with the same inputs gives identical models.
fn compute_is_idempotent() {
    for (store, fav) in fixtures() {
        for inputs in all_inputs() {
            assert_eq!(
                view::compute(&store, &fav, &inputs),
                view::compute(&store, &fav, &inputs)
            );
        }
    }
}

#[test]
/// What: Highlighted implies visible; favorites-only visible implies favorite.
fn highlight_and_favorites_only_imply() {
    for (store, fav) in fixtures() {
        for inputs in all_inputs() {
            let vm = view::compute(&store, &fav, &inputs);
            for (id, card) in &vm.cards {
                assert!(!card.highlighted || card.visible, "id {id} highlighted but hidden");
                if inputs.favorites_only && card.visible {
                    assert!(fav.is_favorite(*id));
                }
            }
            assert_eq!(vm.has_any_visible, vm.no_results.is_none());
            let per_category: usize = vm.categories.iter().map(|c| c.visible_count).sum();
            assert_eq!(per_category, vm.visible_count);
        }
    }
}

#[test]
/// What: Categories without members never appear, and stale ids are skipped.
///
/// Inputs:
/// - A layout with an empty group and a group holding an unknown id.
///
/// Output:
/// - The empty group is absent; the unknown id has no card state.
fn empty_categories_absent_and_stale_ids_skipped() {
    let store = mixed();
    let fav = favorites(&store, &[]);
    let layout = vec![
        CategoryGroup {
            name: "Ghost".into(),
            palette_index: Some(0),
            members: Vec::new(),
        },
        CategoryGroup {
            name: "Scope".into(),
            palette_index: Some(1),
            members: vec![1, 77, 3],
        },
    ];
    let vm = view::compute_for_layout(&layout, &store, &fav, &ViewInputs::default());
    assert!(vm.category("Ghost").is_none());
    assert!(vm.card(77).is_none());
    assert_eq!(vm.category("Scope").expect("scope").members, vec![1, 3]);
}
