use std::collections::BTreeMap;

use super::types::{CardState, CategoryState, NoResultsReason, ViewInputs, ViewModel};
use crate::catalog::{CategoryGroup, Record, RecordStore};
use crate::favorites::FavoritesStore;

/// What: Normalize raw search text into a comparable term.
///
/// Inputs:
/// - `raw`: Text as typed by the user.
///
/// Output:
/// - Trimmed, lowercased term; an empty string means "no filter".
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// What: Decide whether a record matches a normalized search term.
///
/// Inputs:
/// - `rec`: Candidate record.
/// - `term`: Output of [`normalize_term`].
///
/// Output:
/// - `true` for an empty term, a case-insensitive substring hit in title, description,
///   example or category, or an exact decimal id match.
///
/// Details:
/// - The id comparison is exact: "1" matches id 1 but not id 12.
#[must_use]
pub fn record_matches(rec: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let category = rec.category.as_deref().unwrap_or("");
    [
        rec.title.as_str(),
        rec.description.as_str(),
        rec.example.as_str(),
        category,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
        || rec.id.to_string() == term
}

/// What: Compute the full view model for the store's own category layout.
///
/// Inputs:
/// - `store`: Record set.
/// - `favorites`: Current favorites.
/// - `inputs`: Search text and favorites-only flag.
///
/// Output:
/// - A fresh [`ViewModel`]; nothing is mutated.
#[must_use]
pub fn compute(store: &RecordStore, favorites: &FavoritesStore, inputs: &ViewInputs) -> ViewModel {
    compute_for_layout(store.groups(), store, favorites, inputs)
}

/// What: Compute the view model over an explicit card layout.
///
/// Inputs:
/// - `layout`: Category groups as rendered (ids per category, in display order).
/// - `store`: Record set used to resolve ids.
/// - `favorites`: Current favorites.
/// - `inputs`: Search text and favorites-only flag.
///
/// Output:
/// - [`ViewModel`] covering every resolvable id in `layout`.
///
/// Details:
/// - `visible = matches && (!favorites_only || favorite)`; `highlighted = visible && term != ""`.
/// - Ids missing from `store` are skipped and logged, never reported.
/// - Groups with no members are excluded before anything is computed.
#[must_use]
pub fn compute_for_layout(
    layout: &[CategoryGroup],
    store: &RecordStore,
    favorites: &FavoritesStore,
    inputs: &ViewInputs,
) -> ViewModel {
    let term = normalize_term(&inputs.search_text);
    let filtering = !term.is_empty();
    let mut cards = BTreeMap::new();
    let mut categories = Vec::with_capacity(layout.len());
    let mut visible_count = 0usize;

    for group in layout.iter().filter(|g| !g.members.is_empty()) {
        let mut members = Vec::with_capacity(group.members.len());
        let mut group_visible = 0usize;
        for &id in &group.members {
            let Some(rec) = store.get(id) else {
                tracing::debug!(id, category = %group.name, "[View] Skipping stale card id");
                continue;
            };
            let favorite = favorites.is_favorite(id);
            let visible = record_matches(rec, &term) && (!inputs.favorites_only || favorite);
            let state = CardState {
                visible,
                highlighted: visible && filtering,
                favorite,
            };
            if visible {
                group_visible += 1;
            }
            cards.insert(id, state);
            members.push(id);
        }
        visible_count += group_visible;
        categories.push(CategoryState {
            name: group.name.clone(),
            palette_index: group.palette_index,
            members,
            has_visible_members: group_visible > 0,
            visible_count: group_visible,
        });
    }

    let has_any_visible = visible_count > 0;
    let no_results = if has_any_visible {
        None
    } else if inputs.favorites_only {
        if favorites.is_empty() {
            Some(NoResultsReason::NoFavoritesYet)
        } else {
            Some(NoResultsReason::NoFavoritesMatch)
        }
    } else {
        Some(NoResultsReason::NoMatches)
    };

    ViewModel {
        search_term: term,
        favorites_only: inputs.favorites_only,
        cards,
        categories,
        has_any_visible,
        visible_count,
        no_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RecordId, UNCATEGORIZED};
    use crate::favorites::MemoryBlobStore;

    fn rec(id: RecordId, title: &str, category: Option<&str>) -> Record {
        Record {
            id,
            title: title.into(),
            category: category.map(Into::into),
            description: format!("{title} description"),
            example: String::new(),
            related: Vec::new(),
        }
    }

    fn fixture() -> (RecordStore, FavoritesStore) {
        let store = RecordStore::new(vec![
            rec(1, "Quiz builder", Some("Assessment")),
            rec(12, "Rubric drafts", Some("Assessment")),
            rec(3, "Glossary", None),
        ])
        .expect("non-empty");
        let fav = FavoritesStore::load(Box::new(MemoryBlobStore::new()), "favorites", &store);
        (store, fav)
    }

    #[test]
    /// What: Term normalization trims and lowercases.
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_term("  QuIz \t"), "quiz");
        assert_eq!(normalize_term("   "), "");
    }

    #[test]
    /// What: Id search is exact while text search is substring-based.
    ///
    /// Inputs:
    /// - Search terms "1", "12", "rubric", "assess".
    ///
    /// Output:
    /// - "1" hits only id 1; text terms match across title, description and category.
    fn id_match_is_exact() {
        let (store, fav) = fixture();
        let inputs = |s: &str| ViewInputs {
            search_text: s.into(),
            favorites_only: false,
        };
        let vm = compute(&store, &fav, &inputs("1"));
        assert!(vm.is_visible(1));
        assert!(!vm.is_visible(12));

        let vm = compute(&store, &fav, &inputs("RUBRIC"));
        assert_eq!(vm.visible_ids().collect::<Vec<_>>(), vec![12]);
        assert!(vm.card(12).is_some_and(|c| c.highlighted));

        let vm = compute(&store, &fav, &inputs("assess"));
        assert_eq!(vm.visible_count, 2);
        assert!(!vm.category(UNCATEGORIZED).is_some_and(|c| c.has_visible_members));
    }

    #[test]
    /// What: The uncategorized bucket is not searchable by its sentinel name.
    fn sentinel_category_not_matched() {
        let (store, fav) = fixture();
        let vm = compute(
            &store,
            &fav,
            &ViewInputs {
                search_text: "uncategorized".into(),
                favorites_only: false,
            },
        );
        assert!(!vm.has_any_visible);
        assert_eq!(vm.no_results, Some(NoResultsReason::NoMatches));
    }

    #[test]
    /// What: Stale ids in a rendered layout are skipped, and empty groups never appear.
    ///
    /// Inputs:
    /// - Layout with a group mixing a real id and id 404, plus an empty group.
    ///
    /// Output:
    /// - Only the real id is reported; the empty group is absent.
    fn layout_skips_stale_and_empty() {
        let (store, fav) = fixture();
        let layout = vec![
            CategoryGroup {
                name: "Assessment".into(),
                palette_index: Some(0),
                members: vec![404, 1],
            },
            CategoryGroup {
                name: "Ghost".into(),
                palette_index: Some(1),
                members: Vec::new(),
            },
        ];
        let vm = compute_for_layout(&layout, &store, &fav, &ViewInputs::default());
        assert_eq!(vm.cards.len(), 1);
        assert!(vm.card(404).is_none());
        assert!(vm.category("Ghost").is_none());
        assert_eq!(vm.category("Assessment").map(|c| c.members.clone()), Some(vec![1]));
    }

    #[test]
    /// What: Favorites-only messaging distinguishes an empty set from a non-matching search.
    fn favorites_only_messages() {
        let (store, mut fav) = fixture();
        let mut inputs = ViewInputs {
            search_text: String::new(),
            favorites_only: true,
        };
        let vm = compute(&store, &fav, &inputs);
        assert_eq!(vm.no_results, Some(NoResultsReason::NoFavoritesYet));

        let _ = fav.toggle(3);
        inputs.search_text = "quiz".into();
        let vm = compute(&store, &fav, &inputs);
        assert_eq!(vm.no_results, Some(NoResultsReason::NoFavoritesMatch));
        assert_ne!(
            NoResultsReason::NoFavoritesYet.message(),
            NoResultsReason::NoMatches.message()
        );
    }

    #[test]
    /// What: A favorite is flagged but never highlighted without a search term.
    fn favorite_is_not_a_highlight() {
        let (store, mut fav) = fixture();
        let _ = fav.toggle(1);
        let vm = compute(&store, &fav, &ViewInputs::default());
        let card = vm.card(1).expect("card 1");
        assert!(card.favorite);
        assert!(card.visible);
        assert!(!card.highlighted);
    }
}
