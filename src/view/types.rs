//! Value types produced and consumed by the view engine.

use std::collections::BTreeMap;

use crate::catalog::RecordId;

/// Controls that drive a view recomputation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewInputs {
    /// Raw search text as typed; normalized by the engine.
    pub search_text: String,
    /// Whether only favorites are shown.
    pub favorites_only: bool,
}

/// Derived status of one card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardState {
    /// Card is shown.
    pub visible: bool,
    /// Card is marked as a search match. Implies `visible`.
    pub highlighted: bool,
    /// Record is a favorite (indicator only, never a highlight).
    pub favorite: bool,
}

/// Derived status of one category group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryState {
    /// Category display name.
    pub name: String,
    /// Palette slot in first-seen order; `None` for the uncategorized bucket.
    pub palette_index: Option<usize>,
    /// Member ids that resolved against the record store, in display order.
    pub members: Vec<RecordId>,
    /// At least one member is visible.
    pub has_visible_members: bool,
    /// Number of visible members.
    pub visible_count: usize,
}

/// Why nothing is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoResultsReason {
    /// Favorites-only view with an empty favorites set.
    NoFavoritesYet,
    /// Favorites-only view where no favorite matches the search.
    NoFavoritesMatch,
    /// No record matches the search.
    NoMatches,
}

impl NoResultsReason {
    /// User-facing message for the single "no results" indicator.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoFavoritesYet => "You have not added any favorites yet ⭐",
            Self::NoFavoritesMatch => "No favorites match the search.",
            Self::NoMatches => "No records match the search.",
        }
    }
}

/// Complete derived view for one set of inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewModel {
    /// Normalized search term the model was computed with.
    pub search_term: String,
    /// Whether the favorites-only filter was on.
    pub favorites_only: bool,
    /// Per-record card status.
    pub cards: BTreeMap<RecordId, CardState>,
    /// Category groups in display order.
    pub categories: Vec<CategoryState>,
    /// Whether any card is visible.
    pub has_any_visible: bool,
    /// Total number of visible cards.
    pub visible_count: usize,
    /// Set exactly when nothing is visible.
    pub no_results: Option<NoResultsReason>,
}

impl ViewModel {
    /// Status of the card for `id`; `None` for ids the model does not know.
    #[must_use]
    pub fn card(&self, id: RecordId) -> Option<CardState> {
        self.cards.get(&id).copied()
    }

    /// Whether the card for `id` is visible.
    #[must_use]
    pub fn is_visible(&self, id: RecordId) -> bool {
        self.card(id).is_some_and(|c| c.visible)
    }

    /// Category status by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryState> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Visible ids in display order (category order, then member order).
    pub fn visible_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .filter(|id| self.is_visible(*id))
    }
}
