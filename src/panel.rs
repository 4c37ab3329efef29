//! Detail panel controller.
//!
//! A small state machine deciding which single record, if any, is open in the
//! detail pane. Content is populated synchronously while the panel is in
//! [`PanelState::Opening`], so the panel never becomes visible without content.

use crate::catalog::{RecordId, RecordStore};
use crate::favorites::{FavoritesStore, ToggleOutcome};

/// Placeholder shown when a record has no description.
pub const NO_DESCRIPTION: &str = "No description available.";
/// Placeholder shown when a record has no example.
pub const NO_EXAMPLE: &str = "No example available.";

/// Lifecycle of the detail panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Nothing is open.
    #[default]
    Closed,
    /// An activation is in flight; content is being populated.
    Opening(RecordId),
    /// The record is open and its content is shown.
    Open(RecordId),
}

/// Signal that closed the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// Explicit close control.
    Button,
    /// Click outside the panel that did not land on a card.
    OutsideClick,
    /// Escape key.
    Escape,
}

/// A resolved link to a related record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedLink {
    /// Target record.
    pub id: RecordId,
    /// Display label, `"<id>. <title>"`.
    pub label: String,
}

/// Everything the detail surface shows for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelContent {
    /// Record shown.
    pub id: RecordId,
    /// Heading, `"<id>. <title>"`.
    pub heading: String,
    /// Category bucket name.
    pub category: String,
    /// Palette slot of the category; `None` uses the default color.
    pub palette_index: Option<usize>,
    /// Description, or a placeholder.
    pub description: String,
    /// Example, or a placeholder.
    pub example: String,
    /// Related links that resolved; the section is hidden when empty.
    pub related: Vec<RelatedLink>,
    /// Current favorite status of the record.
    pub is_favorite: bool,
}

/// Result of an activation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// Guard rejected the request: same record already open, or an activation in flight.
    Ignored,
    /// The id did not resolve; the panel is closed.
    NotFound(RecordId),
    /// The record is open. `generation` tags the deferred visual transition.
    Opened {
        /// Record now open.
        id: RecordId,
        /// Generation of this open.
        generation: u64,
    },
}

/// Detail panel state plus the populated content of the open record.
#[derive(Clone, Debug, Default)]
pub struct DetailPanel {
    /// Current lifecycle state.
    state: PanelState,
    /// Content of the open record; `Some` exactly when the state is `Open`.
    content: Option<PanelContent>,
    /// Incremented on every successful open.
    generation: u64,
    /// A visual transition from the latest open has not settled yet.
    settling: bool,
}

impl DetailPanel {
    /// Create a closed panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Id of the open record, if any.
    #[must_use]
    pub const fn open_id(&self) -> Option<RecordId> {
        match self.state {
            PanelState::Open(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the panel is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    /// Content of the open record.
    #[must_use]
    pub const fn content(&self) -> Option<&PanelContent> {
        self.content.as_ref()
    }

    /// Generation of the most recent successful open.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the latest open is still inside its visual transition.
    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.settling
    }

    /// What: First half of an activation: apply the guard and enter `Opening`.
    ///
    /// Inputs:
    /// - `id`: Record to open.
    ///
    /// Output:
    /// - `true` when the panel moved to `Opening(id)`; `false` when the guard rejected it.
    ///
    /// Details:
    /// - Rejected when `Open(id)` with the same id, or when another activation is in flight.
    /// - Previous content is dropped here so stale content can never be shown for `id`.
    pub fn begin(&mut self, id: RecordId) -> bool {
        match self.state {
            PanelState::Opening(pending) => {
                tracing::debug!(id, pending, "[Panel] Activation already in flight; ignoring");
                false
            }
            PanelState::Open(open) if open == id => {
                tracing::trace!(id, "[Panel] Record already open; ignoring");
                false
            }
            PanelState::Open(_) | PanelState::Closed => {
                self.state = PanelState::Opening(id);
                self.content = None;
                true
            }
        }
    }

    /// What: Second half of an activation: resolve, populate and commit.
    ///
    /// Inputs:
    /// - `store`: Record set used to resolve the pending id and its related links.
    /// - `favorites`: Favorites used for the record's favorite status.
    ///
    /// Output:
    /// - `Opened` with a fresh generation, `NotFound` when the id does not resolve,
    ///   or `Ignored` when nothing was pending.
    pub fn complete(&mut self, store: &RecordStore, favorites: &FavoritesStore) -> ActivateOutcome {
        let PanelState::Opening(id) = self.state else {
            return ActivateOutcome::Ignored;
        };
        let Some(content) = populate(id, store, favorites) else {
            tracing::warn!(id, "[Panel] Record not found");
            self.state = PanelState::Closed;
            self.content = None;
            self.settling = false;
            return ActivateOutcome::NotFound(id);
        };
        self.content = Some(content);
        self.state = PanelState::Open(id);
        self.generation = self.generation.wrapping_add(1);
        self.settling = true;
        tracing::debug!(id, generation = self.generation, "[Panel] Opened");
        ActivateOutcome::Opened {
            id,
            generation: self.generation,
        }
    }

    /// What: Open `id`, replacing whatever record is open.
    ///
    /// Inputs:
    /// - `id`: Record to open (a card or a related link).
    /// - `store`, `favorites`: Sources for the content.
    ///
    /// Output:
    /// - See [`ActivateOutcome`].
    pub fn activate(
        &mut self,
        id: RecordId,
        store: &RecordStore,
        favorites: &FavoritesStore,
    ) -> ActivateOutcome {
        if !self.begin(id) {
            return ActivateOutcome::Ignored;
        }
        self.complete(store, favorites)
    }

    /// What: Close the panel.
    ///
    /// Inputs:
    /// - `reason`: What triggered the close.
    ///
    /// Output:
    /// - `true` when an open panel was closed; `false` when there was nothing to close.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        tracing::debug!(?reason, id = ?self.open_id(), "[Panel] Closed");
        self.state = PanelState::Closed;
        self.content = None;
        self.settling = false;
        true
    }

    /// What: Finish the deferred visual transition of an open.
    ///
    /// Inputs:
    /// - `generation`: Generation the deferred work was scheduled for.
    ///
    /// Output:
    /// - `true` when it applied; `false` when a newer open superseded it.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.settling {
            return false;
        }
        self.settling = false;
        true
    }

    /// What: Flip the open record's favorite status.
    ///
    /// Inputs:
    /// - `favorites`: Store that owns the mutation and its persistence.
    ///
    /// Output:
    /// - `Some(ToggleOutcome)` when a record was open; `None` otherwise.
    ///
    /// Details:
    /// - The panel stays `Open`; the caller must recompute the view state.
    pub fn toggle_favorite(&mut self, favorites: &mut FavoritesStore) -> Option<ToggleOutcome> {
        let id = self.open_id()?;
        let outcome = favorites.toggle(id);
        if let Some(content) = self.content.as_mut() {
            content.is_favorite = outcome.is_favorite;
        }
        Some(outcome)
    }
}

/// What: Build the panel content for `id`.
///
/// Inputs:
/// - `id`: Record to show.
/// - `store`: Record set for the record and its related links.
/// - `favorites`: Favorite status source.
///
/// Output:
/// - `Some(PanelContent)`; `None` when `id` is unknown.
///
/// Details:
/// - Related ids that do not resolve are dropped and logged.
#[must_use]
pub fn populate(
    id: RecordId,
    store: &RecordStore,
    favorites: &FavoritesStore,
) -> Option<PanelContent> {
    let rec = store.get(id)?;
    let related = rec
        .related
        .iter()
        .filter_map(|&rid| {
            let Some(target) = store.get(rid) else {
                tracing::debug!(id, related = rid, "[Panel] Dropping unresolved related id");
                return None;
            };
            Some(RelatedLink {
                id: rid,
                label: format!("{}. {}", target.id, target.title),
            })
        })
        .collect();
    let category = rec.category_name().to_string();
    Some(PanelContent {
        id,
        heading: format!("{}. {}", rec.id, rec.title),
        palette_index: store.palette_index(&category),
        category,
        description: non_empty_or(&rec.description, NO_DESCRIPTION),
        example: non_empty_or(&rec.example, NO_EXAMPLE),
        related,
        is_favorite: favorites.is_favorite(id),
    })
}

/// Return `text` or `fallback` when `text` is blank.
fn non_empty_or(text: &str, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Record;
    use crate::favorites::MemoryBlobStore;

    fn fixture() -> (RecordStore, FavoritesStore) {
        let store = RecordStore::new(vec![
            Record {
                id: 1,
                title: "Alpha".into(),
                category: Some("X".into()),
                description: "first".into(),
                example: String::new(),
                related: vec![2, 77],
            },
            Record {
                id: 2,
                title: "Beta".into(),
                category: Some("X".into()),
                description: String::new(),
                example: "ex".into(),
                related: vec![88],
            },
        ])
        .expect("non-empty");
        let fav = FavoritesStore::load(Box::new(MemoryBlobStore::new()), "favorites", &store);
        (store, fav)
    }

    #[test]
    /// What: Content is populated before the panel reports itself open.
    ///
    /// Inputs:
    /// - Activation of record 1 whose related list holds one unknown id.
    ///
    /// Output:
    /// - `Open(1)` with heading, placeholder example and a single related link.
    fn activate_populates_content() {
        let (store, fav) = fixture();
        let mut panel = DetailPanel::new();
        let out = panel.activate(1, &store, &fav);
        assert_eq!(out, ActivateOutcome::Opened { id: 1, generation: 1 });
        assert_eq!(panel.state(), PanelState::Open(1));
        let content = panel.content().expect("content");
        assert_eq!(content.heading, "1. Alpha");
        assert_eq!(content.example, NO_EXAMPLE);
        assert_eq!(content.related.len(), 1);
        assert_eq!(content.related[0].label, "2. Beta");
        assert!(panel.is_settling());
    }

    #[test]
    /// What: Related section is empty when no related id resolves.
    fn related_all_unresolved_hides_section() {
        let (store, fav) = fixture();
        let content = populate(2, &store, &fav).expect("record 2");
        assert!(content.related.is_empty());
        assert_eq!(content.description, NO_DESCRIPTION);
    }

    #[test]
    /// What: Activating an unknown id while a record is open closes the panel.
    ///
    /// Inputs:
    /// - `Open(1)`, then activation of id 999 which no record has.
    ///
    /// Output:
    /// - `NotFound(999)`, state `Closed`, no content left behind, no pending settle.
    fn activate_unknown_from_open_closes() {
        let (store, fav) = fixture();
        let mut panel = DetailPanel::new();
        assert!(matches!(panel.activate(1, &store, &fav), ActivateOutcome::Opened { id: 1, .. }));
        assert_eq!(panel.activate(999, &store, &fav), ActivateOutcome::NotFound(999));
        assert_eq!(panel.state(), PanelState::Closed);
        assert!(panel.content().is_none());
        assert!(panel.open_id().is_none());
        assert!(!panel.is_settling());
    }

    #[test]
    /// What: Activation is rejected while another is in flight.
    fn begin_rejects_reentrant_activation() {
        let (store, fav) = fixture();
        let mut panel = DetailPanel::new();
        assert!(panel.begin(1));
        assert!(!panel.begin(2));
        assert_eq!(panel.activate(2, &store, &fav), ActivateOutcome::Ignored);
        assert_eq!(panel.state(), PanelState::Opening(1));
        assert!(matches!(panel.complete(&store, &fav), ActivateOutcome::Opened { id: 1, .. }));
    }

    #[test]
    /// What: A newer open supersedes the pending transition of the previous one.
    ///
    /// Inputs:
    /// - Open record 1, then related record 2, then settle with both generations.
    ///
    /// Output:
    /// - The stale settle is ignored; the current one applies.
    fn settle_ignores_superseded_generation() {
        let (store, fav) = fixture();
        let mut panel = DetailPanel::new();
        let _ = panel.activate(1, &store, &fav);
        let first = panel.generation();
        let _ = panel.activate(2, &store, &fav);
        assert_eq!(panel.open_id(), Some(2));
        assert!(!panel.settle(first));
        assert!(panel.is_settling());
        assert!(panel.settle(panel.generation()));
        assert!(!panel.is_settling());
    }

    #[test]
    /// What: Closing is a no-op when closed and clears the open id otherwise.
    fn close_transitions() {
        let (store, fav) = fixture();
        let mut panel = DetailPanel::new();
        assert!(!panel.close(CloseReason::Escape));
        let _ = panel.activate(1, &store, &fav);
        assert!(panel.close(CloseReason::OutsideClick));
        assert_eq!(panel.state(), PanelState::Closed);
        assert!(panel.content().is_none());
    }

    #[test]
    /// What: Toggling the favorite keeps the panel open and updates its affordance.
    fn toggle_favorite_updates_content() {
        let (store, mut fav) = fixture();
        let mut panel = DetailPanel::new();
        assert!(panel.toggle_favorite(&mut fav).is_none());
        let _ = panel.activate(2, &store, &fav);
        let out = panel.toggle_favorite(&mut fav).expect("open");
        assert!(out.is_favorite);
        assert!(panel.content().is_some_and(|c| c.is_favorite));
        assert_eq!(panel.state(), PanelState::Open(2));
        assert!(fav.is_favorite(2));
    }
}
