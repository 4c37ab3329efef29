//! Central `AppState` container and its command dispatch.

use std::time::{Duration, Instant};

use crate::catalog::{RecordId, RecordStore};
use crate::favorites::FavoritesStore;
use crate::panel::{ActivateOutcome, DetailPanel};
use crate::state::status::{StatusBar, StatusLevel};
use crate::state::types::{Command, Effects, Focus};
use crate::theme::Settings;
use crate::view::{self, ViewInputs, ViewModel};

/// Terminal-cell rectangle `(x, y, w, h)` used for mouse hit-testing.
pub type CellRect = (u16, u16, u16, u16);

/// Whether the cell `(col, row)` lies inside `rect`.
#[must_use]
pub const fn rect_contains(rect: CellRect, col: u16, row: u16) -> bool {
    let (x, y, w, h) = rect;
    col >= x && col < x.saturating_add(w) && row >= y && row < y.saturating_add(h)
}

/// Application state owned by the single event-processing actor.
///
/// The record store, favorites, view inputs, derived view model and panel
/// live here explicitly; there is no ambient global state. The renderer reads
/// it and records hit-test rectangles back into it.
#[derive(Debug)]
pub struct AppState {
    /// Immutable record set for the session.
    pub store: RecordStore,
    /// Persisted favorites.
    pub favorites: FavoritesStore,
    /// Current search text and favorites-only flag.
    pub inputs: ViewInputs,
    /// View model for the current inputs.
    pub view: ViewModel,
    /// Detail panel controller.
    pub panel: DetailPanel,
    /// Transient status area.
    pub status: StatusBar,
    /// Settings loaded at startup.
    pub settings: Settings,
    /// Duration of the panel's open transition.
    pub transition: Duration,

    /// Pane receiving keyboard input.
    pub focus: Focus,
    /// Selected card, kept on a visible card when possible.
    pub selected: Option<RecordId>,
    /// Index of the selected related link while the panel has focus.
    pub related_selected: usize,
    /// First rendered card row, for scrolling.
    pub scroll: usize,

    /// Inner rectangle of the card list.
    pub cards_rect: Option<CellRect>,
    /// Outer rectangle of the detail panel when open.
    pub panel_rect: Option<CellRect>,
    /// Clickable close control of the panel.
    pub close_button_rect: Option<CellRect>,
    /// Clickable favorite control of the panel.
    pub favorite_button_rect: Option<CellRect>,
    /// Rectangle of the favorites-view toggle in the search bar.
    pub favorites_toggle_rect: Option<CellRect>,
    /// Rectangle of the search input.
    pub search_rect: Option<CellRect>,
    /// Rendered card rows.
    pub card_hits: Vec<(RecordId, CellRect)>,
    /// Rendered related links.
    pub related_hits: Vec<(RecordId, CellRect)>,
}

impl AppState {
    /// What: Build the application state and compute the initial view.
    ///
    /// Inputs:
    /// - `store`: Loaded record set.
    /// - `favorites`: Loaded favorites.
    /// - `settings`: User settings.
    ///
    /// Output:
    /// - State with an unfiltered view and the first visible card selected.
    #[must_use]
    pub fn new(store: RecordStore, favorites: FavoritesStore, settings: Settings) -> Self {
        let inputs = ViewInputs::default();
        let view = view::compute(&store, &favorites, &inputs);
        let mut app = Self {
            status: StatusBar::new(Duration::from_millis(settings.status_duration_ms)),
            transition: Duration::from_millis(settings.panel_transition_ms),
            store,
            favorites,
            inputs,
            view,
            panel: DetailPanel::new(),
            settings,
            focus: Focus::default(),
            selected: None,
            related_selected: 0,
            scroll: 0,
            cards_rect: None,
            panel_rect: None,
            close_button_rect: None,
            favorite_button_rect: None,
            favorites_toggle_rect: None,
            search_rect: None,
            card_hits: Vec::new(),
            related_hits: Vec::new(),
        };
        app.keep_selection_visible();
        app
    }

    /// What: Process one command to completion.
    ///
    /// Inputs:
    /// - `cmd`: Command derived from a user input or a deferred task.
    ///
    /// Output:
    /// - [`Effects`] describing deferred work for the runtime.
    ///
    /// Details:
    /// - Any change to the search text, favorites-only flag or favorites set recomputes
    ///   the full view model before returning.
    pub fn apply(&mut self, cmd: Command) -> Effects {
        let mut fx = Effects::default();
        match cmd {
            Command::Search(text) => {
                if text != self.inputs.search_text {
                    self.inputs.search_text = text;
                    fx.view_changed = self.recompute();
                }
            }
            Command::ToggleFavoritesView => {
                self.inputs.favorites_only = !self.inputs.favorites_only;
                tracing::debug!(favorites_only = self.inputs.favorites_only, "[State] Favorites view toggled");
                fx.view_changed = self.recompute();
            }
            Command::Activate(id) => match self.panel.activate(id, &self.store, &self.favorites) {
                ActivateOutcome::Opened { generation, .. } => {
                    self.related_selected = 0;
                    fx.settle_after = Some((generation, self.transition));
                }
                ActivateOutcome::NotFound(id) => {
                    self.status
                        .show(format!("Record {id} not found."), StatusLevel::Error);
                    if self.focus == Focus::Panel {
                        self.focus = Focus::Cards;
                    }
                }
                ActivateOutcome::Ignored => {}
            },
            Command::Close(reason) => {
                if self.panel.close(reason) && self.focus == Focus::Panel {
                    self.focus = Focus::Cards;
                }
            }
            Command::ToggleFavorite => {
                if let Some(outcome) = self.panel.toggle_favorite(&mut self.favorites) {
                    let id = self.panel.open_id().unwrap_or_default();
                    if let Some(err) = outcome.warning {
                        tracing::warn!(error = %err, "[State] Favorites not persisted");
                        self.status
                            .show("Failed to save favorites.", StatusLevel::Warning);
                    } else if outcome.is_favorite {
                        self.status
                            .show(format!("Record {id} added to favorites."), StatusLevel::Info);
                    } else {
                        self.status.show(
                            format!("Record {id} removed from favorites."),
                            StatusLevel::Info,
                        );
                    }
                    fx.view_changed = self.recompute();
                }
            }
            Command::SettleTransition(generation) => {
                self.panel.settle(generation);
            }
            Command::Tick => {
                self.status.prune(Instant::now());
            }
        }
        fx
    }

    /// Recompute the full view model and repair the selection. Returns `true` when it changed.
    fn recompute(&mut self) -> bool {
        let next = view::compute(&self.store, &self.favorites, &self.inputs);
        let changed = next != self.view;
        self.view = next;
        self.keep_selection_visible();
        changed
    }

    /// Keep `selected` on a visible card, falling back to the first visible one.
    fn keep_selection_visible(&mut self) {
        if self.selected.is_some_and(|id| self.view.is_visible(id)) {
            return;
        }
        self.selected = self.view.visible_ids().next();
        self.scroll = 0;
    }

    /// What: Move the card selection by `delta` visible cards.
    ///
    /// Inputs:
    /// - `delta`: Positive moves down, negative moves up; clamped at the ends.
    ///
    /// Output:
    /// - Updates `selected`.
    pub fn move_selection(&mut self, delta: isize) {
        let visible: Vec<RecordId> = self.view.visible_ids().collect();
        if visible.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .and_then(|id| visible.iter().position(|v| *v == id))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(visible.len() - 1);
        self.selected = Some(visible[next]);
    }

    /// What: Move the related-link selection inside the open panel.
    ///
    /// Inputs:
    /// - `delta`: Step, clamped to the number of related links.
    pub fn move_related(&mut self, delta: isize) {
        let n = self.panel.content().map_or(0, |c| c.related.len());
        if n == 0 {
            self.related_selected = 0;
            return;
        }
        self.related_selected = self.related_selected.saturating_add_signed(delta).min(n - 1);
    }

    /// Related link currently selected in the panel.
    #[must_use]
    pub fn selected_related(&self) -> Option<RecordId> {
        self.panel
            .content()
            .and_then(|c| c.related.get(self.related_selected))
            .map(|l| l.id)
    }

    /// Card under the cell `(col, row)`, if any.
    #[must_use]
    pub fn card_at(&self, col: u16, row: u16) -> Option<RecordId> {
        self.card_hits
            .iter()
            .find(|(_, r)| rect_contains(*r, col, row))
            .map(|(id, _)| *id)
    }

    /// Related link under the cell `(col, row)`, if any.
    #[must_use]
    pub fn related_at(&self, col: u16, row: u16) -> Option<RecordId> {
        self.related_hits
            .iter()
            .find(|(_, r)| rect_contains(*r, col, row))
            .map(|(id, _)| *id)
    }
}
