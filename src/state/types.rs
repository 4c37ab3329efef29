//! Core value types used by Casebook state.

use std::time::Duration;

use crate::catalog::RecordId;
use crate::panel::CloseReason;

/// Which pane currently receives keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// The search input; printable keys edit the search text.
    #[default]
    Search,
    /// The card list; arrows move the card selection.
    Cards,
    /// The detail panel; arrows move through related links.
    Panel,
}

/// Closed set of state transitions the engine accepts.
///
/// Every input event maps to at most one command; each command is handled to
/// completion before the next one is looked at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the search text.
    Search(String),
    /// Flip the favorites-only filter.
    ToggleFavoritesView,
    /// Open a record in the detail panel (card or related link).
    Activate(RecordId),
    /// Close the detail panel.
    Close(CloseReason),
    /// Flip favorite status of the open record.
    ToggleFavorite,
    /// Deferred end of the panel's open transition for a given generation.
    SettleTransition(u64),
    /// Periodic housekeeping (status expiry).
    Tick,
}

/// Follow-up work requested by a processed command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Schedule `Command::SettleTransition(generation)` after the delay.
    pub settle_after: Option<(u64, Duration)>,
    /// The view model was recomputed.
    pub view_changed: bool,
}
