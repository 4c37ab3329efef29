//! Event handling layer for Casebook's TUI.
//!
//! Maps terminal key and mouse events onto [`Command`]s and applies them to
//! the [`AppState`] in arrival order. Pane-specific key logic and mouse
//! hit-testing live in submodules.

use crossterm::event::{Event as CEvent, KeyEventKind};

use crate::state::{AppState, Command, Effects};

mod global;
mod mouse;
mod search;

/// Result of handling one terminal event.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The application should exit.
    pub exit: bool,
    /// Effects of every command applied for the event, in order.
    pub effects: Vec<Effects>,
}

impl Dispatch {
    /// Apply `cmd` to `app` and record its effects.
    fn run(&mut self, app: &mut AppState, cmd: Command) {
        tracing::trace!(?cmd, "[Events] Applying command");
        self.effects.push(app.apply(cmd));
    }
}

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event.
/// - `app`: Application state.
///
/// Output:
/// - [`Dispatch`] with the exit flag and the effects the runtime must schedule.
///
/// Details:
/// - Key releases and repeats other than presses are ignored.
/// - Global chords are checked before the focused pane sees the key.
pub fn handle_event(ev: CEvent, app: &mut AppState) -> Dispatch {
    let mut out = Dispatch::default();
    match ev {
        CEvent::Key(ke) => {
            if ke.kind != KeyEventKind::Press {
                return out;
            }
            if global::handle_global_key(ke, app, &mut out) {
                return out;
            }
            search::handle_focused_key(ke, app, &mut out);
        }
        CEvent::Mouse(m) => mouse::handle_mouse_event(m, app, &mut out),
        _ => {}
    }
    out
}
