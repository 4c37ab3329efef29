use crossterm::event::{KeyEvent, KeyModifiers};

use super::Dispatch;
use crate::panel::CloseReason;
use crate::state::{AppState, Command, Focus};
use crate::theme::KeyChord;

/// What: Whether `ke` matches any chord in `list`.
///
/// Inputs:
/// - `list`: Configured chords for one action.
/// - `ke`: Pressed key.
/// - `typing`: The search input has focus, so bare printable chords are text, not actions.
pub(super) fn matches_any(list: &[KeyChord], ke: KeyEvent, typing: bool) -> bool {
    list.iter().any(|c| {
        let printable = matches!(c.code, crossterm::event::KeyCode::Char(_))
            && !c.mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        !(typing && printable) && c.matches(ke.code, ke.modifiers)
    })
}

/// What: Handle chords that apply regardless of the focused pane.
///
/// Inputs:
/// - `ke`: Pressed key.
/// - `app`: Application state.
/// - `out`: Dispatch collecting the exit flag and effects.
///
/// Output:
/// - `true` when the key was consumed.
///
/// Details:
/// - Escape closes an open panel before anything else sees it.
pub(super) fn handle_global_key(ke: KeyEvent, app: &mut AppState, out: &mut Dispatch) -> bool {
    let km = app.settings.keymap.clone();
    let typing = app.focus == Focus::Search;
    if matches_any(&km.quit, ke, typing) {
        out.exit = true;
        return true;
    }
    if app.panel.is_open() && matches_any(&km.close_panel, ke, typing) {
        out.run(app, Command::Close(CloseReason::Escape));
        return true;
    }
    if matches_any(&km.toggle_favorites_view, ke, typing) {
        out.run(app, Command::ToggleFavoritesView);
        return true;
    }
    if app.panel.is_open() && matches_any(&km.toggle_favorite, ke, typing) {
        out.run(app, Command::ToggleFavorite);
        return true;
    }
    if matches_any(&km.focus_search, ke, typing) {
        app.focus = Focus::Search;
        return true;
    }
    if matches_any(&km.cycle_focus, ke, typing) {
        app.focus = match app.focus {
            Focus::Search => Focus::Cards,
            Focus::Cards if app.panel.is_open() => Focus::Panel,
            Focus::Cards | Focus::Panel => Focus::Search,
        };
        return true;
    }
    false
}
