use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Dispatch;
use super::global::matches_any;
use crate::state::{AppState, Command, Focus};

/// What: Handle a key for the focused pane.
///
/// Inputs:
/// - `ke`: Pressed key not consumed by global chords.
/// - `app`: Application state.
/// - `out`: Dispatch collecting effects.
///
/// Details:
/// - Search: printable keys and Backspace edit the search text (one `Search` command
///   per keystroke); Esc clears it; Down/Enter move focus to the cards.
/// - Cards: arrows move the selection; activate opens the selected card.
/// - Panel: arrows move through related links; activate opens the selected link.
pub(super) fn handle_focused_key(ke: KeyEvent, app: &mut AppState, out: &mut Dispatch) {
    let km = app.settings.keymap.clone();
    match app.focus {
        Focus::Search => handle_search_input(ke, app, out),
        Focus::Cards => {
            if matches_any(&km.next_card, ke, false) {
                app.move_selection(1);
            } else if matches_any(&km.prev_card, ke, false) {
                app.move_selection(-1);
            } else if matches_any(&km.activate, ke, false) {
                if let Some(id) = app.selected {
                    out.run(app, Command::Activate(id));
                    if app.panel.is_open() {
                        app.focus = Focus::Panel;
                    }
                }
            } else if ke.code == KeyCode::PageDown {
                app.move_selection(10);
            } else if ke.code == KeyCode::PageUp {
                app.move_selection(-10);
            }
        }
        Focus::Panel => {
            if matches_any(&km.next_card, ke, false) {
                app.move_related(1);
            } else if matches_any(&km.prev_card, ke, false) {
                app.move_related(-1);
            } else if matches_any(&km.activate, ke, false)
                && let Some(id) = app.selected_related()
            {
                out.run(app, Command::Activate(id));
            }
        }
    }
}

/// Edit the search text and emit one `Search` command per change.
fn handle_search_input(ke: KeyEvent, app: &mut AppState, out: &mut Dispatch) {
    let mut text = app.inputs.search_text.clone();
    match ke.code {
        KeyCode::Char(ch) if !ke.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            text.push(ch);
        }
        KeyCode::Char('u') if ke.modifiers.contains(KeyModifiers::CONTROL) => text.clear(),
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Esc => text.clear(),
        KeyCode::Down | KeyCode::Enter => {
            app.focus = Focus::Cards;
            return;
        }
        _ => return,
    }
    out.run(app, Command::Search(text));
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::events::handle_event;
    use crate::events::test_support::{key, key_mod, new_app};
    use crate::panel::PanelState;
    use crate::state::Focus;

    #[test]
    /// What: Typing filters on every keystroke and Backspace widens again.
    ///
    /// Inputs:
    /// - Keys "g", "a", Backspace, Ctrl+U in the search pane.
    ///
    /// Output:
    /// - Search text and visible cards follow each keystroke.
    fn typing_filters_each_keystroke() {
        let mut app = new_app();
        let _ = handle_event(key(KeyCode::Char('G')), &mut app);
        assert_eq!(app.inputs.search_text, "G");
        assert_eq!(app.view.visible_ids().collect::<Vec<_>>(), vec![3]);
        let _ = handle_event(key(KeyCode::Char('a')), &mut app);
        assert_eq!(app.view.search_term, "ga");
        let _ = handle_event(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.inputs.search_text, "G");
        let _ = handle_event(key_mod(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut app);
        assert!(app.inputs.search_text.is_empty());
        assert_eq!(app.view.visible_count, 3);
    }

    #[test]
    /// What: Related links are navigable and replace the open record.
    fn panel_related_link_activation() {
        let mut app = new_app();
        let _ = handle_event(key(KeyCode::Enter), &mut app);
        assert_eq!(app.focus, Focus::Cards);
        let out = handle_event(key(KeyCode::Enter), &mut app);
        assert_eq!(out.effects.len(), 1);
        assert_eq!(app.focus, Focus::Panel);
        assert_eq!(app.selected_related(), Some(3));
        let _ = handle_event(key(KeyCode::Enter), &mut app);
        assert_eq!(app.panel.state(), PanelState::Open(3));
        assert_eq!(app.selected_related(), None);
    }

    #[test]
    /// What: Activating the already open card again is a no-op.
    fn reactivating_open_card_is_ignored() {
        let mut app = new_app();
        app.focus = Focus::Cards;
        let _ = handle_event(key(KeyCode::Enter), &mut app);
        let generation = app.panel.generation();
        app.focus = Focus::Cards;
        let out = handle_event(key(KeyCode::Enter), &mut app);
        assert_eq!(out.effects[0].settle_after, None);
        assert_eq!(app.panel.generation(), generation);
    }
}
