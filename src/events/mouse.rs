use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::Dispatch;
use crate::panel::CloseReason;
use crate::state::{AppState, Command, Focus, rect_contains};

/// What: Handle a mouse event using the rectangles recorded by the last render.
///
/// Inputs:
/// - `m`: Mouse event.
/// - `app`: Application state with hit-test rectangles.
/// - `out`: Dispatch collecting effects.
///
/// Details:
/// - Inside the open panel: close button, favorite button and related links.
/// - On a card: select and activate it (never treated as an outside click).
/// - Anywhere else while the panel is open: close it as an outside click, then apply
///   whatever the click landed on (search input, favorites toggle).
/// - Scroll wheel moves the card selection.
pub(super) fn handle_mouse_event(m: MouseEvent, app: &mut AppState, out: &mut Dispatch) {
    let (col, row) = (m.column, m.row);
    match m.kind {
        MouseEventKind::ScrollDown => app.move_selection(1),
        MouseEventKind::ScrollUp => app.move_selection(-1),
        MouseEventKind::Down(MouseButton::Left) => {
            if app.panel.is_open() && app.panel_rect.is_some_and(|r| rect_contains(r, col, row)) {
                handle_panel_click(app, col, row, out);
                return;
            }
            if let Some(id) = app.card_at(col, row) {
                app.selected = Some(id);
                app.focus = Focus::Cards;
                out.run(app, Command::Activate(id));
                return;
            }
            if app.panel.is_open() {
                out.run(app, Command::Close(CloseReason::OutsideClick));
            }
            if app
                .favorites_toggle_rect
                .is_some_and(|r| rect_contains(r, col, row))
            {
                out.run(app, Command::ToggleFavoritesView);
            } else if app.search_rect.is_some_and(|r| rect_contains(r, col, row)) {
                app.focus = Focus::Search;
            }
        }
        _ => {}
    }
}

/// Handle a left click that landed inside the detail panel.
fn handle_panel_click(app: &mut AppState, col: u16, row: u16, out: &mut Dispatch) {
    if app
        .close_button_rect
        .is_some_and(|r| rect_contains(r, col, row))
    {
        out.run(app, Command::Close(CloseReason::Button));
    } else if app
        .favorite_button_rect
        .is_some_and(|r| rect_contains(r, col, row))
    {
        out.run(app, Command::ToggleFavorite);
    } else if let Some(id) = app.related_at(col, row) {
        app.focus = Focus::Panel;
        out.run(app, Command::Activate(id));
    }
}
