//! Terminal rendering of the catalog browser.
//!
//! The renderer only reads [`AppState`] and writes back the hit-test
//! rectangles the mouse handler needs; it never changes view or panel state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{AppState, Focus};
use crate::theme::{KeyChord, theme};

/// Category groups and cards.
mod cards;
/// Detail panel.
mod details;
/// Status toast.
mod status;

/// Height of the search bar including borders.
const SEARCH_H: u16 = 3;

/// What: Render one frame of the browser.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: Application state; hit-test rectangles are refreshed in place.
///
/// Details:
/// - Layout: search bar, cards (left) with the detail panel (right) when open,
///   optional keybind footer, and a status toast on top.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);
    clear_hit_rects(app);

    let footer_h = u16::from(app.settings.show_keybinds_footer);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_H),
            Constraint::Min(1),
            Constraint::Length(footer_h),
        ])
        .split(area);

    render_search(f, app, chunks[0]);

    if app.panel.content().is_some() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        cards::render_cards(f, app, body[0]);
        details::render_details(f, app, body[1]);
    } else {
        cards::render_cards(f, app, chunks[1]);
    }

    if footer_h > 0 {
        render_footer(f, app, chunks[2]);
    }
    status::render_status(f, app, area);
}

/// What: Render the fatal startup screen shown when the dataset cannot be loaded.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `message`: Error text; stays until the user quits.
/// - `quit`: Configured quit chords, listed in the hint line.
pub fn render_fatal(f: &mut Frame, message: &str, quit: &[KeyChord]) {
    let th = theme();
    let area = f.area();
    let para = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(quit_hint(quit), Style::default().fg(th.subtext0))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                " Casebook ",
                Style::default().fg(th.red).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(th.red))
            .style(Style::default().bg(th.base)),
    );
    f.render_widget(para, area);
}

/// Forget rectangles from the previous frame so stale hits never match.
fn clear_hit_rects(app: &mut AppState) {
    app.cards_rect = None;
    app.panel_rect = None;
    app.close_button_rect = None;
    app.favorite_button_rect = None;
    app.favorites_toggle_rect = None;
    app.search_rect = None;
    app.card_hits.clear();
    app.related_hits.clear();
}

/// Search input plus the favorites-view toggle on the right.
fn render_search(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Search;
    let toggle = if app.inputs.favorites_only {
        " ★ Favorites "
    } else {
        " ☆ All records "
    };
    let toggle_w = u16::try_from(UnicodeWidthStr::width(toggle)).unwrap_or(0);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(toggle_w + 2)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Search ",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(if focused { th.sapphire } else { th.overlay1 }));
    let inner = block.inner(chunks[0]);
    let text = &app.inputs.search_text;
    let line = if text.is_empty() && !focused {
        Line::from(Span::styled(
            "Type to filter records…",
            Style::default().fg(th.overlay1).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(th.sapphire)),
            Span::styled(text.clone(), Style::default().fg(th.text)),
        ])
    };
    f.render_widget(Paragraph::new(line).block(block), chunks[0]);
    app.search_rect = Some((chunks[0].x, chunks[0].y, chunks[0].width, chunks[0].height));
    if focused && inner.width > 0 {
        let offset = u16::try_from(UnicodeWidthStr::width(text.as_str()) + 2).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.x + inner.width - 1);
        f.set_cursor_position(Position::new(x, inner.y));
    }

    let fg = if app.inputs.favorites_only {
        th.yellow
    } else {
        th.subtext0
    };
    let tb = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(fg));
    f.render_widget(
        Paragraph::new(Span::styled(
            toggle,
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        ))
        .block(tb),
        chunks[1],
    );
    app.favorites_toggle_rect = Some((chunks[1].x, chunks[1].y, chunks[1].width, chunks[1].height));
}

/// One-line keybind hint.
fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let km = &app.settings.keymap;
    let mut spans = Vec::new();
    let mut push = |key: String, what: &str| {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(th.base).bg(th.overlay1),
        ));
        spans.push(Span::styled(format!(" {what}  "), Style::default().fg(th.subtext0)));
    };
    push(first_label(&km.focus_search), "search");
    push(first_label(&km.activate), "open");
    if app.panel.is_open() {
        push(first_label(&km.toggle_favorite), "favorite");
        push(first_label(&km.close_panel), "close");
    }
    push(first_label(&km.toggle_favorites_view), "favorites view");
    push(first_label(&km.cycle_focus), "focus");
    push(first_label(&km.quit), "quit");
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Label of the first chord bound to an action.
fn first_label(chords: &[KeyChord]) -> String {
    chords.first().map_or_else(|| "-".to_string(), KeyChord::label)
}

/// Hint line naming every quit chord, e.g. `Press Ctrl+C or Ctrl+Q to quit.`
fn quit_hint(chords: &[KeyChord]) -> String {
    if chords.is_empty() {
        return "No quit key is bound; close the terminal to exit.".to_string();
    }
    let labels: Vec<String> = chords.iter().map(KeyChord::label).collect();
    format!("Press {} to quit.", labels.join(" or "))
}

/// What: Cut `s` to at most `max` display columns, adding an ellipsis when cut.
///
/// Inputs:
/// - `s`: Text to fit.
/// - `max`: Available columns.
///
/// Output:
/// - Text whose display width does not exceed `max`.
pub(crate) fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw + 1 > max {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push('…');
    out
}

/// What: Word-wrap text into lines of at most `width` display columns.
///
/// Inputs:
/// - `text`: Text that may contain explicit line breaks.
/// - `width`: Maximum line width.
///
/// Output:
/// - Wrapped lines; explicit breaks and blank lines are kept.
///
/// Details:
/// - Words longer than `width` are split across lines.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut line = String::new();
        let mut line_w = 0;
        for word in raw.split_whitespace() {
            let word_w = UnicodeWidthStr::width(word);
            if line_w > 0 && line_w + 1 + word_w > width {
                out.push(std::mem::take(&mut line));
                line_w = 0;
            }
            if line_w > 0 {
                line.push(' ');
                line_w += 1;
            }
            for ch in word.chars() {
                let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
                if line_w + cw > width && line_w > 0 {
                    out.push(std::mem::take(&mut line));
                    line_w = 0;
                }
                line.push(ch);
                line_w += cw;
            }
        }
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
