use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{AppState, StatusLevel};
use crate::theme::theme;

/// What: Draw the current status message as a toast in the bottom-right corner.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: State holding the status area.
/// - `area`: Full frame area.
///
/// Details:
/// - Nothing is drawn when no message is active; expiry is handled by the tick.
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let Some(msg) = app.status.current() else {
        return;
    };
    let (title, color) = match msg.level {
        StatusLevel::Info => (" Info ", th.green),
        StatusLevel::Warning => (" Warning ", th.yellow),
        StatusLevel::Error => (" Error ", th.red),
    };
    let text_w = u16::try_from(unicode_width::UnicodeWidthStr::width(msg.text.as_str()))
        .unwrap_or(u16::MAX);
    let max_w = area.width.saturating_sub(4).max(10);
    let w = text_w.saturating_add(4).min(max_w);
    let inner_w = w.saturating_sub(2).max(1);
    let h = text_w.div_ceil(inner_w).saturating_add(2).min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(w + 1),
        y: area.y + area.height.saturating_sub(h + 1),
        width: w,
        height: h,
    };
    f.render_widget(Clear, rect);
    let toast = Paragraph::new(Line::from(Span::styled(
        msg.text.clone(),
        Style::default().fg(th.text),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(th.surface1)),
    );
    f.render_widget(toast, rect);
}
