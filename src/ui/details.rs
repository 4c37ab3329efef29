use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::{truncate_to_width, wrap_text};
use crate::catalog::RecordId;
use crate::state::{AppState, Focus};
use crate::theme::theme;

/// Label of the close control drawn on the panel border.
const CLOSE_LABEL: &str = "[x]";

/// What: Render the detail panel for the open record.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: State holding the panel content; receives panel, close, favorite and
///   related-link hit rectangles.
/// - `area`: Panel area including the border.
///
/// Details:
/// - Missing descriptions and examples show placeholders already resolved by the panel.
/// - The related section is omitted when no link resolved.
/// - While the open transition is still settling the border is dimmed.
pub fn render_details(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let Some(content) = app.panel.content().cloned() else {
        return;
    };
    app.panel_rect = Some((area.x, area.y, area.width, area.height));
    app.related_hits.clear();

    let color = app.settings.category_color(content.palette_index);
    let focused = app.focus == Focus::Panel;
    let border = if app.panel.is_settling() {
        th.overlay1
    } else if focused {
        th.sapphire
    } else {
        color
    };
    let title_budget = usize::from(area.width).saturating_sub(CLOSE_LABEL.len() + 6);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", truncate_to_width(&content.heading, title_budget)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(th.base));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let close_w = u16::try_from(CLOSE_LABEL.len()).unwrap_or(3);
    if area.width > close_w + 2 {
        let rect = Rect {
            x: area.x + area.width - close_w - 1,
            y: area.y,
            width: close_w,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(CLOSE_LABEL, Style::default().fg(th.red))),
            rect,
        );
        app.close_button_rect = Some((rect.x, rect.y, rect.width, rect.height));
    }

    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let width = usize::from(inner.width);
    let section = Style::default().fg(th.mauve).add_modifier(Modifier::BOLD);

    let mut lines: Vec<(Line<'static>, Option<RecordId>)> = Vec::new();
    lines.push((
        Line::from(vec![
            Span::raw(format!("{} ", app.settings.category_icon(&content.category))),
            Span::styled(content.category.clone(), Style::default().fg(color)),
        ]),
        None,
    ));
    lines.push((Line::default(), None));
    lines.push((Line::from(Span::styled("Description", section)), None));
    for l in wrap_text(&content.description, width) {
        lines.push((Line::from(Span::styled(l, Style::default().fg(th.text))), None));
    }
    lines.push((Line::default(), None));
    lines.push((Line::from(Span::styled("Example", section)), None));
    for l in wrap_text(&content.example, width) {
        lines.push((Line::from(Span::styled(l, Style::default().fg(th.green))), None));
    }
    if !content.related.is_empty() {
        lines.push((Line::default(), None));
        lines.push((Line::from(Span::styled("Related", section)), None));
        for (i, link) in content.related.iter().enumerate() {
            let mut style = Style::default().fg(th.sapphire).add_modifier(Modifier::UNDERLINED);
            if focused && i == app.related_selected {
                style = style.bg(th.surface1).add_modifier(Modifier::BOLD);
            }
            lines.push((
                Line::from(Span::styled(
                    format!("→ {}", truncate_to_width(&link.label, width.saturating_sub(2))),
                    style,
                )),
                Some(link.id),
            ));
        }
    }

    // Last row is reserved for the favorite control.
    let body_h = usize::from(inner.height.saturating_sub(1));
    let mut rendered = Vec::with_capacity(body_h);
    for (i, (line, link)) in lines.into_iter().take(body_h).enumerate() {
        if let Some(id) = link {
            let y = inner.y + u16::try_from(i).unwrap_or(0);
            app.related_hits.push((id, (inner.x, y, inner.width, 1)));
        }
        rendered.push(line);
    }
    f.render_widget(
        Paragraph::new(rendered),
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        },
    );

    let (label, fg) = if content.is_favorite {
        ("[★ Remove from favorites]", th.yellow)
    } else {
        ("[☆ Add to favorites]", th.subtext0)
    };
    let fav_rect = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner
            .width
            .min(u16::try_from(unicode_width::UnicodeWidthStr::width(label)).unwrap_or(u16::MAX)),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        )),
        fav_rect,
    );
    app.favorite_button_rect = Some((fav_rect.x, fav_rect.y, fav_rect.width, fav_rect.height));
}
