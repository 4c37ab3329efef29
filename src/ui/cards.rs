use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::truncate_to_width;
use crate::catalog::RecordId;
use crate::state::{AppState, Focus};
use crate::theme::theme;

/// One rendered line of the card list; card rows carry their record id.
struct Row {
    /// Styled line.
    line: Line<'static>,
    /// Record shown on this line, if it is a card row.
    id: Option<RecordId>,
}

/// What: Render category groups and their visible cards.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: State providing the view model; receives card hit rectangles and scroll.
/// - `area`: Target area including the border.
///
/// Details:
/// - Categories without visible members are not drawn at all.
/// - When nothing is visible, a single "no results" message replaces the list.
/// - Scroll follows the selected card.
pub fn render_cards(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Cards;
    let title = if app.inputs.favorites_only {
        format!(" Favorites ({}) ", app.view.visible_count)
    } else {
        format!(" Records ({}/{}) ", app.view.visible_count, app.store.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(if focused { th.sapphire } else { th.overlay1 }))
        .style(Style::default().bg(th.base));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.cards_rect = Some((inner.x, inner.y, inner.width, inner.height));
    app.card_hits.clear();

    if let Some(reason) = app.view.no_results {
        let msg = Paragraph::new(Line::from(Span::styled(
            reason.message(),
            Style::default().fg(th.subtext0).add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true });
        f.render_widget(msg, inner);
        return;
    }

    let rows = build_rows(app, inner.width);
    let height = usize::from(inner.height);
    if let Some(sel) = rows.iter().position(|r| r.id.is_some() && r.id == app.selected) {
        if sel < app.scroll {
            app.scroll = sel.saturating_sub(1);
        } else if height > 0 && sel >= app.scroll + height {
            app.scroll = sel + 1 - height;
        }
    }
    app.scroll = app.scroll.min(rows.len().saturating_sub(1));

    let mut lines = Vec::with_capacity(height);
    for (i, row) in rows.into_iter().skip(app.scroll).take(height).enumerate() {
        if let Some(id) = row.id {
            let y = inner.y.saturating_add(u16::try_from(i).unwrap_or(u16::MAX));
            app.card_hits.push((id, (inner.x, y, inner.width, 1)));
        }
        lines.push(row.line);
    }
    f.render_widget(Paragraph::new(lines), inner);
}

/// Build header and card rows for every category that has visible members.
fn build_rows(app: &AppState, width: u16) -> Vec<Row> {
    let th = theme();
    let focused = app.focus == Focus::Cards;
    let mut rows = Vec::new();
    for cat in app.view.categories.iter().filter(|c| c.has_visible_members) {
        let color = app.settings.category_color(cat.palette_index);
        if !rows.is_empty() {
            rows.push(Row {
                line: Line::default(),
                id: None,
            });
        }
        rows.push(Row {
            line: Line::from(vec![
                Span::raw(format!("{} ", app.settings.category_icon(&cat.name))),
                Span::styled(
                    cat.name.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", cat.visible_count),
                    Style::default().fg(th.overlay1),
                ),
            ]),
            id: None,
        });
        for &id in &cat.members {
            let (Some(card), Some(rec)) = (app.view.card(id), app.store.get(id)) else {
                continue;
            };
            if !card.visible {
                continue;
            }
            let badge = format!(" {id:>3} ");
            let marker = if card.favorite { " ★" } else { "" };
            let budget = usize::from(width)
                .saturating_sub(badge.len() + 2)
                .saturating_sub(marker.chars().count());
            let mut title_style = Style::default().fg(th.text);
            if card.highlighted {
                title_style = title_style.fg(th.lavender).add_modifier(Modifier::BOLD);
            }
            let mut line = Line::from(vec![
                Span::raw("  "),
                Span::styled(badge, Style::default().fg(th.base).bg(color)),
                Span::styled(format!(" {}", truncate_to_width(&rec.title, budget)), title_style),
                Span::styled(marker.to_string(), Style::default().fg(th.yellow)),
            ]);
            if app.selected == Some(id) {
                let style = if focused {
                    Style::default().bg(th.surface1)
                } else {
                    Style::default().add_modifier(Modifier::UNDERLINED)
                };
                line = line.style(style);
            }
            rows.push(Row { line, id: Some(id) });
        }
    }
    rows
}
