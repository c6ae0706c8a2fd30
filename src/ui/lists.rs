use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use super::{Focus, UiState, palette, pane_block};
use crate::session::SearchSession;
use crate::util::{join_authors, truncate_to_width};

/// Render recent searches, most recent first.
pub fn render_recent(f: &mut Frame, session: &SearchSession, view: &mut UiState, area: Rect) {
    let th = palette(session.is_light_theme());
    let focused = view.focus == Focus::Recent;
    let items: Vec<ListItem> = session
        .recent_searches()
        .into_iter()
        .map(|term| {
            ListItem::new(Span::styled(
                term,
                Style::default().fg(if focused { th.text } else { th.subtext }),
            ))
        })
        .collect();
    let title = Line::from(Span::styled(
        " Recent ",
        Style::default().fg(if focused { th.accent } else { th.overlay }),
    ));
    let list = List::new(items)
        .block(pane_block(title, focused, th))
        .highlight_style(Style::default().bg(th.highlight));
    f.render_stateful_widget(list, area, &mut view.recent);
}

/// What: Render the favorites pane.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `session`: Session providing favorites
/// - `view`: Selection and focus
/// - `area`: Target rectangle
///
/// Details:
/// - Rows show title, authors, and year, truncated to the pane width.
pub fn render_favorites(f: &mut Frame, session: &SearchSession, view: &mut UiState, area: Rect) {
    let th = palette(session.is_light_theme());
    let focused = view.focus == Focus::Favorites;
    let width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem> = session
        .favorites()
        .iter()
        .map(|e| {
            let year = e
                .first_publish_year
                .map(|y| format!(" ({y})"))
                .unwrap_or_default();
            let text = format!("{} — {}{year}", e.title, join_authors(&e.authors));
            ListItem::new(Span::styled(
                truncate_to_width(&text, width),
                Style::default().fg(if focused { th.text } else { th.subtext }),
            ))
        })
        .collect();
    let title = Line::from(vec![
        Span::styled(
            " Favorites ",
            Style::default().fg(if focused { th.accent } else { th.overlay }),
        ),
        Span::styled(
            format!("{} ", session.favorites().len()),
            Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    let list = List::new(items)
        .block(pane_block(title, focused, th))
        .highlight_style(Style::default().bg(th.highlight));
    f.render_stateful_widget(list, area, &mut view.favorites);
}
