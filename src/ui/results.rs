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

/// What: Render the results list with its status title.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `session`: Session providing results and paging
/// - `view`: Selection and focus
/// - `area`: Target rectangle
///
/// Details:
/// - Title shows page `n/m`, total hits, sort label, and a loading marker.
/// - Favorited books carry a star.
pub fn render_results(f: &mut Frame, session: &SearchSession, view: &mut UiState, area: Rect) {
    let th = palette(session.is_light_theme());
    let st = session.state();
    let width = usize::from(area.width.saturating_sub(4));

    let items: Vec<ListItem> = st
        .results
        .iter()
        .map(|b| {
            let star = if session.is_favorite(&b.id) { "★ " } else { "  " };
            let year = b
                .first_publish_year
                .map_or_else(|| "----".to_string(), |y| y.to_string());
            let line = format!("{} — {}", b.title, join_authors(&b.authors));
            ListItem::new(Line::from(vec![
                Span::styled(star, Style::default().fg(th.yellow)),
                Span::styled(format!("{year} "), Style::default().fg(th.subtext)),
                Span::styled(
                    truncate_to_width(&line, width.saturating_sub(7)),
                    Style::default().fg(th.text),
                ),
            ]))
        })
        .collect();

    let mut title = vec![Span::styled(" Results ", Style::default().fg(th.accent))];
    if st.has_active_term() {
        title.push(Span::styled(
            format!(
                "page {}/{} · {} found · {} ",
                st.page,
                st.total_pages().max(1),
                st.total_count,
                st.sort_mode.label()
            ),
            Style::default().fg(th.subtext),
        ));
    } else {
        title.push(Span::styled(
            format!("{} ", st.sort_mode.label()),
            Style::default().fg(th.subtext),
        ));
    }
    if st.loading {
        title.push(Span::styled(
            "loading… ",
            Style::default().fg(th.green).add_modifier(Modifier::BOLD),
        ));
    }

    let list = List::new(items)
        .block(pane_block(
            Line::from(title),
            view.focus == Focus::Results,
            th,
        ))
        .highlight_style(Style::default().bg(th.highlight).add_modifier(Modifier::BOLD));
    f.render_stateful_widget(list, area, &mut view.results);
}
