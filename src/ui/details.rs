use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Focus, Palette, UiState, palette, pane_block};
use crate::logic::cover::{cover_image_url_from, favorite_cover_url};
use crate::session::SearchSession;
use crate::state::FavoriteEntry;
use crate::util::join_authors;

/// Labelled detail row.
fn row<'a>(th: &Palette, label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(th.subtext)),
        Span::styled(value, Style::default().fg(th.text)),
    ])
}

/// Lines for a pinned book.
fn favorite_lines<'a>(th: &Palette, view: &UiState, e: &FavoriteEntry) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("★ {}", e.title),
            Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
        )),
        row(th, "Authors", join_authors(&e.authors)),
    ];
    if let Some(year) = e.first_publish_year {
        lines.push(row(th, "First published", year.to_string()));
    }
    if let Some(url) = favorite_cover_url(&view.covers_url, e, view.cover_size) {
        lines.push(row(th, "Cover", url));
    }
    lines.push(row(th, "Key", e.id.clone()));
    lines
}

/// What: Render details for the highlighted result or favorite.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `session`: Session providing results and favorites
/// - `view`: Selection, focus, and cover settings
/// - `area`: Target rectangle
///
/// Details:
/// - With the Favorites pane focused, the highlighted favorite is shown instead.
pub fn render_details(f: &mut Frame, session: &SearchSession, view: &UiState, area: Rect) {
    let th = palette(session.is_light_theme());
    let pinned = (view.focus == Focus::Favorites)
        .then(|| view.favorites.selected())
        .flatten()
        .and_then(|i| session.favorites().get(i));
    if let Some(e) = pinned {
        let title = Line::from(Span::styled(" Favorite ", Style::default().fg(th.yellow)));
        let para = Paragraph::new(favorite_lines(th, view, e))
            .wrap(Wrap { trim: true })
            .block(pane_block(title, false, th));
        f.render_widget(para, area);
        return;
    }
    let selected = view
        .results
        .selected()
        .and_then(|i| session.state().results.get(i));

    let lines: Vec<Line> = selected.map_or_else(
        || {
            vec![Line::from(Span::styled(
                "Type a title to search the catalog.",
                Style::default().fg(th.subtext),
            ))]
        },
        |b| {
            let mut lines = vec![
                Line::from(Span::styled(
                    b.title.clone(),
                    Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                )),
                row(th, "Authors", join_authors(&b.authors)),
            ];
            if let Some(year) = b.first_publish_year {
                lines.push(row(th, "First published", year.to_string()));
            }
            if let Some(n) = b.edition_count {
                lines.push(row(th, "Editions", n.to_string()));
            }
            if let Some(subjects) = b.subjects.as_ref().filter(|s| !s.is_empty()) {
                let shown: Vec<&str> = subjects.iter().take(6).map(String::as_str).collect();
                lines.push(row(th, "Subjects", shown.join(", ")));
            }
            if let Some(isbn) = b.isbns.as_ref().and_then(|v| v.first()) {
                lines.push(row(th, "ISBN", isbn.clone()));
            }
            if let Some(url) = cover_image_url_from(&view.covers_url, b, view.cover_size) {
                lines.push(row(th, "Cover", url));
            }
            lines.push(row(th, "Key", b.id.clone()));
            if session.is_favorite(&b.id) {
                lines.push(Line::from(Span::styled(
                    "★ In favorites",
                    Style::default().fg(th.yellow),
                )));
            }
            lines
        },
    );

    let title = Line::from(Span::styled(" Details ", Style::default().fg(th.accent)));
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(pane_block(title, false, th));
    f.render_widget(para, area);
}
