//! Terminal rendering.
//!
//! Rendering only observes the session; every mutation goes through the
//! session's methods from the event loop.

mod details;
mod lists;
pub mod palette;
mod results;
pub mod view;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::session::SearchSession;

pub use palette::{Palette, palette};
pub use view::{Focus, UiState};

/// What: Draw one frame.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `session`: Session to observe.
/// - `view`: UI-local selections and focus.
///
/// Details:
/// - Layout: query line, optional error banner, results and details side by side,
///   recent and favorites side by side, key hint footer.
pub fn ui(f: &mut Frame, session: &SearchSession, view: &mut UiState) {
    let th = palette(session.is_light_theme());
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let banner_h: u16 = if session.state().last_error.is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_h),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_query(f, session, view, rows[0]);
    if let Some(err) = &session.state().last_error {
        let banner = Paragraph::new(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.red))
                .title(Span::styled(" Error ", Style::default().fg(th.red))),
        );
        f.render_widget(banner, rows[1]);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    results::render_results(f, session, view, middle[0]);
    details::render_details(f, session, view, middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    lists::render_recent(f, session, view, bottom[0]);
    lists::render_favorites(f, session, view, bottom[1]);

    render_footer(f, th, rows[4]);
}

/// Query input line with the cursor at the end of the text.
fn render_query(f: &mut Frame, session: &SearchSession, view: &UiState, area: Rect) {
    let th = palette(session.is_light_theme());
    let raw = &session.state().raw_query;
    let pending = if session.has_pending_commit() { " …" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(th.accent)),
        Span::styled(raw.clone(), Style::default().fg(th.text)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.accent))
            .title(Span::styled(
                format!(" Search by title{pending} "),
                Style::default().fg(th.accent),
            )),
    );
    f.render_widget(input, area);
    if view.focus == Focus::Results && area.width > 4 && area.height > 2 {
        let width = u16::try_from(unicode_width::UnicodeWidthStr::width(raw.as_str()))
            .unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(3)
            .saturating_add(width)
            .min(area.x + area.width - 2);
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Single-line key reference.
fn render_footer(f: &mut Frame, th: &Palette, area: Rect) {
    let hints = "Enter search  PgUp/PgDn page  ^S sort  ^F favorite  Tab focus  ^T theme  ^X clear list  Esc quit";
    let footer = Paragraph::new(Span::styled(hints, Style::default().fg(th.subtext)));
    f.render_widget(footer, area);
}

/// Border style for a pane depending on focus.
fn pane_block<'a>(title: Line<'a>, focused: bool, th: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.accent } else { th.overlay }))
        .title(title)
}
