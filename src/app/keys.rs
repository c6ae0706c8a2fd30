use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::SearchSession;
use crate::ui::{Focus, UiState};

/// Row counts the selections are clamped to.
fn clamp_view(session: &SearchSession, view: &mut UiState) {
    view.clamp(
        session.state().results.len(),
        session.recent_searches().len(),
        session.favorites().len(),
    );
}

/// What: Apply a `Ctrl`-chord.
///
/// Output:
/// - `Some(exit)` when the chord was handled; `None` to fall through.
fn handle_ctrl(code: KeyCode, session: &mut SearchSession, view: &mut UiState) -> Option<bool> {
    match code {
        KeyCode::Char('c') => Some(true),
        KeyCode::Char('s') => {
            let mode = session.cycle_sort_mode();
            tracing::debug!(sort = mode.as_config_key(), "[Runtime] Sort changed");
            Some(false)
        }
        KeyCode::Char('f') => {
            match view.focus {
                Focus::Favorites => {
                    if let Some(i) = view.favorites.selected() {
                        session.remove_favorite_at(i);
                    }
                }
                _ => {
                    if let Some(i) = view.results.selected() {
                        session.toggle_favorite_at(i);
                    }
                }
            }
            Some(false)
        }
        KeyCode::Char('t') => {
            session.toggle_theme();
            Some(false)
        }
        KeyCode::Char('x') => {
            match view.focus {
                Focus::Recent => session.clear_recent(),
                Focus::Favorites => session.clear_favorites(),
                Focus::Results => {}
            }
            Some(false)
        }
        _ => None,
    }
}

/// What: Apply one key press to the session and view.
///
/// Inputs:
/// - `ke`: Key event from the terminal.
/// - `session`: Session receiving the action.
/// - `view`: Focus and selections.
///
/// Output:
/// - `true` when the application should exit.
///
/// Details:
/// - Typing always edits the query, whichever pane has focus.
/// - `Enter` in the Recent pane reuses the highlighted term; elsewhere it searches now.
/// - `Delete` removes the highlighted entry of the Recent or Favorites pane.
pub fn handle_key(ke: KeyEvent, session: &mut SearchSession, view: &mut UiState) -> bool {
    if ke.kind != KeyEventKind::Press {
        return false;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) {
        let exit = handle_ctrl(ke.code, session, view).unwrap_or(false);
        clamp_view(session, view);
        return exit;
    }
    match ke.code {
        KeyCode::Esc => return true,
        KeyCode::Tab => view.focus = view.focus.next(),
        KeyCode::Enter => {
            let recent_pick = (view.focus == Focus::Recent)
                .then(|| view.recent.selected())
                .flatten()
                .and_then(|i| session.recent_searches().get(i).cloned());
            if let Some(term) = recent_pick {
                session.reuse_recent(&term);
                view.recent.select(Some(0));
            } else {
                session.search_now();
            }
            view.results.select(Some(0));
        }
        KeyCode::PageDown => {
            if session.next_page() {
                view.results.select(Some(0));
            }
        }
        KeyCode::PageUp => {
            if session.prev_page() {
                view.results.select(Some(0));
            }
        }
        KeyCode::Up | KeyCode::Down => {
            let delta = if ke.code == KeyCode::Up { -1 } else { 1 };
            let len = match view.focus {
                Focus::Results => session.state().results.len(),
                Focus::Recent => session.recent_searches().len(),
                Focus::Favorites => session.favorites().len(),
            };
            view.move_selection(delta, len);
        }
        KeyCode::Delete => match view.focus {
            Focus::Recent => {
                if let Some(i) = view.recent.selected() {
                    session.remove_recent_at(i);
                }
            }
            Focus::Favorites => {
                if let Some(i) = view.favorites.selected() {
                    session.remove_favorite_at(i);
                }
            }
            Focus::Results => {}
        },
        KeyCode::Backspace => {
            let mut text = session.state().raw_query.clone();
            text.pop();
            session.set_raw_query(text);
        }
        KeyCode::Char(c) => {
            let mut text = session.state().raw_query.clone();
            text.push(c);
            session.set_raw_query(text);
        }
        _ => {}
    }
    clamp_view(session, view);
    false
}
