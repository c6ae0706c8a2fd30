//! UI-local state: focus, selections, and cover settings.

use ratatui::widgets::ListState;

use crate::logic::cover::{CoverSize, DEFAULT_COVERS_URL};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Results list (typing still edits the query).
    #[default]
    Results,
    /// Recent searches pane.
    Recent,
    /// Favorites pane.
    Favorites,
}

impl Focus {
    /// Next pane in `Tab` order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Results => Self::Recent,
            Self::Recent => Self::Favorites,
            Self::Favorites => Self::Results,
        }
    }
}

/// Presentation state that the session does not own.
#[derive(Debug, Default)]
pub struct UiState {
    /// Focused pane.
    pub focus: Focus,
    /// Highlight in the results list.
    pub results: ListState,
    /// Highlight in the recent pane.
    pub recent: ListState,
    /// Highlight in the favorites pane.
    pub favorites: ListState,
    /// Cover service base URL.
    pub covers_url: String,
    /// Cover size used for detail links.
    pub cover_size: CoverSize,
}

impl UiState {
    /// What: Create UI state for the given cover settings.
    ///
    /// Inputs:
    /// - `covers_url`: Cover service base; empty selects the default.
    /// - `cover_size`: Size suffix for cover links.
    #[must_use]
    pub fn new(covers_url: impl Into<String>, cover_size: CoverSize) -> Self {
        let mut covers_url = covers_url.into();
        if covers_url.trim().is_empty() {
            covers_url = DEFAULT_COVERS_URL.to_string();
        }
        Self {
            covers_url,
            cover_size,
            ..Self::default()
        }
    }

    /// Selection list for the focused pane.
    pub const fn focused_list(&mut self) -> &mut ListState {
        match self.focus {
            Focus::Results => &mut self.results,
            Focus::Recent => &mut self.recent,
            Focus::Favorites => &mut self.favorites,
        }
    }

    /// What: Move the focused selection by `delta`, clamped to `len`.
    ///
    /// Inputs:
    /// - `delta`: Signed step (e.g., -1 for up).
    /// - `len`: Number of rows in the focused pane.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        let list = self.focused_list();
        if len == 0 {
            list.select(None);
            return;
        }
        let current = list.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        list.select(Some(next));
    }

    /// What: Keep every selection inside its list after the lists changed.
    ///
    /// Inputs:
    /// - `results`, `recent`, `favorites`: Current row counts.
    pub fn clamp(&mut self, results: usize, recent: usize, favorites: usize) {
        for (list, len) in [
            (&mut self.results, results),
            (&mut self.recent, recent),
            (&mut self.favorites, favorites),
        ] {
            let next = match (list.selected(), len) {
                (_, 0) => None,
                (None, _) => Some(0),
                (Some(i), n) => Some(i.min(n - 1)),
            };
            list.select(next);
        }
    }
}
