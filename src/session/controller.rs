use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{Debouncer, QuerySequencer, SessionConfig, SessionEvent};
use crate::catalog::{Catalog, CatalogError};
use crate::state::{BookSummary, FavoriteEntry, SearchPage, SearchState, SortMode};
use crate::store::{Favorites, KeyValueStore, RecentSearches, ThemePreference};

/// The search session controller.
///
/// Every user action is a method here, and every background report goes
/// through [`SearchSession::handle_event`]. Parameter changes that affect
/// the lookup tuple (term, page, sort, trigger) re-run the sequencer
/// immediately, which supersedes whatever lookup was still running.
pub struct SearchSession {
    /// Search-side state.
    state: SearchState,
    /// Persisted favorites.
    favorites: Favorites,
    /// Persisted recent searches.
    recent: RecentSearches,
    /// Persisted palette choice.
    theme: ThemePreference,
    /// Commit timer for typed input.
    debouncer: Debouncer,
    /// Lookup issuing and staleness checks.
    sequencer: QuerySequencer,
    /// Channel handed to timers and lookups.
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    /// Set once disposed; all later input and reports are ignored.
    disposed: bool,
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &self.state)
            .field("favorites", &self.favorites)
            .field("recent", &self.recent)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl SearchSession {
    /// What: Start a session, loading the persisted collections.
    ///
    /// Inputs:
    /// - `catalog`: Remote lookup collaborator.
    /// - `store`: Backend for favorites, recent searches, and theme.
    /// - `config`: Debounce window and initial sort.
    ///
    /// Output:
    /// - The session and the receiver its background tasks report into.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = Self {
            state: SearchState::new(config.initial_sort),
            favorites: Favorites::load(Arc::clone(&store)),
            recent: RecentSearches::load(Arc::clone(&store)),
            theme: ThemePreference::load(store),
            debouncer: Debouncer::new(config.debounce),
            sequencer: QuerySequencer::new(catalog),
            events_tx,
            disposed: false,
        };
        info!(
            favorites = session.favorites.len(),
            recent = session.recent.len(),
            debounce_ms = u64::try_from(session.debouncer.window().as_millis()).unwrap_or(u64::MAX),
            "[Session] Started"
        );
        (session, events_rx)
    }

    /// Current search state.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Favorites, most-recently-added first.
    #[must_use]
    pub fn favorites(&self) -> &[FavoriteEntry] {
        self.favorites.entries()
    }

    /// Whether a book id is pinned.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Recent searches, most recent first.
    #[must_use]
    pub fn recent_searches(&self) -> Vec<String> {
        self.recent.values()
    }

    /// Whether the light palette is selected.
    #[must_use]
    pub const fn is_light_theme(&self) -> bool {
        self.theme.is_light()
    }

    /// Whether a typed commit is still waiting for input to pause.
    #[must_use]
    pub const fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether the session was disposed.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// What: Feed a change of the live input.
    ///
    /// Inputs:
    /// - `text`: New raw input value.
    ///
    /// Details:
    /// - Non-empty (trimmed) input re-arms the debounced commit.
    /// - Empty input disarms it and clears the active search immediately, without a lookup.
    pub fn set_raw_query(&mut self, text: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.state.raw_query = text.into();
        let trimmed = self.state.raw_query.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.clear_active_search();
            return;
        }
        let term = trimmed.to_string();
        self.debouncer.schedule(term, &self.events_tx);
    }

    /// What: Commit the current input now, skipping the debounce window.
    ///
    /// Details:
    /// - Bumps the trigger even when the term is unchanged, so it doubles as "retry".
    pub fn search_now(&mut self) {
        if self.disposed {
            return;
        }
        self.debouncer.cancel();
        let term = self.state.raw_query.trim().to_string();
        if term.is_empty() {
            self.clear_active_search();
            return;
        }
        self.commit(&term);
    }

    /// What: Search again for a term from the recent list.
    ///
    /// Inputs:
    /// - `term`: Term to reuse; blank terms are ignored.
    ///
    /// Details:
    /// - Replaces the input, records the term as most recent, and commits it immediately.
    pub fn reuse_recent(&mut self, term: &str) {
        if self.disposed {
            return;
        }
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.debouncer.cancel();
        self.state.raw_query = term.to_string();
        self.recent.record(term);
        self.commit(term);
    }

    /// What: Go to the next results page.
    ///
    /// Output:
    /// - `false` (no-op) when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.disposed || !self.state.advance_page() {
            return false;
        }
        self.run_query();
        true
    }

    /// What: Go to the previous results page.
    ///
    /// Output:
    /// - `false` (no-op) on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.disposed || !self.state.retreat_page() {
            return false;
        }
        self.run_query();
        true
    }

    /// What: Change the client-side ordering.
    ///
    /// Inputs:
    /// - `mode`: New sort mode; choosing the current one does nothing.
    ///
    /// Details:
    /// - Keeps the current page and re-runs the lookup for it.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if self.disposed || self.state.sort_mode == mode {
            return;
        }
        self.state.sort_mode = mode;
        self.run_query();
    }

    /// Advance to the next sort mode in cycle order.
    pub fn cycle_sort_mode(&mut self) -> SortMode {
        let next = self.state.sort_mode.next();
        self.set_sort_mode(next);
        self.state.sort_mode
    }

    /// What: Pin or unpin a book.
    ///
    /// Output:
    /// - `true` when the book is a favorite afterwards.
    pub fn toggle_favorite(&mut self, book: &BookSummary) -> bool {
        self.favorites.toggle(book);
        self.favorites.contains(&book.id)
    }

    /// What: Pin or unpin the result at `index`.
    ///
    /// Output:
    /// - `Some(is_favorite_now)`, or `None` when `index` is out of range.
    pub fn toggle_favorite_at(&mut self, index: usize) -> Option<bool> {
        let book = self.state.results.get(index)?.clone();
        Some(self.toggle_favorite(&book))
    }

    /// Unpin the favorite at `index` (display order).
    pub fn remove_favorite_at(&mut self, index: usize) -> Option<FavoriteEntry> {
        self.favorites.remove_at(index)
    }

    /// Drop all favorites, including the persisted entry.
    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }

    /// Drop one recent term (most-recent-first index).
    pub fn remove_recent_at(&mut self, index: usize) -> Option<String> {
        self.recent.remove_at(index)
    }

    /// Drop the recent list, including the persisted entry.
    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }

    /// Flip the palette and persist it; returns whether light is now selected.
    pub fn toggle_theme(&mut self) -> bool {
        self.theme.toggle()
    }

    /// What: Apply a report from a background task.
    ///
    /// Inputs:
    /// - `event`: Debounce or lookup report.
    ///
    /// Output:
    /// - `true` when state changed and observers should refresh.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        if self.disposed {
            return false;
        }
        match event {
            SessionEvent::DebounceElapsed { ticket } => {
                let Some(term) = self.debouncer.take_if_current(ticket) else {
                    debug!(ticket, "[Debounce] Ignoring stale timer report");
                    return false;
                };
                self.commit(&term);
                true
            }
            SessionEvent::SearchSettled {
                generation,
                outcome,
                ..
            } => self.settle(generation, outcome),
        }
    }

    /// What: Tear the session down.
    ///
    /// Details:
    /// - Disarms the debounce timer and cancels the running lookup; nothing reports afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.debouncer.cancel();
        self.sequencer.invalidate();
        self.disposed = true;
        info!("[Session] Disposed");
    }

    /// Make `term` the committed term and run the lookup.
    fn commit(&mut self, term: &str) {
        debug!(term, "[Session] Committing term");
        self.state.commit_term(term);
        self.run_query();
    }

    /// Cancel any lookup and drop the active term and its results.
    fn clear_active_search(&mut self) {
        self.sequencer.invalidate();
        self.state.clear_search();
    }

    /// Re-evaluate the lookup tuple: clear on empty term, otherwise issue a new lookup.
    fn run_query(&mut self) {
        if !self.state.has_active_term() {
            self.sequencer.invalidate();
            self.state.clear_results();
            return;
        }
        let query = self.state.begin_request();
        self.sequencer.issue(query, &self.events_tx);
    }

    /// Apply a lookup outcome if it belongs to the awaited generation.
    fn settle(&mut self, generation: u64, outcome: Result<SearchPage, CatalogError>) -> bool {
        if !self.sequencer.settle(generation) {
            return false;
        }
        match outcome {
            Ok(page) => {
                self.state.apply_page(&page);
                let term = self.state.committed_term.clone();
                self.recent.record(&term);
                debug!(
                    generation,
                    total = self.state.total_count,
                    shown = self.state.results.len(),
                    "[Session] Results applied"
                );
            }
            Err(err) => {
                warn!(generation, error = %err, "[Session] Lookup failed");
                self.state.apply_failure(err.user_message());
            }
        }
        true
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
