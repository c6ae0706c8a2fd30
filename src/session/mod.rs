//! Search session controller.
//!
//! Owns the [`SearchState`](crate::state::SearchState) and mediates between
//! user input, the remote catalog, and the persisted collections. Timers and
//! lookups run as spawned tasks that report back through [`SessionEvent`]s;
//! the owner feeds those events into [`SearchSession::handle_event`] on the
//! same task that handles user input, so state has a single writer.

mod controller;
mod debounce;
mod sequencer;

use std::time::Duration;

use crate::catalog::CatalogError;
use crate::state::{SearchPage, SearchQuery, SortMode};

pub use controller::SearchSession;
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use sequencer::QuerySequencer;

/// Reports from the session's background tasks.
#[derive(Debug)]
pub enum SessionEvent {
    /// The debounce window elapsed for the commit armed under `ticket`.
    DebounceElapsed {
        /// Arming identifier.
        ticket: u64,
    },
    /// A catalog lookup finished.
    SearchSettled {
        /// Generation the lookup was issued under.
        generation: u64,
        /// Parameters the lookup was issued with.
        query: SearchQuery,
        /// Catalog outcome.
        outcome: Result<SearchPage, CatalogError>,
    },
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Quiescence window before typed input is committed.
    pub debounce: Duration,
    /// Sort mode at startup.
    pub initial_sort: SortMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            initial_sort: SortMode::Relevance,
        }
    }
}
