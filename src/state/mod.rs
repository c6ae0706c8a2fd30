//! Session state and the value types it is built from.

pub mod search_state;
pub mod types;

pub use search_state::{PAGE_SIZE, SearchState};
pub use types::{BookSummary, FavoriteEntry, SearchPage, SearchQuery, SortMode};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// Serializes tests that mutate process-wide environment such as `HOME`.
#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
