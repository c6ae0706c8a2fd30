use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::{KeyValueStore, load_json, remove_best_effort, save_best_effort};

/// Storage key for the recent searches list.
pub const RECENT_KEY: &str = "recent_searches";

/// Maximum number of recent searches to retain (most-recent-first).
pub const RECENT_CAPACITY: usize = 8;

/// What: Provide the non-zero capacity used by the LRU recent cache.
///
/// Inputs: None.
///
/// Output:
/// - Non-zero capacity for the recent LRU cache.
///
/// Details:
/// - Uses a const unchecked constructor because the capacity constant is guaranteed
///   to be greater than zero.
#[must_use]
pub const fn recent_capacity() -> NonZeroUsize {
    // SAFETY: `RECENT_CAPACITY` is a non-zero constant.
    unsafe { NonZeroUsize::new_unchecked(RECENT_CAPACITY) }
}

/// Bounded, deduplicated history of committed terms.
///
/// Terms are matched exactly (case-sensitive); recording an existing term
/// moves it to the front instead of duplicating it.
pub struct RecentSearches {
    /// Terms keyed by themselves; LRU order is display order.
    terms: LruCache<String, ()>,
    /// Backend written on every mutation.
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for RecentSearches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentSearches")
            .field("terms", &self.values())
            .finish_non_exhaustive()
    }
}

impl RecentSearches {
    /// What: Load recent searches from storage.
    ///
    /// Inputs:
    /// - `store`: Backend holding the `recent_searches` entry.
    ///
    /// Output:
    /// - History capped at capacity; empty when the entry is missing or malformed.
    ///
    /// Details:
    /// - Stored data is most-recent-first; inserting from the oldest end keeps that order and
    ///   collapses duplicates onto their most recent position.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items: Vec<String> = load_json(store.as_ref(), RECENT_KEY);
        let mut terms = LruCache::new(recent_capacity());
        for value in items.iter().rev() {
            if !value.trim().is_empty() {
                terms.put(value.clone(), ());
            }
        }
        tracing::debug!(count = terms.len(), "[Store] Recent searches loaded");
        Self { terms, store }
    }

    /// What: Return recent searches in most-recent-first order.
    ///
    /// Output:
    /// - Vector of recent search strings ordered from most to least recent.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.terms.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Term at a position in most-recent-first order.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<String> {
        self.terms.iter().nth(index).map(|(k, _)| k.clone())
    }

    /// Number of stored terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// What: Record a term as the most recent search.
    ///
    /// Inputs:
    /// - `term`: Committed search term; empty terms are ignored.
    ///
    /// Output:
    /// - The resulting list (most-recent-first), already persisted.
    ///
    /// Details:
    /// - An existing occurrence moves to the front; the oldest term is evicted past capacity.
    pub fn record(&mut self, term: &str) -> Vec<String> {
        if term.is_empty() {
            return self.values();
        }
        self.terms.put(term.to_string(), ());
        let values = self.values();
        save_best_effort(self.store.as_ref(), RECENT_KEY, &values);
        values
    }

    /// What: Remove the term at `index` (most-recent-first).
    ///
    /// Output:
    /// - The removed term, if the index was valid.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        let key = self.value_at(index)?;
        self.terms.pop(&key)?;
        save_best_effort(self.store.as_ref(), RECENT_KEY, &self.values());
        Some(key)
    }

    /// Drop the history and the persisted entry.
    pub fn clear(&mut self) {
        self.terms.clear();
        remove_best_effort(self.store.as_ref(), RECENT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn empty() -> (Arc<MemoryStore>, RecentSearches) {
        let mem = Arc::new(MemoryStore::new());
        let store: Arc<dyn KeyValueStore> = mem.clone();
        (mem, RecentSearches::load(store))
    }

    #[test]
    /// What: Whitespace-only stored terms are skipped on load.
    ///
    /// Inputs:
    /// - Stored list `["  ", "dune", ""]`.
    ///
    /// Output:
    /// - Loaded values are exactly `["dune"]`.
    fn load_skips_blank_terms() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
            RECENT_KEY,
            r#"["  ","dune",""]"#,
        )]));
        let recent = RecentSearches::load(store);
        assert_eq!(recent.values(), vec!["dune".to_string()]);
    }

    #[test]
    /// What: Recording the same term twice yields one front entry, not a duplicate.
    fn record_is_idempotent_in_content() {
        let (_mem, mut recent) = empty();
        recent.record("dune");
        let once = recent.values();
        let twice = recent.record("dune");
        assert_eq!(once, twice);
        assert_eq!(twice, vec!["dune".to_string()]);
    }

    #[test]
    /// What: Re-recording an older term moves it to the front; matching is case-sensitive.
    ///
    /// Inputs:
    /// - Record "dune", "emma", "Dune", then "dune" again.
    ///
    /// Output:
    /// - Order dune, Dune, emma.
    fn record_moves_existing_to_front() {
        let (_mem, mut recent) = empty();
        recent.record("dune");
        recent.record("emma");
        recent.record("Dune");
        let values = recent.record("dune");
        assert_eq!(values, vec!["dune", "Dune", "emma"]);
    }

    #[test]
    /// What: History never exceeds capacity and evicts the oldest term.
    fn record_truncates_to_capacity() {
        let (mem, mut recent) = empty();
        for i in 0..(RECENT_CAPACITY + 3) {
            recent.record(&format!("term{i}"));
        }
        let values = recent.values();
        assert_eq!(values.len(), RECENT_CAPACITY);
        assert_eq!(values.first().map(String::as_str), Some("term10"));
        assert!(!values.iter().any(|v| v == "term0" || v == "term2"));

        let persisted: Vec<String> = crate::store::load_json(mem.as_ref(), RECENT_KEY);
        assert_eq!(persisted, values);
    }

    #[test]
    /// What: Loading normalizes stored data: duplicates collapse, order is kept, length is capped.
    ///
    /// Inputs:
    /// - Stored list of 11 terms where "a" appears at positions 0 and 2.
    ///
    /// Output:
    /// - "a" once at the front, "b" second, total length 8.
    fn load_normalizes_stored_list() {
        let stored = r#"["a","b","a","c","d","e","f","g","h","i","j"]"#;
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(RECENT_KEY, stored)]));
        let recent = RecentSearches::load(store);
        let values = recent.values();
        assert_eq!(values.len(), RECENT_CAPACITY);
        assert_eq!(&values[..3], &["a", "b", "c"]);
    }

    #[test]
    /// What: Malformed stored data loads as an empty history.
    fn load_malformed_is_empty() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(RECENT_KEY, "{\"oops\": true}")]));
        assert!(RecentSearches::load(store).is_empty());
    }

    #[test]
    fn clear_and_remove_at() {
        let (mem, mut recent) = empty();
        recent.record("a");
        recent.record("b");
        assert_eq!(recent.remove_at(0).as_deref(), Some("b"));
        assert_eq!(recent.values(), vec!["a"]);
        assert!(recent.remove_at(5).is_none());
        recent.clear();
        assert!(recent.is_empty());
        assert_eq!(mem.read(RECENT_KEY).expect("read"), None);
    }
}
