use std::collections::HashSet;
use std::sync::Arc;

use super::{KeyValueStore, load_json, remove_best_effort, save_best_effort};
use crate::state::{BookSummary, FavoriteEntry};

/// Storage key for the favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// User-pinned books, most-recently-added first, at most one entry per id.
pub struct Favorites {
    /// Entries in display order.
    entries: Vec<FavoriteEntry>,
    /// Backend written on every mutation.
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Favorites {
    /// What: Load favorites from storage.
    ///
    /// Inputs:
    /// - `store`: Backend holding the `favorites` entry.
    ///
    /// Output:
    /// - Loaded list; empty when the entry is missing or malformed.
    ///
    /// Details:
    /// - Duplicate ids in stored data keep their first (most recent) occurrence.
    /// - Entries without an id are dropped.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut entries: Vec<FavoriteEntry> = load_json(store.as_ref(), FAVORITES_KEY);
        let mut seen = HashSet::new();
        entries.retain(|e| !e.id.trim().is_empty() && seen.insert(e.id.clone()));
        tracing::debug!(count = entries.len(), "[Store] Favorites loaded");
        Self { entries, store }
    }

    /// Entries, most-recently-added first.
    #[must_use]
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a book with `id` is pinned.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// What: Pin or unpin a book.
    ///
    /// Inputs:
    /// - `book`: Search hit to toggle, matched by `id`.
    ///
    /// Output:
    /// - The resulting list, already persisted.
    ///
    /// Details:
    /// - Removes the entry when present; otherwise prepends its projection.
    pub fn toggle(&mut self, book: &BookSummary) -> &[FavoriteEntry] {
        if let Some(pos) = self.entries.iter().position(|e| e.id == book.id) {
            let removed = self.entries.remove(pos);
            tracing::info!(id = %removed.id, "[Store] Favorite removed");
        } else {
            self.entries.insert(0, FavoriteEntry::from(book));
            tracing::info!(id = %book.id, "[Store] Favorite added");
        }
        self.save();
        &self.entries
    }

    /// What: Remove the entry at `index` (display order).
    ///
    /// Output:
    /// - The removed entry, if the index was valid.
    pub fn remove_at(&mut self, index: usize) -> Option<FavoriteEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.save();
        Some(removed)
    }

    /// Overwrite the persisted entry with the in-memory list.
    pub fn save(&self) {
        save_best_effort(self.store.as_ref(), FAVORITES_KEY, &self.entries);
    }

    /// Drop all favorites and the persisted entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        remove_best_effort(self.store.as_ref(), FAVORITES_KEY);
    }
}
