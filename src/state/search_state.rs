//! The single owned search record and its explicit transitions.

use crate::logic::{page_count, sort_books};
use crate::state::types::{BookSummary, SearchPage, SearchQuery, SortMode};

/// Fixed number of items requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Search-side state owned by the session controller.
///
/// Every mutation goes through one of the transition methods below so that
/// user actions and resolved lookups each map to exactly one named step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Unfiltered live input.
    pub raw_query: String,
    /// Term actually searched; empty means no active search.
    pub committed_term: String,
    /// One-based page number.
    pub page: u32,
    /// Client-side ordering applied to each resolved page.
    pub sort_mode: SortMode,
    /// Current page's results after sorting.
    pub results: Vec<BookSummary>,
    /// Total matches reported for the committed term.
    pub total_count: u64,
    /// Whether the most recent lookup is still outstanding.
    pub loading: bool,
    /// Human-readable message for the last failed lookup.
    pub last_error: Option<String>,
    /// Bumped on every commit so an unchanged tuple can still be re-fetched.
    pub trigger: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SortMode::default())
    }
}

impl SearchState {
    /// What: Create an empty search state.
    ///
    /// Inputs:
    /// - `sort_mode`: Initial ordering (usually from settings).
    ///
    /// Output:
    /// - State on page 1 with no term, no results, and no error.
    #[must_use]
    pub const fn new(sort_mode: SortMode) -> Self {
        Self {
            raw_query: String::new(),
            committed_term: String::new(),
            page: 1,
            sort_mode,
            results: Vec::new(),
            total_count: 0,
            loading: false,
            last_error: None,
            trigger: 0,
        }
    }

    /// Whether a committed term is active.
    #[must_use]
    pub fn has_active_term(&self) -> bool {
        !self.committed_term.is_empty()
    }

    /// What: Commit a term as the active search.
    ///
    /// Inputs:
    /// - `term`: Already-trimmed, non-empty term.
    ///
    /// Output:
    /// - Resets to page 1, stores the term, and bumps the trigger counter.
    pub fn commit_term(&mut self, term: &str) {
        self.page = 1;
        term.clone_into(&mut self.committed_term);
        self.trigger = self.trigger.wrapping_add(1);
    }

    /// What: Drop the active term along with its results.
    ///
    /// Output:
    /// - Empty term, empty results, zero count, no error, not loading.
    pub fn clear_search(&mut self) {
        self.committed_term.clear();
        self.clear_results();
    }

    /// Clear results, count, and error without touching the term or page.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.total_count = 0;
        self.last_error = None;
        self.loading = false;
    }

    /// What: Mark a lookup as issued for the current parameters.
    ///
    /// Output:
    /// - The query to send; `loading` set and `last_error` cleared.
    pub fn begin_request(&mut self) -> SearchQuery {
        self.loading = true;
        self.last_error = None;
        SearchQuery {
            title: self.committed_term.clone(),
            page: self.page,
            page_size: PAGE_SIZE,
        }
    }

    /// What: Apply a successfully resolved page.
    ///
    /// Inputs:
    /// - `page`: Catalog response for the most recent lookup.
    ///
    /// Output:
    /// - `total_count` replaced, `results` replaced with the sorted items, loading cleared.
    pub fn apply_page(&mut self, page: &SearchPage) {
        self.total_count = page.total_count;
        self.results = sort_books(&page.items, self.sort_mode);
        self.last_error = None;
        self.loading = false;
    }

    /// What: Record a failed lookup.
    ///
    /// Inputs:
    /// - `message`: Human-readable failure text.
    ///
    /// Output:
    /// - `last_error` set, loading cleared; previous results and count stay visible.
    pub fn apply_failure(&mut self, message: String) {
        self.last_error = Some(message);
        self.loading = false;
    }

    /// Number of pages available for the current total.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        page_count(self.total_count, PAGE_SIZE)
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn can_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// What: Move to the next page when one exists.
    ///
    /// Output:
    /// - `true` when the page changed; `false` at the last page (no-op).
    pub fn advance_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// What: Move to the previous page when one exists.
    ///
    /// Output:
    /// - `true` when the page changed; `false` on page 1 (no-op).
    pub fn retreat_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, year: Option<i32>) -> BookSummary {
        BookSummary {
            id: id.to_string(),
            title: id.to_string(),
            first_publish_year: year,
            ..BookSummary::default()
        }
    }

    #[test]
    /// What: Fresh state starts on page 1 with nothing active.
    fn default_state_is_idle_on_first_page() {
        let st = SearchState::default();
        assert_eq!(st.page, 1);
        assert!(!st.has_active_term());
        assert!(!st.loading);
        assert!(st.results.is_empty());
        assert_eq!(st.last_error, None);
    }

    #[test]
    /// What: Committing a term resets the page and bumps the trigger even for the same term.
    ///
    /// Inputs:
    /// - State on page 3 with term "dune"; commit "dune" again.
    ///
    /// Output:
    /// - Page 1, term unchanged, trigger advanced by one.
    fn commit_resets_page_and_bumps_trigger() {
        let mut st = SearchState::default();
        st.commit_term("dune");
        st.page = 3;
        let before = st.trigger;
        st.commit_term("dune");
        assert_eq!(st.page, 1);
        assert_eq!(st.committed_term, "dune");
        assert_eq!(st.trigger, before + 1);
    }

    #[test]
    /// What: Resolved page applies the active sort mode.
    ///
    /// Inputs:
    /// - `YearDescending`; items A(1965), B(2000); total 2.
    ///
    /// Output:
    /// - Results ordered B, A; total 2; loading cleared.
    fn apply_page_sorts_by_mode() {
        let mut st = SearchState::new(SortMode::YearDescending);
        st.commit_term("dune");
        let _ = st.begin_request();
        st.apply_page(&SearchPage {
            total_count: 2,
            items: vec![book("A", Some(1965)), book("B", Some(2000))],
        });
        let ids: Vec<&str> = st.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(st.total_count, 2);
        assert!(!st.loading);
    }

    #[test]
    /// What: A failure keeps the last-known results and count.
    fn apply_failure_keeps_previous_results() {
        let mut st = SearchState::default();
        st.commit_term("dune");
        st.apply_page(&SearchPage {
            total_count: 1,
            items: vec![book("A", None)],
        });
        let _ = st.begin_request();
        st.apply_failure("network down".into());
        assert_eq!(st.results.len(), 1);
        assert_eq!(st.total_count, 1);
        assert_eq!(st.last_error.as_deref(), Some("network down"));
        assert!(!st.loading);
    }

    #[test]
    /// What: Page movement honours both bounds.
    ///
    /// Inputs:
    /// - Total 41 (three pages of 20).
    ///
    /// Output:
    /// - Prev is a no-op on page 1; next stops at page 3.
    fn page_bounds_are_enforced() {
        let mut st = SearchState::default();
        st.total_count = 41;
        assert!(!st.retreat_page());
        assert!(st.advance_page());
        assert!(st.advance_page());
        assert_eq!(st.page, 3);
        assert!(!st.advance_page());
        assert_eq!(st.page, 3);
        assert!(st.retreat_page());
        assert_eq!(st.page, 2);
    }

    #[test]
    /// What: With zero matches there is no next page at all.
    fn no_next_page_without_results() {
        let mut st = SearchState::default();
        assert_eq!(st.total_pages(), 0);
        assert!(!st.advance_page());
        assert_eq!(st.page, 1);
    }
}
