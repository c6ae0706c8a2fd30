//! Remote catalog lookups.
//!
//! The session only depends on the [`Catalog`] trait; the Open Library client
//! is the production implementation and tests substitute scripted fakes.

mod error;
mod openlibrary;

use async_trait::async_trait;

use crate::state::{SearchPage, SearchQuery};

pub use error::CatalogError;
pub use openlibrary::{
    DEFAULT_CATALOG_URL, OpenLibraryCatalog, build_search_url, parse_search_response,
};

/// Result type alias for catalog lookups.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// A source of paged title search results.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// What: Look up one page of results for a title query.
    ///
    /// Inputs:
    /// - `query`: Title text, one-based page, and page size.
    ///
    /// Output:
    /// - `Ok(SearchPage)` with the reported total and the page's items.
    ///
    /// # Errors
    /// - `CatalogError` on transport failure, non-success status, or malformed body.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;
}
