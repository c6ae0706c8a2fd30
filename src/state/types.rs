//! Core value types shared by the catalog, store, session, and UI layers.

use serde::{Deserialize, Serialize};

/// One search hit as reported by the remote catalog.
///
/// `id` (the catalog work key, e.g. `/works/OL45804W`) is the sole identity
/// used for deduplication and favorite matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Catalog key, unique per work.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Author names in catalog order.
    pub authors: Vec<String>,
    /// Year of first publication, when known.
    pub first_publish_year: Option<i32>,
    /// Numeric cover image identifier.
    pub cover_image_id: Option<i64>,
    /// Known ISBNs in catalog order.
    pub isbns: Option<Vec<String>>,
    /// Number of editions the catalog knows about.
    pub edition_count: Option<u32>,
    /// Subject headings.
    pub subjects: Option<Vec<String>>,
    /// Edition identifier used as the last-resort cover source.
    pub cover_edition_key: Option<String>,
}

/// Persisted projection of a [`BookSummary`] kept in the favorites list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Catalog key, unique within the favorites list.
    #[serde(default)]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Author names.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Year of first publication, when known.
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    /// Numeric cover image identifier.
    #[serde(default)]
    pub cover_image_id: Option<i64>,
}

impl From<&BookSummary> for FavoriteEntry {
    fn from(book: &BookSummary) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            authors: book.authors.clone(),
            first_publish_year: book.first_publish_year,
            cover_image_id: book.cover_image_id,
        }
    }
}

/// Client-side ordering applied to each resolved results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Keep the order the catalog returned.
    #[default]
    Relevance,
    /// Oldest first publication year first; unknown years count as 0.
    YearAscending,
    /// Newest first publication year first; unknown years count as 0.
    YearDescending,
}

impl SortMode {
    /// Return the string key used in settings files for this sort mode.
    ///
    /// Inputs: none
    ///
    /// Output: Static config key string.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::YearAscending => "year_asc",
            Self::YearDescending => "year_desc",
        }
    }

    /// Parse a sort mode from its settings key or aliases.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(SortMode)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "relevance" | "default" | "best_matches" => Some(Self::Relevance),
            "year_asc" | "year_ascending" | "oldest" => Some(Self::YearAscending),
            "year_desc" | "year_descending" | "newest" => Some(Self::YearDescending),
            _ => None,
        }
    }

    /// Next mode in the UI cycle order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Relevance => Self::YearAscending,
            Self::YearAscending => Self::YearDescending,
            Self::YearDescending => Self::Relevance,
        }
    }

    /// Short label shown in the results title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::YearAscending => "year ↑",
            Self::YearDescending => "year ↓",
        }
    }
}

/// Parameters of one remote lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    /// Title text sent to the catalog.
    pub title: String,
    /// One-based page number.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

/// One page of results as reported by the catalog, before client-side sorting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Total matches for the term across all pages.
    pub total_count: u64,
    /// Items on this page in catalog order.
    pub items: Vec<BookSummary>,
}
