//! Cover image URL derivation.

use crate::state::{BookSummary, FavoriteEntry};
use crate::util::percent_encode;

/// Default base for the Open Library covers service.
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org/b";

/// Cover image size accepted by the covers service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    /// Thumbnail.
    Small,
    /// List-sized image.
    #[default]
    Medium,
    /// Full-size image.
    Large,
}

impl CoverSize {
    /// Single-letter suffix used by the covers service.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    /// What: Parse a size from a settings value.
    ///
    /// Inputs: `s` such as `S`, `medium`, `large` (case-insensitive).
    ///
    /// Output: `Some(CoverSize)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "small" => Some(Self::Small),
            "m" | "medium" => Some(Self::Medium),
            "l" | "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// What: Build the cover URL for a book using the default covers service.
///
/// Inputs:
/// - `book`: Search hit to derive the cover for
/// - `size`: Requested image size
///
/// Output:
/// - `Some(url)` from the first available source; `None` when the book has none.
#[must_use]
pub fn cover_image_url(book: &BookSummary, size: CoverSize) -> Option<String> {
    cover_image_url_from(DEFAULT_COVERS_URL, book, size)
}

/// What: Build the cover URL for a book against a given covers base URL.
///
/// Inputs:
/// - `base`: Covers service base, e.g. `https://covers.openlibrary.org/b`
/// - `book`: Search hit to derive the cover for
/// - `size`: Requested image size
///
/// Output:
/// - `Some(url)` or `None` when no cover source is present.
///
/// Details:
/// - Precedence: cover image id, then first ISBN, then cover edition key. The first
///   present source wins; blank ISBN/edition strings count as absent.
#[must_use]
pub fn cover_image_url_from(base: &str, book: &BookSummary, size: CoverSize) -> Option<String> {
    let base = base.trim_end_matches('/');
    let suffix = size.suffix();
    if let Some(id) = book.cover_image_id {
        return Some(format!("{base}/id/{id}-{suffix}.jpg"));
    }
    if let Some(isbn) = book
        .isbns
        .as_ref()
        .and_then(|list| list.first())
        .filter(|s| !s.trim().is_empty())
    {
        return Some(format!(
            "{base}/isbn/{}-{suffix}.jpg",
            percent_encode(isbn.trim())
        ));
    }
    book.cover_edition_key
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|olid| format!("{base}/olid/{}-{suffix}.jpg", percent_encode(olid.trim())))
}

/// Cover URL for a favorite, which only keeps the cover image id.
#[must_use]
pub fn favorite_cover_url(base: &str, entry: &FavoriteEntry, size: CoverSize) -> Option<String> {
    entry.cover_image_id.map(|id| {
        format!(
            "{}/id/{id}-{}.jpg",
            base.trim_end_matches('/'),
            size.suffix()
        )
    })
}
