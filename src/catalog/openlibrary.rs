//! Open Library `search.json` client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{Catalog, CatalogError, Result};
use crate::state::{BookSummary, SearchPage, SearchQuery};
use crate::util::percent_encode;

/// Default search endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org/search.json";

/// Fields requested from the search endpoint; everything else is left out of the payload.
const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,cover_i,isbn,edition_count,subject,cover_edition_key";

/// Raw response envelope of `search.json`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound", default)]
    num_found: Option<u64>,
    #[serde(default)]
    docs: Option<Vec<SearchDoc>>,
}

/// One raw document in the response.
#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<Vec<String>>,
    #[serde(default)]
    first_publish_year: Option<i32>,
    #[serde(default)]
    cover_i: Option<i64>,
    #[serde(default)]
    isbn: Option<Vec<String>>,
    #[serde(default)]
    edition_count: Option<u32>,
    #[serde(default)]
    subject: Option<Vec<String>>,
    #[serde(default)]
    cover_edition_key: Option<String>,
}

impl SearchDoc {
    /// Convert into a summary; `None` when the document has no catalog key.
    fn into_summary(self) -> Option<BookSummary> {
        let id = self.key.filter(|k| !k.trim().is_empty())?;
        Some(BookSummary {
            id,
            title: self.title.unwrap_or_default(),
            authors: self.author_name.unwrap_or_default(),
            first_publish_year: self.first_publish_year,
            cover_image_id: self.cover_i,
            isbns: self.isbn,
            edition_count: self.edition_count,
            subjects: self.subject,
            cover_edition_key: self.cover_edition_key,
        })
    }
}

/// HTTP client for the Open Library search API.
#[derive(Debug, Clone)]
pub struct OpenLibraryCatalog {
    /// Shared connection pool.
    client: reqwest::Client,
    /// Search endpoint, e.g. [`DEFAULT_CATALOG_URL`].
    endpoint: String,
}

impl OpenLibraryCatalog {
    /// What: Create a client for the given search endpoint.
    ///
    /// Inputs:
    /// - `endpoint`: Full URL of `search.json` (query string appended per request).
    ///
    /// Output:
    /// - Configured client.
    ///
    /// # Errors
    /// - `CatalogError::Network` when the HTTP client cannot be constructed (e.g. TLS backend init).
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("shelfscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// What: Build the request URL for a query.
///
/// Inputs:
/// - `endpoint`: Search endpoint, with or without an existing query string.
/// - `query`: Title, page, and page size.
///
/// Output:
/// - URL string with percent-encoded title and the fixed field list.
#[must_use]
pub fn build_search_url(endpoint: &str, query: &SearchQuery) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{sep}title={}&page={}&limit={}&fields={}",
        percent_encode(query.title.trim()),
        query.page,
        query.page_size,
        SEARCH_FIELDS
    )
}

/// What: Decode a `search.json` body into a page.
///
/// Inputs:
/// - `body`: Raw response text.
///
/// Output:
/// - `SearchPage` with total defaulting to 0 and items defaulting to empty.
///
/// # Errors
/// - `CatalogError::Decode` when the body is not a JSON object of the expected shape.
///
/// Details:
/// - Documents without a key cannot be favorited or deduplicated and are skipped.
pub fn parse_search_response(body: &str) -> Result<SearchPage> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    let docs = parsed.docs.unwrap_or_default();
    let raw_len = docs.len();
    let items: Vec<BookSummary> = docs
        .into_iter()
        .filter_map(SearchDoc::into_summary)
        .collect();
    if items.len() != raw_len {
        debug!(
            skipped = raw_len - items.len(),
            "[Catalog] Skipped documents without a key"
        );
    }
    Ok(SearchPage {
        total_count: parsed.num_found.unwrap_or(0),
        items,
    })
}

#[async_trait]
impl Catalog for OpenLibraryCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let url = build_search_url(&self.endpoint, query);
        debug!(url = %url, "[Catalog] Requesting search page");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            warn!(
                status = status.as_u16(),
                preview = %preview,
                "[Catalog] Search returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }
        let page = parse_search_response(&body)?;
        info!(
            term = %query.title,
            page = query.page,
            total = page.total_count,
            items = page.items.len(),
            "[Catalog] Search page received"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(title: &str, page: u32) -> SearchQuery {
        SearchQuery {
            title: title.to_string(),
            page,
            page_size: 20,
        }
    }

    #[test]
    /// What: Request URL carries the encoded title, page, limit, and field list.
    fn search_url_encodes_parameters() {
        let url = build_search_url(DEFAULT_CATALOG_URL, &query(" the hobbit ", 2));
        assert!(url.starts_with("https://openlibrary.org/search.json?title=the%20hobbit&"));
        assert!(url.contains("&page=2&limit=20&fields=key,title,"));
    }

    #[test]
    /// What: An endpoint that already has a query string gets `&` appended instead of `?`.
    fn search_url_appends_to_existing_query() {
        let url = build_search_url("http://localhost:9000/search.json?lang=en", &query("x", 1));
        assert!(url.starts_with("http://localhost:9000/search.json?lang=en&title=x&"));
    }

    #[test]
    /// What: Full documents map onto summaries field by field.
    fn parses_full_document() {
        let body = r#"{
            "numFound": 629,
            "docs": [{
                "key": "/works/OL893415W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "cover_i": 11481354,
                "isbn": ["9780441013593"],
                "edition_count": 120,
                "subject": ["Science fiction"],
                "cover_edition_key": "OL26242482M"
            }]
        }"#;
        let page = parse_search_response(body).expect("valid body");
        assert_eq!(page.total_count, 629);
        assert_eq!(page.items.len(), 1);
        let b = &page.items[0];
        assert_eq!(b.id, "/works/OL893415W");
        assert_eq!(b.authors, vec!["Frank Herbert".to_string()]);
        assert_eq!(b.first_publish_year, Some(1965));
        assert_eq!(b.cover_image_id, Some(11_481_354));
        assert_eq!(b.edition_count, Some(120));
        assert_eq!(b.cover_edition_key.as_deref(), Some("OL26242482M"));
    }

    #[test]
    /// What: Missing total and docs default to zero and empty.
    fn missing_fields_default() {
        let page = parse_search_response("{}").expect("empty object is valid");
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    /// What: Keyless documents are dropped while the rest survive in order.
    fn skips_documents_without_key() {
        let body = r#"{"numFound": 3, "docs": [
            {"key": "/works/A", "title": "A"},
            {"title": "orphan"},
            {"key": "/works/B"}
        ]}"#;
        let page = parse_search_response(body).expect("valid body");
        let ids: Vec<&str> = page.items.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["/works/A", "/works/B"]);
        assert_eq!(page.items[1].title, "");
        assert_eq!(page.total_count, 3);
    }

    #[test]
    /// What: Non-JSON bodies surface as decode errors.
    fn malformed_body_is_decode_error() {
        let err = parse_search_response("<html>busy</html>").expect_err("html is not json");
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
