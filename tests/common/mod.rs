//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shelfscout::catalog::{Catalog, CatalogError};
use shelfscout::session::{SearchSession, SessionConfig, SessionEvent};
use shelfscout::state::{BookSummary, SearchPage, SearchQuery};
use shelfscout::store::KeyValueStore;
use tokio::sync::mpsc::UnboundedReceiver;

/// Catalog fake answering from a `(title, page)` script and recording calls.
#[derive(Default)]
pub struct FakeCatalog {
    /// Queries received, in order.
    calls: Mutex<Vec<SearchQuery>>,
    /// Scripted replies; unscripted queries get an empty page.
    script: Mutex<HashMap<(String, u32), Result<SearchPage, CatalogError>>>,
}

impl FakeCatalog {
    pub fn respond(&self, title: &str, page: u32, reply: Result<SearchPage, CatalogError>) {
        self.script
            .lock()
            .expect("script lock")
            .insert((title.to_string(), page), reply);
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError> {
        self.calls.lock().expect("calls lock").push(query.clone());
        self.script
            .lock()
            .expect("script lock")
            .get(&(query.title.clone(), query.page))
            .cloned()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }
}

pub fn book(id: &str, year: Option<i32>) -> BookSummary {
    BookSummary {
        id: id.to_string(),
        title: format!("Title {id}"),
        authors: vec![format!("Author {id}")],
        first_publish_year: year,
        ..BookSummary::default()
    }
}

pub fn open_session(
    catalog: Arc<FakeCatalog>,
    store: Arc<dyn KeyValueStore>,
) -> (SearchSession, UnboundedReceiver<SessionEvent>) {
    SearchSession::new(catalog, store, SessionConfig::default())
}

/// Receive and apply the next session report.
pub async fn pump(session: &mut SearchSession, rx: &mut UnboundedReceiver<SessionEvent>) -> bool {
    let ev = rx.recv().await.expect("session channel open");
    session.handle_event(ev)
}
