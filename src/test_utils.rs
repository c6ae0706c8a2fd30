//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, oneshot};

use crate::catalog::{Catalog, CatalogError, Result};
use crate::session::{SearchSession, SessionConfig, SessionEvent};
use crate::state::{BookSummary, SearchPage, SearchQuery};
use crate::store::{KeyValueStore, MemoryStore};

/// Pending reply slot for a gated call.
type Gate = Option<oneshot::Sender<Result<SearchPage>>>;

/// Catalog fake that records calls and answers from a script.
///
/// In immediate mode each call answers from the `(title, page)` script, or
/// with an empty page. In gated mode each call blocks until the test
/// releases it by call index.
#[derive(Default)]
pub struct ScriptedCatalog {
    /// Block every call until released.
    gated: bool,
    /// Every query received, in call order.
    calls: Mutex<Vec<SearchQuery>>,
    /// Immediate-mode replies.
    script: Mutex<HashMap<(String, u32), Result<SearchPage>>>,
    /// Gated-mode reply slots, indexed by call number.
    gates: Mutex<Vec<Gate>>,
    /// Signalled on every call.
    called: Notify,
}

impl ScriptedCatalog {
    /// Immediate-mode catalog with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gated-mode catalog.
    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    /// Script the reply for `(title, page)` in immediate mode.
    pub fn respond(&self, title: &str, page: u32, reply: Result<SearchPage>) {
        self.script
            .lock()
            .expect("script lock")
            .insert((title.to_string(), page), reply);
    }

    /// Queries received so far.
    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Wait until at least `n` calls were made.
    pub async fn wait_for_calls(&self, n: usize) {
        loop {
            let notified = self.called.notified();
            if self.calls.lock().expect("calls lock").len() >= n {
                return;
            }
            notified.await;
        }
    }

    /// Answer gated call number `index`.
    pub fn release(&self, index: usize, reply: Result<SearchPage>) {
        let sender = self
            .gates
            .lock()
            .expect("gates lock")
            .get_mut(index)
            .and_then(Option::take);
        if let Some(tx) = sender {
            let _ = tx.send(reply);
        }
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let rx = {
            self.calls.lock().expect("calls lock").push(query.clone());
            if self.gated {
                let (tx, rx) = oneshot::channel();
                self.gates.lock().expect("gates lock").push(Some(tx));
                Some(rx)
            } else {
                None
            }
        };
        self.called.notify_waiters();
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CatalogError::Network("gate dropped".into()))),
            None => self
                .script
                .lock()
                .expect("script lock")
                .get(&(query.title.clone(), query.page))
                .cloned()
                .unwrap_or_else(|| Ok(SearchPage::default())),
        }
    }
}

/// Book with an id and optional first publish year.
pub fn book(id: &str, year: Option<i32>) -> BookSummary {
    BookSummary {
        id: id.to_string(),
        title: format!("Title {id}"),
        authors: vec![format!("Author {id}")],
        first_publish_year: year,
        ..BookSummary::default()
    }
}

/// Session over the given catalog and an in-memory store.
pub fn session_with(
    catalog: Arc<dyn Catalog>,
) -> (
    SearchSession,
    tokio::sync::mpsc::UnboundedReceiver<SessionEvent>,
    Arc<MemoryStore>,
) {
    let mem = Arc::new(MemoryStore::new());
    let store: Arc<dyn KeyValueStore> = mem.clone();
    let (session, rx) = SearchSession::new(catalog, store, SessionConfig::default());
    (session, rx, mem)
}
