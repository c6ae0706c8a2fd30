//! Latest-wins issuing of catalog lookups.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::SessionEvent;
use crate::catalog::Catalog;
use crate::state::SearchQuery;

/// The lookup task currently running.
#[derive(Debug)]
struct InFlight {
    /// Generation the task will report under.
    generation: u64,
    /// Lookup task; aborting it is the cancellation.
    handle: JoinHandle<()>,
}

/// Issues lookups and decides which report may touch state.
///
/// Each lookup gets a fresh generation number. Issuing a new lookup aborts
/// the previous task, and [`QuerySequencer::settle`] accepts a report only
/// when it carries the generation currently awaited, so a late report from a
/// superseded lookup is dropped even if it was already queued.
pub struct QuerySequencer {
    /// Remote lookup collaborator.
    catalog: Arc<dyn Catalog>,
    /// Generation whose report is awaited, if any.
    awaiting: Option<u64>,
    /// Next generation to allocate.
    next_generation: u64,
    /// Task for the awaited generation.
    in_flight: Option<InFlight>,
}

impl std::fmt::Debug for QuerySequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySequencer")
            .field("awaiting", &self.awaiting)
            .field("next_generation", &self.next_generation)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl QuerySequencer {
    /// Create an idle sequencer over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            awaiting: None,
            next_generation: 1,
            in_flight: None,
        }
    }

    /// Generation whose report will be accepted, if any.
    #[must_use]
    pub const fn awaiting(&self) -> Option<u64> {
        self.awaiting
    }

    /// What: Start a lookup, superseding any running one.
    ///
    /// Inputs:
    /// - `query`: Parameters to send.
    /// - `tx`: Session event channel that receives `SearchSettled`.
    ///
    /// Output:
    /// - Generation assigned to this lookup.
    ///
    /// Details:
    /// - Must be called inside a Tokio runtime; the lookup is a spawned task.
    pub fn issue(&mut self, query: SearchQuery, tx: &mpsc::UnboundedSender<SessionEvent>) -> u64 {
        self.abort_in_flight();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.awaiting = Some(generation);

        tracing::debug!(
            generation,
            term = %query.title,
            page = query.page,
            "[Sequencer] Issuing lookup"
        );
        let catalog = Arc::clone(&self.catalog);
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = catalog.search(&query).await;
            let _ = tx.send(SessionEvent::SearchSettled {
                generation,
                query,
                outcome,
            });
        });
        self.in_flight = Some(InFlight { generation, handle });
        generation
    }

    /// What: Cancel the running lookup and stop awaiting any report.
    ///
    /// Details:
    /// - Used when the term is cleared or the session is disposed.
    pub fn invalidate(&mut self) {
        self.abort_in_flight();
        self.awaiting = None;
    }

    /// What: Decide whether a settled report may be applied.
    ///
    /// Inputs:
    /// - `generation`: Generation carried by the report.
    ///
    /// Output:
    /// - `true` exactly once for the awaited generation; `false` for superseded or repeated reports.
    pub fn settle(&mut self, generation: u64) -> bool {
        if self.awaiting != Some(generation) {
            tracing::debug!(
                generation,
                awaiting = ?self.awaiting,
                "[Sequencer] Discarding stale report"
            );
            return false;
        }
        self.awaiting = None;
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation)
        {
            self.in_flight = None;
        }
        true
    }

    /// Abort the running task, if any.
    fn abort_in_flight(&mut self) {
        if let Some(f) = self.in_flight.take() {
            f.handle.abort();
            tracing::debug!(generation = f.generation, "[Sequencer] Cancelled lookup");
        }
    }
}

impl Drop for QuerySequencer {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
