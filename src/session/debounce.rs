//! Quiescence timer for committing typed input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::SessionEvent;

/// Default quiescence window before typed input is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

/// The one armed commit, if any.
#[derive(Debug)]
struct Pending {
    /// Identifies this arming; stale timer reports carry an older ticket.
    ticket: u64,
    /// Trimmed term to commit when the window elapses.
    term: String,
    /// Timer task; aborted on re-arm, cancel, and drop.
    handle: JoinHandle<()>,
}

/// Cancellable scheduled commit held by the session.
///
/// At most one commit is armed at a time. Arming again cancels the previous
/// timer, so only the value present when input pauses for a full window is
/// ever reported.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiescence window.
    window: Duration,
    /// Currently armed commit.
    pending: Option<Pending>,
    /// Next ticket to hand out.
    next_ticket: u64,
}

impl Debouncer {
    /// Create an idle debouncer with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            next_ticket: 1,
        }
    }

    /// The configured quiescence window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Whether a commit is armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// What: Arm a commit for `term`, replacing any armed one.
    ///
    /// Inputs:
    /// - `term`: Trimmed, non-empty term.
    /// - `tx`: Session event channel that receives `DebounceElapsed`.
    ///
    /// Output:
    /// - Ticket identifying this arming.
    ///
    /// Details:
    /// - Must be called inside a Tokio runtime; the timer is a spawned task.
    pub fn schedule(&mut self, term: String, tx: &mpsc::UnboundedSender<SessionEvent>) -> u64 {
        self.cancel();
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let tx = tx.clone();
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(SessionEvent::DebounceElapsed { ticket });
        });
        tracing::trace!(ticket, term = %term, "[Debounce] Commit armed");
        self.pending = Some(Pending {
            ticket,
            term,
            handle,
        });
        ticket
    }

    /// What: Disarm the pending commit.
    ///
    /// Output:
    /// - `true` when something was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|p| {
            p.handle.abort();
            tracing::trace!(ticket = p.ticket, "[Debounce] Commit cancelled");
            true
        })
    }

    /// What: Claim the armed term when a timer report arrives.
    ///
    /// Inputs:
    /// - `ticket`: Ticket carried by the `DebounceElapsed` event.
    ///
    /// Output:
    /// - `Some(term)` when `ticket` is the armed one; `None` for stale or cancelled reports.
    pub fn take_if_current(&mut self, ticket: u64) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            return self.pending.take().map(|p| p.term);
        }
        None
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
