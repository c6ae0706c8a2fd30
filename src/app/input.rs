use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// What: Spawn the blocking terminal reader thread.
///
/// Inputs:
/// - `headless`: Skip the reader entirely (tests without a TTY).
/// - `event_tx`: Channel receiving terminal events.
/// - `cancelled`: Flag checked between polls; set on exit.
///
/// Details:
/// - Polls with a short timeout so the thread notices cancellation promptly.
/// - Exits when the receiver is dropped.
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    let Ok(ev) = crossterm::event::read() else {
                        continue;
                    };
                    if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
        tracing::debug!("[Runtime] Input thread stopped");
    });
}
