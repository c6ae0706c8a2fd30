use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};

use super::Result;
use super::input::spawn_event_thread;
use super::keys::handle_key;
use super::terminal::{restore_terminal, setup_terminal};
use crate::catalog::{Catalog, OpenLibraryCatalog};
use crate::config::{Settings, config_dir, lists_dir, load_settings};
use crate::session::{SearchSession, SessionEvent};
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::ui::{UiState, ui};

/// Environment flag that skips raw TTY setup and the input thread.
const HEADLESS_ENV: &str = "SHELFSCOUT_TEST_HEADLESS";

/// Command-line choices that affect the runtime.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Term to fill in and search immediately.
    pub search: Option<String>,
    /// Keep collections in memory only, regardless of settings.
    pub no_persist: bool,
}

/// Terminal type used for drawing.
type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// What: Pick the storage backend.
///
/// Inputs:
/// - `settings`: Loaded settings (`persist`).
/// - `no_persist`: Command-line override.
///
/// Output:
/// - File-backed store under the lists directory, or an in-memory store.
fn build_store(settings: &Settings, no_persist: bool) -> Arc<dyn KeyValueStore> {
    if settings.persist && !no_persist {
        let store = FileStore::new(lists_dir());
        tracing::info!(dir = %store.dir().display(), "[Runtime] Persisting collections");
        Arc::new(store)
    } else {
        tracing::info!("[Runtime] Collections kept in memory only");
        Arc::new(MemoryStore::new())
    }
}

/// What: Route one terminal event.
///
/// Output:
/// - `true` when the application should exit.
fn handle_terminal_event(ev: CEvent, session: &mut SearchSession, view: &mut UiState) -> bool {
    match ev {
        CEvent::Key(ke) => handle_key(ke, session, view),
        CEvent::Paste(text) => {
            let mut raw = session.state().raw_query.clone();
            raw.push_str(text.trim_end_matches(['\r', '\n']));
            session.set_raw_query(raw);
            false
        }
        _ => false,
    }
}

/// What: Draw and dispatch until the user quits.
///
/// Details:
/// - Terminal input and session reports are handled on this task only, so the
///   session has a single writer.
async fn event_loop(
    terminal: &mut Option<Term>,
    session: &mut SearchSession,
    session_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<CEvent>,
    view: &mut UiState,
) -> Result<()> {
    loop {
        if let Some(t) = terminal.as_mut() {
            t.draw(|f| ui(f, session, view))?;
        }
        select! {
            Some(ev) = event_rx.recv() => {
                if handle_terminal_event(ev, session, view) {
                    return Ok(());
                }
            }
            Some(ev) = session_rx.recv() => {
                if session.handle_event(ev) {
                    view.clamp(
                        session.state().results.len(),
                        session.recent_searches().len(),
                        session.favorites().len(),
                    );
                }
            }
            else => return Ok(()),
        }
    }
}

/// What: Run the shelfscout TUI end-to-end.
///
/// Inputs:
/// - `options`: Command-line choices.
///
/// Output:
/// - `Ok(())` when the user quits; `Err` on terminal or setup failures.
///
/// Details:
/// - Loads `settings.conf` (creating it on first run), builds the catalog client and
///   store, starts the session, and restores the terminal on every exit path.
/// - With `SHELFSCOUT_TEST_HEADLESS=1`, no terminal is touched and no input is read.
pub async fn run(options: RunOptions) -> Result<()> {
    let headless = std::env::var(HEADLESS_ENV).ok().as_deref() == Some("1");
    let settings = load_settings(&config_dir());
    tracing::info!(
        catalog = %settings.catalog_url,
        debounce_ms = settings.debounce_ms,
        sort = settings.default_sort.as_config_key(),
        headless,
        "[Runtime] Settings loaded"
    );

    let catalog: Arc<dyn Catalog> = Arc::new(OpenLibraryCatalog::new(settings.catalog_url.clone())?);
    let store = build_store(&settings, options.no_persist);
    let (mut session, mut session_rx) =
        SearchSession::new(catalog, store, settings.session_config());
    let mut view = UiState::new(settings.covers_url.clone(), settings.cover_size);

    if let Some(term) = options.search.filter(|t| !t.trim().is_empty()) {
        session.set_raw_query(term);
        session.search_now();
    }

    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
            Ok(t) => Some(t),
            Err(e) => {
                let _ = restore_terminal();
                return Err(e.into());
            }
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();
    let cancelled = Arc::new(AtomicBool::new(false));
    spawn_event_thread(headless, event_tx.clone(), Arc::clone(&cancelled));

    let outcome = event_loop(
        &mut terminal,
        &mut session,
        &mut session_rx,
        &mut event_rx,
        &mut view,
    )
    .await;

    cancelled.store(true, Ordering::Relaxed);
    drop(event_tx);
    session.dispose();
    if !headless && let Err(e) = restore_terminal() {
        tracing::warn!(error = %e, "[Runtime] Failed to restore terminal");
    }
    outcome
}
