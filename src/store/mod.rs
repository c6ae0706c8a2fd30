//! Persisted collections and the key/value storage they sit on.
//!
//! Storage is best-effort: reads fall back to empty values on missing or
//! corrupt entries, and failed writes are logged while the in-memory value
//! stays authoritative for the session.

mod backend;
mod favorites;
mod recent;
mod theme;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use backend::{FileStore, MemoryStore};
pub use favorites::{FAVORITES_KEY, Favorites};
pub use recent::{RECENT_CAPACITY, RECENT_KEY, RecentSearches, recent_capacity};
pub use theme::{THEME_KEY, ThemePreference};

/// Failure of a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or removing an entry failed.
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        /// Entry key.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A value could not be encoded for storage.
    #[error("could not encode '{key}': {source}")]
    Encode {
        /// Entry key.
        key: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Synchronous string key/value storage.
pub trait KeyValueStore: Send + Sync {
    /// What: Read the raw value stored under `key`.
    ///
    /// Output:
    /// - `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// - `StoreError::Io` when the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// What: Overwrite the value stored under `key`.
    ///
    /// # Errors
    /// - `StoreError::Io` when the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// What: Delete `key`; deleting an absent key succeeds.
    ///
    /// # Errors
    /// - `StoreError::Io` when the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<()>;
}

/// What: Load a JSON value from the store, substituting the empty value on any problem.
///
/// Inputs:
/// - `store`: Backend to read from
/// - `key`: Entry key
///
/// Output:
/// - Decoded value, or `T::default()` when the entry is missing, unreadable, or malformed.
///
/// Details:
/// - Corruption is logged and never surfaced to the caller.
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "[Store] No persisted entry; using empty value");
            return T::default();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "[Store] Failed to read entry; using empty value");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                key,
                error = %e,
                bytes = raw.len(),
                "[Store] Persisted entry is malformed; using empty value"
            );
            T::default()
        }
    }
}

/// What: Encode `value` as JSON and overwrite the entry.
///
/// # Errors
/// - `StoreError::Encode` when serialization fails.
/// - `StoreError::Io` when the backend write fails.
pub fn save_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let s = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &s)?;
    tracing::debug!(key, bytes = s.len(), "[Store] Entry persisted");
    Ok(())
}

/// What: Persist `value`, logging instead of propagating failures.
///
/// Details:
/// - Used by the persisted collections, whose in-memory copy stays authoritative.
pub(crate) fn save_best_effort<T>(store: &dyn KeyValueStore, key: &str, value: &T)
where
    T: Serialize + ?Sized,
{
    if let Err(e) = save_json(store, key, value) {
        tracing::warn!(key, error = %e, "[Store] Failed to persist entry");
    }
}

/// Remove an entry, logging instead of propagating failures.
pub(crate) fn remove_best_effort(store: &dyn KeyValueStore, key: &str) {
    match store.remove(key) {
        Ok(()) => tracing::debug!(key, "[Store] Entry removed"),
        Err(e) => tracing::warn!(key, error = %e, "[Store] Failed to remove entry"),
    }
}
