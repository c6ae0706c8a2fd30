//! Failure taxonomy for remote catalog lookups.

use thiserror::Error;

/// Why a catalog lookup failed.
///
/// Cancellation is deliberately absent: a superseded lookup is aborted and
/// never reports, and any report that still slips through is rejected by
/// generation in the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success HTTP status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not the expected JSON shape.
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// What: Text shown in the error banner for this failure.
    ///
    /// Output:
    /// - Non-empty, human-readable sentence.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status(code) if *code >= 500 => {
                format!("The catalog is temporarily unavailable (HTTP {code}). Try again shortly.")
            }
            Self::Status(code) => format!("The catalog rejected the search (HTTP {code})."),
            Self::Network(detail) => format!("Could not reach the catalog: {detail}"),
            Self::Decode(_) => "The catalog sent a response that could not be read.".to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Status(status.as_u16());
        }
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
