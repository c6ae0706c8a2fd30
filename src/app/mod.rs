//! Terminal application: setup, input, and the event loop.

mod input;
mod keys;
mod runtime;
mod terminal;

pub use keys::handle_key;
pub use runtime::{RunOptions, run};

/// Result for runtime and setup failures.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
