//! Library entry for shelfscout exposing the search session and its collaborators.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logic;
pub mod session;
pub mod state;
pub mod store;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_utils;
