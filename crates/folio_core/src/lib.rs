//! Core domain library for Folio (config, storage, models, issue editing, gate status, roster).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across Folio crates.
pub mod constants;
/// Database access layer and transactions.
pub mod db;
/// Issue save/delete pipeline and gate-aware read paths.
pub mod editorial;
/// Application error types (storage/domain).
pub mod error;
/// Per-article form field extraction.
pub mod extract;
/// External safe-mode gate client and status cache.
pub mod gate;
/// Data models for issues, articles and members.
pub mod models;
/// Editor-submitted article order parsing.
pub mod order;
/// Reconciliation of a submitted order against persisted articles.
pub mod reconcile;
/// Current editors-in-chief from the role directory.
pub mod roster;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_GATE_STATUS, DEFAULT_PORT, GATE_TTL};
pub use db::Database;
pub use error::AppError;
pub use gate::{GateStatusCache, HttpGateClient};
