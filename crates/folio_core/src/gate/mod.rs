//! External safe-mode gate: HTTP client and TTL status cache.

/// TTL cache in front of a [`GateSource`].
pub mod cache;
/// Blocking HTTP client for the gate endpoint.
pub mod client;

pub use cache::{GateSnapshot, GateStatusCache};
pub use client::{parse_gate_body, GateFetchError, GateSource, HttpGateClient};
