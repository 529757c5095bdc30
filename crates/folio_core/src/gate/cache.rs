//! TTL cache for the safe-mode gate status.
//!
//! Readers share a read lock while the value is fresh. A stale read takes the
//! write lock, re-checks freshness, and only then calls the source, so
//! concurrent misses collapse into one fetch. A failed fetch keeps the old
//! value and does not move the timestamp, which makes the next read retry.

use super::client::GateSource;
use crate::constants::{DEFAULT_GATE_STATUS, GATE_TTL};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// When the last successful fetch happened.
///
/// Age is measured on the monotonic clock; the wall-clock time is only kept
/// for reporting.
#[derive(Debug, Clone, Copy)]
struct Refreshed {
    at: Instant,
    wall: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct GateState {
    active: bool,
    refreshed: Option<Refreshed>,
}

impl GateState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.refreshed
            .is_some_and(|refreshed| refreshed.at.elapsed() < ttl)
    }
}

/// Point-in-time view of the cache, without triggering a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateSnapshot {
    pub active: bool,
    /// Time of the last successful fetch, `None` if there never was one.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Cached gate status shared by request handlers.
pub struct GateStatusCache {
    source: Arc<dyn GateSource>,
    ttl: Duration,
    state: RwLock<GateState>,
}

impl GateStatusCache {
    /// Cache `source` for [`GATE_TTL`], starting from [`DEFAULT_GATE_STATUS`].
    pub fn new(source: Arc<dyn GateSource>) -> Self {
        Self::with_ttl(source, GATE_TTL)
    }

    pub fn with_ttl(source: Arc<dyn GateSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(GateState {
                active: DEFAULT_GATE_STATUS,
                refreshed: None,
            }),
        }
    }

    // The state is replaced as a whole under the write lock, so a poisoned
    // lock still guards a consistent value.
    fn read_state(&self) -> RwLockReadGuard<'_, GateState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, GateState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current gate status, refreshing from the source first if stale.
    ///
    /// Blocks while a refresh is in flight. Never fails: on fetch errors the
    /// last known value (or the restrictive default) is returned.
    pub fn status(&self) -> bool {
        {
            let state = self.read_state();
            if state.is_fresh(self.ttl) {
                return state.active;
            }
        }

        let mut state = self.write_state();
        if state.is_fresh(self.ttl) {
            return state.active;
        }

        match self.source.fetch_status() {
            Ok(active) => {
                if active != state.active || state.refreshed.is_none() {
                    tracing::info!("Safe mode is now {}", if active { "on" } else { "off" });
                }
                *state = GateState {
                    active,
                    refreshed: Some(Refreshed {
                        at: Instant::now(),
                        wall: Utc::now(),
                    }),
                };
            }
            Err(err) => {
                tracing::warn!(
                    "Gate refresh from '{}' failed: {}; keeping safe mode {}",
                    self.source.describe(),
                    err,
                    if state.active { "on" } else { "off" }
                );
            }
        }
        state.active
    }

    /// Read the cached value without refreshing.
    pub fn snapshot(&self) -> GateSnapshot {
        let state = self.read_state();
        GateSnapshot {
            active: state.active,
            refreshed_at: state.refreshed.map(|refreshed| refreshed.wall),
        }
    }

    /// Move the reported refresh time by `by`, as a wall-clock step would.
    #[cfg(test)]
    pub(crate) fn skew_reported_time(&self, by: chrono::Duration) {
        let mut state = self.write_state();
        if let Some(refreshed) = state.refreshed.as_mut() {
            refreshed.wall += by;
        }
    }
}
