//! Safe-mode gate HTTP handler.

use super::gate_active;
use crate::AppState;
use axum::{extract::State, Json};
use folio_core::gate::GateSnapshot;

/// Report the gate state, refreshing it first if the cached value is stale.
pub async fn gate_status(State(state): State<AppState>) -> Json<GateSnapshot> {
    gate_active(&state).await;
    Json(state.gate.snapshot())
}
