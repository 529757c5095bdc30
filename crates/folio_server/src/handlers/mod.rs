//! HTTP request handlers.

/// Positional article and authorship endpoints.
pub mod article;
/// Safe-mode gate endpoint.
pub mod gate;
/// Issue list, create, read, save and delete endpoints.
pub mod issue;
/// Staff roster endpoints.
pub mod member;
pub(crate) mod normalize;

use crate::AppState;
use folio_core::{AppError, DEFAULT_GATE_STATUS};

/// Current gate status, refreshed off the async runtime when stale.
pub(crate) async fn gate_active(state: &AppState) -> bool {
    let gate = state.gate.clone();
    match tokio::task::spawn_blocking(move || gate.status()).await {
        Ok(active) => active,
        Err(err) => {
            tracing::error!("Gate status task failed: {}", err);
            DEFAULT_GATE_STATUS
        }
    }
}

/// Run a storage call on the blocking pool.
///
/// A task that panics or is cancelled surfaces as [`AppError::Internal`].
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|err| {
        tracing::error!("Blocking task failed: {}", err);
        AppError::Internal
    })?
}
