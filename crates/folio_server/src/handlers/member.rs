//! Staff roster HTTP handlers.

use super::run_blocking;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use folio_core::editorial::{self, Roster};
use folio_core::models::member::{Member, MemberProfile};
use folio_core::roster::chefreds_or_empty;

/// List the active staff with the current editors-in-chief first.
///
/// An unreachable role directory yields a roster without chefreds.
///
/// # Errors
/// Returns 500 when storage access fails.
pub async fn roster(State(state): State<AppState>) -> Result<Json<Roster>, HttpError> {
    let db = state.db.clone();
    let chefreds = state.chefreds.clone();
    let roster = run_blocking(move || {
        let chefred_ids = chefreds_or_empty(chefreds.as_ref());
        editorial::roster(&db, &chefred_ids)
    })
    .await?;
    Ok(Json(roster))
}

/// Create or replace a member profile.
///
/// # Errors
/// Returns 400 for a blank KTH id.
pub async fn upsert_member(
    State(state): State<AppState>,
    Path(kth_id): Path<String>,
    Json(profile): Json<MemberProfile>,
) -> Result<Json<Member>, HttpError> {
    let member = profile.into_member(kth_id.trim());
    let db = state.db.clone();
    let stored = run_blocking(move || {
        db.members.upsert(&member)?;
        Ok(member)
    })
    .await?;
    Ok(Json(stored))
}
