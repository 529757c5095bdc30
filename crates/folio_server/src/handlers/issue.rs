//! Issue HTTP handlers.

use super::normalize::parse_path_param;
use super::{gate_active, run_blocking};
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use folio_core::db::AppliedUpdate;
use folio_core::editorial::{self, IssueView};
use folio_core::models::issue::{Issue, NewIssue};
use std::collections::HashMap;

/// List issues, newest first, hiding issues without safe articles in safe mode.
///
/// # Returns
/// The visible issues as JSON.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_issues(State(state): State<AppState>) -> Result<Json<Vec<Issue>>, HttpError> {
    let active = gate_active(&state).await;
    let db = state.db.clone();
    let issues = run_blocking(move || editorial::list_issues(&db, active)).await?;
    Ok(Json(issues))
}

/// Register a new, empty issue.
///
/// # Returns
/// `201 Created` with the stored issue.
///
/// # Errors
/// Returns 400 for a blank title.
pub async fn create_issue(
    State(state): State<AppState>,
    Json(new_issue): Json<NewIssue>,
) -> Result<(StatusCode, Json<Issue>), HttpError> {
    let db = state.db.clone();
    let issue = run_blocking(move || editorial::create_issue(&db, new_issue)).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// Fetch an issue with its articles in position order.
///
/// # Errors
/// Returns 400 for a malformed id and 404 when the issue is missing or hidden.
pub async fn get_issue(
    State(state): State<AppState>,
    Path(issue): Path<String>,
) -> Result<Json<IssueView>, HttpError> {
    let issue_id: i64 = parse_path_param(&issue, "issue id")?;
    let active = gate_active(&state).await;
    let db = state.db.clone();
    let view = run_blocking(move || editorial::issue_with_articles(&db, issue_id, active)).await?;
    Ok(Json(view))
}

/// Fetch an issue for the editor, including articles safe mode hides.
///
/// # Errors
/// Returns 400 for a malformed id and 404 when the issue is missing.
pub async fn edit_issue(
    State(state): State<AppState>,
    Path(issue): Path<String>,
) -> Result<Json<IssueView>, HttpError> {
    let issue_id: i64 = parse_path_param(&issue, "issue id")?;
    let db = state.db.clone();
    let view = run_blocking(move || editorial::issue_for_editing(&db, issue_id)).await?;
    Ok(Json(view))
}

/// Save an editor submission: reorder, edit, add and remove articles at once.
///
/// # Arguments
/// - `issue`: Issue identifier from the path.
/// - `fields`: Form body with `order-input` and per-article fields.
///
/// # Returns
/// Identifiers inserted, updated and deleted by the commit.
///
/// # Errors
/// Returns 400 for a blank or malformed order or a foreign article id, 404
/// for a missing issue, and 500 when the commit fails.
pub async fn save_issue(
    State(state): State<AppState>,
    Path(issue): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Json<AppliedUpdate>, HttpError> {
    let issue_id: i64 = parse_path_param(&issue, "issue id")?;
    let db = state.db.clone();
    let applied = run_blocking(move || editorial::save_issue(&db, issue_id, &fields)).await?;
    Ok(Json(applied))
}

/// Delete an issue and its articles.
///
/// # Errors
/// Returns 404 when the issue does not exist.
pub async fn delete_issue(
    State(state): State<AppState>,
    Path(issue): Path<String>,
) -> Result<StatusCode, HttpError> {
    let issue_id: i64 = parse_path_param(&issue, "issue id")?;
    let db = state.db.clone();
    run_blocking(move || editorial::delete_issue(&db, issue_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
