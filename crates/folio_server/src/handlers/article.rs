//! Article HTTP handlers.

use super::normalize::parse_path_param;
use super::{gate_active, run_blocking};
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use folio_core::editorial::{self, ArticleView};
use folio_core::models::member::Author;

/// Fetch the article at a position within an issue.
///
/// # Errors
/// Returns 400 for malformed path values and 404 when no visible article
/// holds that position.
pub async fn get_article(
    State(state): State<AppState>,
    Path((issue, article)): Path<(String, String)>,
) -> Result<Json<ArticleView>, HttpError> {
    let issue_id: i64 = parse_path_param(&issue, "issue id")?;
    let index: usize = parse_path_param(&article, "article index")?;
    let active = gate_active(&state).await;
    let db = state.db.clone();
    let view = run_blocking(move || editorial::article_at(&db, issue_id, index, active)).await?;
    Ok(Json(view))
}

/// Replace the members credited on an article.
///
/// The body is a JSON list of KTH ids.
///
/// # Errors
/// Returns 400 for a malformed id or a KTH id that is not a member, and 404
/// when the article does not exist.
pub async fn set_authors(
    State(state): State<AppState>,
    Path(article): Path<String>,
    Json(kth_ids): Json<Vec<String>>,
) -> Result<Json<Vec<Author>>, HttpError> {
    let article_id: i64 = parse_path_param(&article, "article id")?;
    let db = state.db.clone();
    let authors = run_blocking(move || db.members.set_article_authors(article_id, &kth_ids)).await?;
    Ok(Json(authors))
}
