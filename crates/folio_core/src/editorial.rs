//! Issue save/delete pipeline, gate-aware read paths and the staff roster.

use crate::constants::ORDER_FIELD;
use crate::db::{AppliedUpdate, Database, TransactionOps};
use crate::error::AppError;
use crate::extract::FieldSource;
use crate::models::article::Article;
use crate::models::issue::{Issue, NewIssue};
use crate::models::member::{byline, split_chefreds, Author, Member};
use crate::order::ArticleOrder;
use crate::reconcile::ReconciliationPlan;
use chrono::Utc;
use serde::Serialize;

/// An article with its credited authors and printed author line.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub authors: Vec<Author>,
    pub byline: Option<String>,
}

/// An issue with its articles in position order.
#[derive(Debug, Clone, Serialize)]
pub struct IssueView {
    pub issue: Issue,
    pub articles: Vec<ArticleView>,
}

/// Editors-in-chief first, then the rest of the active staff.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub chefreds: Vec<Member>,
    pub members: Vec<Member>,
}

fn article_view(db: &Database, article: Article) -> Result<ArticleView, AppError> {
    let authors = db.members.authors_for_article(article.id)?;
    let byline = byline(article.author_text.as_deref(), &authors);
    Ok(ArticleView {
        article,
        authors,
        byline,
    })
}

/// Register a new, empty issue.
///
/// # Errors
/// Returns [`AppError::BadRequest`] for a blank title, or a storage error.
pub fn create_issue(db: &Database, new_issue: NewIssue) -> Result<Issue, AppError> {
    if new_issue.title.trim().is_empty() {
        return Err(AppError::BadRequest("Issue title is empty".to_string()));
    }
    db.issues.create(new_issue)
}

/// Save an editor's submission for one issue.
///
/// Parses the `order-input` field, validates it against the stored articles,
/// extracts every slot and commits inserts, updates and deletes together.
///
/// # Arguments
/// - `db`: Open database handle.
/// - `issue_id`: Issue being edited.
/// - `fields`: Submitted form fields, including `order-input`.
///
/// # Returns
/// The identifiers written by the commit.
///
/// # Errors
/// - [`AppError::BadRequest`] when `order-input` is absent.
/// - [`AppError::MalformedOrder`] when the order has a non-integer token.
/// - [`AppError::EmptyOrder`] when `order-input` is blank.
/// - [`AppError::NotFound`] when the issue does not exist.
/// - [`AppError::UnknownArticleReference`] when the order names a foreign article.
/// - Storage errors when the commit fails; nothing is written in that case.
pub fn save_issue(
    db: &Database,
    issue_id: i64,
    fields: &impl FieldSource,
) -> Result<AppliedUpdate, AppError> {
    let raw_order = fields
        .field(ORDER_FIELD)
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' field", ORDER_FIELD)))?;
    let order = ArticleOrder::parse(raw_order)?;

    if db.issues.get(issue_id)?.is_none() {
        return Err(AppError::NotFound);
    }
    let current = db.articles.list_for_issue(issue_id)?;
    let plan = ReconciliationPlan::build(issue_id, &order, &current, fields, Utc::now())?;

    let applied = TransactionOps::apply_issue_update(
        db,
        issue_id,
        &plan.to_insert,
        &plan.to_update,
        &plan.to_delete,
    )?;
    tracing::info!(
        "Saved issue {}: {} inserted, {} updated, {} deleted",
        issue_id,
        applied.inserted.len(),
        applied.updated.len(),
        applied.deleted.len()
    );
    Ok(applied)
}

/// Delete an issue and all of its articles.
///
/// # Errors
/// Returns [`AppError::NotFound`] when the issue does not exist, or a storage error.
pub fn delete_issue(db: &Database, issue_id: i64) -> Result<(), AppError> {
    if TransactionOps::delete_issue(db, issue_id)? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

/// List issues, newest first.
///
/// While the gate is active only issues holding a safe article are listed.
///
/// # Errors
/// Returns an error when storage access fails.
pub fn list_issues(db: &Database, gate_active: bool) -> Result<Vec<Issue>, AppError> {
    let issues = db.issues.list()?;
    if !gate_active {
        return Ok(issues);
    }
    let mut visible = Vec::with_capacity(issues.len());
    for issue in issues {
        if db.articles.issue_has_safe_article(issue.id)? {
            visible.push(issue);
        }
    }
    Ok(visible)
}

/// Load an issue with its articles.
///
/// While the gate is active, unsafe articles are left out and an issue
/// without any safe article is not found.
///
/// # Errors
/// Returns [`AppError::NotFound`] when the issue is missing or hidden.
pub fn issue_with_articles(
    db: &Database,
    issue_id: i64,
    gate_active: bool,
) -> Result<IssueView, AppError> {
    let issue = db.issues.get(issue_id)?.ok_or(AppError::NotFound)?;
    let mut articles = db.articles.list_for_issue(issue_id)?;
    if gate_active {
        articles.retain(|article| article.safe);
        if articles.is_empty() {
            return Err(AppError::NotFound);
        }
    }
    let articles = articles
        .into_iter()
        .map(|article| article_view(db, article))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IssueView { issue, articles })
}

/// Load an issue for the editor, unsafe articles included.
///
/// A save must name every article it keeps, so the editor always sees the
/// full set whatever the gate says.
///
/// # Errors
/// Returns [`AppError::NotFound`] when the issue is missing.
pub fn issue_for_editing(db: &Database, issue_id: i64) -> Result<IssueView, AppError> {
    issue_with_articles(db, issue_id, false)
}

/// Load the article at `index` of an issue.
///
/// # Errors
/// Returns [`AppError::NotFound`] when there is no such article, or when the
/// gate is active and the article is not safe.
pub fn article_at(
    db: &Database,
    issue_id: i64,
    index: usize,
    gate_active: bool,
) -> Result<ArticleView, AppError> {
    let article = db
        .articles
        .get_by_index(issue_id, index)?
        .ok_or(AppError::NotFound)?;
    if gate_active && !article.safe {
        return Err(AppError::NotFound);
    }
    article_view(db, article)
}

/// Active staff split around the current editors-in-chief.
///
/// Chefreds missing from the stored roster are listed with a placeholder
/// profile.
///
/// # Errors
/// Returns an error when storage access fails.
pub fn roster(db: &Database, chefred_ids: &[String]) -> Result<Roster, AppError> {
    let mut active = db.members.list()?;
    active.retain(|member| member.active);
    let (chefreds, members) = split_chefreds(chefred_ids, active);
    Ok(Roster { chefreds, members })
}
