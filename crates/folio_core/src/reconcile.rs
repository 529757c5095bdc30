//! Reconciliation of a submitted article order against persisted articles.

use crate::error::AppError;
use crate::extract::{extract_article, FieldSource};
use crate::models::article::Article;
use crate::order::ArticleOrder;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Writes needed to bring an issue in line with an editor's submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// Records for negative-id slots, still carrying their placeholder ids.
    pub to_insert: Vec<Article>,
    /// Records for existing-article slots, in slot order.
    pub to_update: Vec<Article>,
    /// Persisted articles no longer referenced by the order.
    pub to_delete: Vec<i64>,
}

impl ReconciliationPlan {
    /// Validate `order` against `current` and materialize every slot.
    ///
    /// A non-negative id referenced twice produces two update records; the one
    /// from the later slot is applied last and its position wins.
    ///
    /// # Arguments
    /// - `issue_id`: Issue being edited.
    /// - `order`: Parsed editor order.
    /// - `current`: Articles currently stored for `issue_id`.
    /// - `fields`: Submitted per-article form fields.
    /// - `now`: Timestamp stamped as last-edited on every record.
    ///
    /// # Returns
    /// The full plan; nothing has been written yet.
    ///
    /// # Errors
    /// Returns [`AppError::EmptyOrder`] for a blank order and
    /// [`AppError::UnknownArticleReference`] for the first non-negative id
    /// that does not belong to the issue.
    pub fn build(
        issue_id: i64,
        order: &ArticleOrder,
        current: &[Article],
        fields: &impl FieldSource,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let to_delete = articles_to_delete(issue_id, order, current)?;

        let mut plan = Self {
            to_delete,
            ..Self::default()
        };
        for (index, article_id) in order.slots() {
            let article = extract_article(fields, article_id, index, issue_id, now);
            if article.is_new() {
                plan.to_insert.push(article);
            } else {
                plan.to_update.push(article);
            }
        }
        Ok(plan)
    }

    /// Whether applying the plan would write nothing.
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Check every existing-article slot and collect the articles to remove.
///
/// Negative ids are never matched against stored articles.
///
/// # Returns
/// Ids of stored articles not referenced by any non-negative slot, in the
/// order they appear in `current`.
///
/// # Errors
/// Returns [`AppError::EmptyOrder`] for an order without slots, and
/// [`AppError::UnknownArticleReference`] if a non-negative id is not among
/// `current`.
pub fn articles_to_delete(
    issue_id: i64,
    order: &ArticleOrder,
    current: &[Article],
) -> Result<Vec<i64>, AppError> {
    if order.is_empty() {
        return Err(AppError::EmptyOrder);
    }
    let stored: HashSet<i64> = current.iter().map(|article| article.id).collect();
    let mut referenced = HashSet::new();
    for article_id in order.existing_ids() {
        if !stored.contains(&article_id) {
            return Err(AppError::UnknownArticleReference {
                article_id,
                issue_id,
            });
        }
        referenced.insert(article_id);
    }

    Ok(current
        .iter()
        .map(|article| article.id)
        .filter(|id| !referenced.contains(id))
        .collect())
}
