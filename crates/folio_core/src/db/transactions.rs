//! Atomic multi-row writes for issue edits and removal.

use super::rows::{clear_article_authors, decode_article, encode, issue_article_ids, next_id};
use super::tables::{ARTICLES, ARTICLE_COUNTER, AUTHORED_BY, COUNTERS, ISSUES, ISSUE_ARTICLES};
use super::Database;
use crate::error::AppError;
use crate::models::article::Article;
use redb::ReadableTable;
use serde::Serialize;
use std::collections::HashSet;

/// Atomic operations that touch an issue and its articles together.
pub struct TransactionOps;

/// Identifiers written by a committed issue update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedUpdate {
    /// Identifiers assigned to inserted articles, in insert order.
    pub inserted: Vec<i64>,
    pub updated: Vec<i64>,
    pub deleted: Vec<i64>,
}

#[cfg(test)]
thread_local! {
    static FAIL_BEFORE_COMMIT: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Make the next issue update on this thread fail right before commit.
#[cfg(test)]
pub(crate) fn set_commit_failpoint(enabled: bool) {
    FAIL_BEFORE_COMMIT.with(|flag| flag.set(enabled));
}

#[cfg(test)]
fn commit_failpoint_hit() -> bool {
    FAIL_BEFORE_COMMIT.with(|flag| flag.replace(false))
}

#[cfg(not(test))]
fn commit_failpoint_hit() -> bool {
    false
}

fn ensure_member(members: &HashSet<i64>, article_id: i64, issue_id: i64) -> Result<(), AppError> {
    if members.contains(&article_id) {
        Ok(())
    } else {
        Err(AppError::UnknownArticleReference {
            article_id,
            issue_id,
        })
    }
}

impl TransactionOps {
    /// Apply inserts, updates and deletes for one issue in a single write transaction.
    ///
    /// Inserts run first and receive fresh identifiers, then updates, then
    /// deletes. Deleted articles lose their author links too. Update and delete targets are re-checked against the issue
    /// inside the transaction, so a concurrent save that already removed an
    /// article makes this one fail instead of resurrecting or orphaning rows.
    ///
    /// # Arguments
    /// - `db`: Open database handle.
    /// - `issue_id`: Issue being edited.
    /// - `to_insert`: New article records (placeholder ids are ignored).
    /// - `to_update`: Records for existing articles; only editable fields are written.
    /// - `to_delete`: Articles to remove from the issue.
    ///
    /// # Returns
    /// The identifiers written once the transaction commits.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the issue does not exist,
    /// [`AppError::UnknownArticleReference`] when a target is not in the issue,
    /// or a storage/serialization error. Nothing is written on error.
    pub fn apply_issue_update(
        db: &Database,
        issue_id: i64,
        to_insert: &[Article],
        to_update: &[Article],
        to_delete: &[i64],
    ) -> Result<AppliedUpdate, AppError> {
        let write_txn = db.db.begin_write()?;
        let applied = {
            let issues = write_txn.open_table(ISSUES)?;
            let mut articles = write_txn.open_table(ARTICLES)?;
            let mut index = write_txn.open_table(ISSUE_ARTICLES)?;
            let mut counters = write_txn.open_table(COUNTERS)?;
            let mut authored_by = write_txn.open_table(AUTHORED_BY)?;

            if issues.get(issue_id)?.is_none() {
                return Err(AppError::NotFound);
            }

            let members: HashSet<i64> = issue_article_ids(&index, issue_id)?.into_iter().collect();
            for article in to_update {
                ensure_member(&members, article.id, issue_id)?;
            }
            for article_id in to_delete {
                ensure_member(&members, *article_id, issue_id)?;
            }

            let mut applied = AppliedUpdate::default();

            for draft in to_insert {
                let id = next_id(&mut counters, ARTICLE_COUNTER)?;
                let mut article = draft.clone();
                article.id = id;
                article.issue = issue_id;
                articles.insert(id, encode(&article)?.as_slice())?;
                index.insert((issue_id, id), ())?;
                applied.inserted.push(id);
            }

            for edit in to_update {
                let mut article = {
                    let Some(guard) = articles.get(edit.id)? else {
                        return Err(AppError::StorageMessage(format!(
                            "Issue {} lists missing article {}",
                            issue_id, edit.id
                        )));
                    };
                    decode_article(guard.value())?
                };
                article.apply_edit(edit);
                articles.insert(edit.id, encode(&article)?.as_slice())?;
                applied.updated.push(edit.id);
            }

            for article_id in to_delete {
                let _ = articles.remove(*article_id)?;
                let _ = index.remove((issue_id, *article_id))?;
                clear_article_authors(&mut authored_by, *article_id)?;
                applied.deleted.push(*article_id);
            }

            if commit_failpoint_hit() {
                return Err(AppError::StorageMessage(
                    "Injected failure before issue update commit".to_string(),
                ));
            }
            applied
        };

        write_txn.commit()?;
        Ok(applied)
    }

    /// Delete an issue together with all of its articles and their author links.
    ///
    /// # Returns
    /// `Ok(true)` when the issue existed and was removed, `Ok(false)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn delete_issue(db: &Database, issue_id: i64) -> Result<bool, AppError> {
        let write_txn = db.db.begin_write()?;
        let removed_articles = {
            let mut issues = write_txn.open_table(ISSUES)?;
            let mut articles = write_txn.open_table(ARTICLES)?;
            let mut index = write_txn.open_table(ISSUE_ARTICLES)?;
            let mut authored_by = write_txn.open_table(AUTHORED_BY)?;

            if issues.remove(issue_id)?.is_none() {
                return Ok(false);
            }

            let article_ids = issue_article_ids(&index, issue_id)?;
            for article_id in &article_ids {
                let _ = articles.remove(*article_id)?;
                let _ = index.remove((issue_id, *article_id))?;
                clear_article_authors(&mut authored_by, *article_id)?;
            }
            article_ids.len()
        };

        write_txn.commit()?;
        tracing::info!(
            "Deleted issue {} and {} article(s)",
            issue_id,
            removed_articles
        );
        Ok(true)
    }
}
