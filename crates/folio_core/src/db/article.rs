//! Article storage operations backed by redb.

use super::rows::{decode_article, issue_article_ids};
use super::tables::{ARTICLES, COUNTERS, ISSUE_ARTICLES};
use crate::error::AppError;
use crate::models::article::Article;
use redb::ReadableDatabase;
use std::sync::Arc;

/// Accessor for article rows and the per-issue membership index.
///
/// Writes go through [`crate::db::TransactionOps`] so that an issue's article
/// set only ever changes as a whole.
pub struct ArticleDb {
    db: Arc<redb::Database>,
}

impl ArticleDb {
    /// Initialize article tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ARTICLES)?;
        write_txn.open_table(ISSUE_ARTICLES)?;
        write_txn.open_table(COUNTERS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Fetch an article by id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: i64) -> Result<Option<Article>, AppError> {
        let read_txn = self.db.begin_read()?;
        let articles = read_txn.open_table(ARTICLES)?;
        match articles.get(id)? {
            Some(value) => Ok(Some(decode_article(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch every article of an issue, ordered by position.
    ///
    /// An unknown issue yields an empty list.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails, or when
    /// the membership index points at a missing row.
    pub fn list_for_issue(&self, issue_id: i64) -> Result<Vec<Article>, AppError> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ISSUE_ARTICLES)?;
        let articles = read_txn.open_table(ARTICLES)?;

        let mut out = Vec::new();
        for article_id in issue_article_ids(&index, issue_id)? {
            let Some(value) = articles.get(article_id)? else {
                return Err(AppError::StorageMessage(format!(
                    "Issue {} lists missing article {}",
                    issue_id, article_id
                )));
            };
            out.push(decode_article(value.value())?);
        }
        out.sort_by_key(|article| (article.issue_index, article.id));
        Ok(out)
    }

    /// Fetch the article at `index` within an issue.
    ///
    /// # Returns
    /// `Ok(None)` when no article holds that position.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get_by_index(&self, issue_id: i64, index: usize) -> Result<Option<Article>, AppError> {
        Ok(self
            .list_for_issue(issue_id)?
            .into_iter()
            .find(|article| article.issue_index == index))
    }

    /// Whether the issue holds at least one article marked safe.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn issue_has_safe_article(&self, issue_id: i64) -> Result<bool, AppError> {
        Ok(self
            .list_for_issue(issue_id)?
            .iter()
            .any(|article| article.safe))
    }
}
