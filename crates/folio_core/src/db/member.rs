//! Member roster and article authorship backed by redb.

use super::rows::{article_author_ids, clear_article_authors, decode_member, encode};
use super::tables::{ARTICLES, AUTHORED_BY, MEMBERS};
use crate::error::AppError;
use crate::models::member::{Author, Member};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for staff members and the article authorship links.
pub struct MemberDb {
    db: Arc<redb::Database>,
}

impl MemberDb {
    /// Initialize member tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(MEMBERS)?;
        write_txn.open_table(AUTHORED_BY)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a member or replace the stored profile for the same KTH id.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for a blank KTH id, or a storage error.
    pub fn upsert(&self, member: &Member) -> Result<(), AppError> {
        if member.kth_id.trim().is_empty() {
            return Err(AppError::BadRequest("Member KTH id is empty".to_string()));
        }
        let write_txn = self.db.begin_write()?;
        {
            let mut members = write_txn.open_table(MEMBERS)?;
            members.insert(member.kth_id.as_str(), encode(member)?.as_slice())?;
        }
        write_txn.commit()?;
        tracing::debug!("Stored member {}", member.kth_id);
        Ok(())
    }

    pub fn get(&self, kth_id: &str) -> Result<Option<Member>, AppError> {
        let read_txn = self.db.begin_read()?;
        let members = read_txn.open_table(MEMBERS)?;
        match members.get(kth_id)? {
            Some(value) => Ok(Some(decode_member(value.value())?)),
            None => Ok(None),
        }
    }

    /// Every stored member, ordered by KTH id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self) -> Result<Vec<Member>, AppError> {
        let read_txn = self.db.begin_read()?;
        let members = read_txn.open_table(MEMBERS)?;
        let mut out = Vec::new();
        for entry in members.iter()? {
            let (_, value) = entry?;
            out.push(decode_member(value.value())?);
        }
        Ok(out)
    }

    /// Authors credited on an article, ordered by KTH id.
    ///
    /// A link whose member row is gone still yields an author, named by KTH id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn authors_for_article(&self, article_id: i64) -> Result<Vec<Author>, AppError> {
        let read_txn = self.db.begin_read()?;
        let authored_by = read_txn.open_table(AUTHORED_BY)?;
        let members = read_txn.open_table(MEMBERS)?;

        let mut authors = Vec::new();
        for kth_id in article_author_ids(&authored_by, article_id)? {
            let author = match members.get(kth_id.as_str())? {
                Some(value) => decode_member(value.value())?.as_author(),
                None => Author {
                    kth_id,
                    prefered_name: None,
                },
            };
            authors.push(author);
        }
        Ok(authors)
    }

    /// Replace the author list of an article in one write transaction.
    ///
    /// Repeated KTH ids are stored once. An empty list clears the authors.
    ///
    /// # Returns
    /// The authors now credited on the article.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the article does not exist,
    /// [`AppError::BadRequest`] when a KTH id is not a member, or a storage
    /// error. Nothing is written on error.
    pub fn set_article_authors(
        &self,
        article_id: i64,
        kth_ids: &[String],
    ) -> Result<Vec<Author>, AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let articles = write_txn.open_table(ARTICLES)?;
            let members = write_txn.open_table(MEMBERS)?;
            let mut authored_by = write_txn.open_table(AUTHORED_BY)?;

            if articles.get(article_id)?.is_none() {
                return Err(AppError::NotFound);
            }
            for kth_id in kth_ids {
                if members.get(kth_id.as_str())?.is_none() {
                    return Err(AppError::BadRequest(format!(
                        "'{}' is not a member",
                        kth_id
                    )));
                }
            }

            clear_article_authors(&mut authored_by, article_id)?;
            for kth_id in kth_ids {
                authored_by.insert((article_id, kth_id.as_str()), ())?;
            }
        }
        write_txn.commit()?;
        let authors = self.authors_for_article(article_id)?;
        tracing::info!(
            "Article {} now credits {} author(s)",
            article_id,
            authors.len()
        );
        Ok(authors)
    }
}
