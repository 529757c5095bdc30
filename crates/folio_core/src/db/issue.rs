//! Issue storage operations backed by redb.

use super::rows::{decode_issue, encode, next_id};
use super::tables::{COUNTERS, ISSUES, ISSUE_COUNTER};
use crate::error::AppError;
use crate::models::issue::{Issue, NewIssue};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for the `issues` table.
pub struct IssueDb {
    db: Arc<redb::Database>,
}

impl IssueDb {
    /// Initialize issue tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ISSUES)?;
        write_txn.open_table(COUNTERS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Register a new issue and assign its identifier.
    ///
    /// # Returns
    /// The stored issue.
    ///
    /// # Errors
    /// Returns an error when serialization or storage fails.
    pub fn create(&self, new_issue: NewIssue) -> Result<Issue, AppError> {
        let write_txn = self.db.begin_write()?;
        let issue = {
            let mut issues = write_txn.open_table(ISSUES)?;
            let mut counters = write_txn.open_table(COUNTERS)?;
            let id = next_id(&mut counters, ISSUE_COUNTER)?;
            let issue = new_issue.into_issue(id);
            issues.insert(id, encode(&issue)?.as_slice())?;
            issue
        };
        write_txn.commit()?;
        tracing::info!("Created issue {} ('{}')", issue.id, issue.title);
        Ok(issue)
    }

    /// Fetch an issue by id.
    ///
    /// # Returns
    /// `Ok(Some(issue))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: i64) -> Result<Option<Issue>, AppError> {
        let read_txn = self.db.begin_read()?;
        let issues = read_txn.open_table(ISSUES)?;
        match issues.get(id)? {
            Some(value) => Ok(Some(decode_issue(value.value())?)),
            None => Ok(None),
        }
    }

    /// List all issues, most recently published first.
    ///
    /// # Errors
    /// Returns an error when iteration or deserialization fails.
    pub fn list(&self) -> Result<Vec<Issue>, AppError> {
        let read_txn = self.db.begin_read()?;
        let issues = read_txn.open_table(ISSUES)?;
        let mut out = Vec::new();
        for entry in issues.iter()? {
            let (_, value) = entry?;
            out.push(decode_issue(value.value())?);
        }
        out.sort_by(|a, b| {
            b.publishing_date
                .cmp(&a.publishing_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(out)
    }
}
