//! Database layer and transactional helpers for Folio.

/// Article storage helpers.
pub mod article;
/// Issue storage helpers.
pub mod issue;
/// Member roster and authorship.
pub mod member;
mod rows;
/// redb table definitions.
pub mod tables;
/// Atomic multi-row issue writes.
pub mod transactions;

pub use transactions::{AppliedUpdate, TransactionOps};

use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// Database handle with access to the issue, article and member tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub issues: issue::IssueDb,
    pub articles: article::ArticleDb,
    pub members: member::MemberDb,
}


impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            issues: issue::IssueDb::new(db.clone())?,
            articles: article::ArticleDb::new(db.clone())?,
            members: member::MemberDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another worker in the same process.
    ///
    /// redb allows one open handle per file, so workers share it instead of
    /// reopening the path.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database directory and initialize tables.
    ///
    /// # Arguments
    /// - `path`: Directory holding the redb file.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or table creation fails.
    pub fn new(path: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(path).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                path, err
            ))
        })?;
        let file = Path::new(path).join(tables::REDB_FILE_NAME);

        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database '{}' is already open in another process.\n\
                    Stop the other Folio instance, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened database at {}", file.display());

        Self::from_shared(db)
    }
}
