//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed article order: '{token}' is not an integer")]
    MalformedOrder { token: String },

    #[error("Article order is empty; an issue must keep at least one slot")]
    EmptyOrder,

    #[error("Article {article_id} is not in issue {issue_id} and may not be edited")]
    UnknownArticleReference { article_id: i64, issue_id: i64 },

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Whether the error was caused by the caller's input rather than the server.
    ///
    /// # Returns
    /// `true` for order, reference and validation failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_)
                | Self::MalformedOrder { .. }
                | Self::EmptyOrder
                | Self::UnknownArticleReference { .. }
        )
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}
