//! Data models for issues, articles and staff.

/// Article rows and drafts.
pub mod article;
/// Issue rows.
pub mod issue;
/// Staff members and authorship.
pub mod member;
