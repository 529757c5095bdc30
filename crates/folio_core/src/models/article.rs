//! Article models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article of an issue, as stored and returned by the API.
///
/// Before an insert commits, `id` holds the negative placeholder the editor
/// submitted; storage replaces it with a freshly assigned identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub issue: i64,
    /// Zero-based position within the issue.
    pub issue_index: usize,
    pub title: String,
    /// Pre-rendered author line that replaces the generated one when present.
    pub author_text: Option<String>,
    /// Markdown source.
    pub content: String,
    pub last_edited: DateTime<Utc>,
    /// Whether the article may be served while safe mode is active.
    pub safe: bool,
}

impl Article {
    /// Whether this record stands for an article that does not exist yet.
    pub fn is_new(&self) -> bool {
        self.id < 0
    }

    /// Copy the editable fields of `edit` onto this row.
    ///
    /// Identifier and owning issue are left untouched.
    pub fn apply_edit(&mut self, edit: &Article) {
        self.title = edit.title.clone();
        self.author_text = edit.author_text.clone();
        self.issue_index = edit.issue_index;
        self.content = edit.content.clone();
        self.last_edited = edit.last_edited;
        self.safe = edit.safe;
    }
}
