//! Issue models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub publishing_date: DateTime<Utc>,
    pub views: u64,
    /// Hosted URL of the cover image, if any.
    pub coverpage: Option<String>,
}

/// Fields needed to register an issue; storage assigns the identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIssue {
    pub title: String,
    /// Defaults to the time the issue is registered.
    #[serde(default = "Utc::now")]
    pub publishing_date: DateTime<Utc>,
    #[serde(default)]
    pub coverpage: Option<String>,
}

impl NewIssue {
    /// Build an issue published now without a cover image.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            publishing_date: Utc::now(),
            coverpage: None,
        }
    }

    pub(crate) fn into_issue(self, id: i64) -> Issue {
        Issue {
            id,
            title: self.title,
            publishing_date: self.publishing_date,
            views: 0,
            coverpage: self.coverpage,
        }
    }
}
