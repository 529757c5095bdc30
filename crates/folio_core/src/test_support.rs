//! Shared test-only helpers for folio_core.

use crate::models::article::Article;
use crate::models::issue::{Issue, NewIssue};
use crate::models::member::Member;
use crate::Database;
use crate::db::TransactionOps;
use chrono::Utc;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Draft for a new article at `index`, ready for [`TransactionOps::apply_issue_update`].
pub(crate) fn draft(title: &str, index: usize, safe: bool) -> Article {
    Article {
        id: -1,
        issue: 0,
        issue_index: index,
        title: title.to_string(),
        author_text: None,
        content: format!("{title} body"),
        last_edited: Utc::now(),
        safe,
    }
}

/// Create an issue holding one article per `(title, safe)` pair, in order.
///
/// # Panics
/// Panics if any write fails.
pub(crate) fn seed_issue(db: &Database, title: &str, articles: &[(&str, bool)]) -> (Issue, Vec<i64>) {
    let issue = db.issues.create(NewIssue::titled(title)).expect("create issue");
    let drafts: Vec<Article> = articles
        .iter()
        .enumerate()
        .map(|(index, (title, safe))| draft(title, index, *safe))
        .collect();
    let applied = TransactionOps::apply_issue_update(db, issue.id, &drafts, &[], &[])
        .expect("seed articles");
    (issue, applied.inserted)
}

/// Store a roster member with the given display name.
pub(crate) fn seed_member(db: &Database, kth_id: &str, name: Option<&str>) -> Member {
    let member = Member {
        kth_id: kth_id.to_string(),
        prefered_name: name.map(str::to_string),
        picture_url: None,
        title: "skribent".to_string(),
        active: true,
    };
    db.members.upsert(&member).expect("store member");
    member
}
