//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical issue rows (`Issue`, bincode-encoded).
pub const ISSUES: TableDefinition<i64, &[u8]> = TableDefinition::new("issues");
/// Canonical article rows (`Article`, bincode-encoded).
pub const ARTICLES: TableDefinition<i64, &[u8]> = TableDefinition::new("articles");
/// Membership index of articles by owning issue.
pub const ISSUE_ARTICLES: TableDefinition<(i64, i64), ()> =
    TableDefinition::new("issue_articles");
/// Staff members by KTH id (`Member`, bincode-encoded).
pub const MEMBERS: TableDefinition<&str, &[u8]> = TableDefinition::new("members");
/// Authorship links, keyed by article then member KTH id.
pub const AUTHORED_BY: TableDefinition<(i64, &str), ()> = TableDefinition::new("authored_by");
/// Last identifier handed out per row kind.
pub const COUNTERS: TableDefinition<&str, i64> = TableDefinition::new("counters");

/// Counter key for issue identifiers.
pub const ISSUE_COUNTER: &str = "issue";
/// Counter key for article identifiers.
pub const ARTICLE_COUNTER: &str = "article";
