//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use folio_core::db::TransactionOps;
use folio_core::gate::{GateFetchError, GateSource};
use folio_core::models::article::Article;
use folio_core::models::issue::{Issue, NewIssue};
use folio_core::models::member::Member;
use folio_core::roster::{ChefredSource, RosterFetchError};
use folio_server::{create_app, AppState, Config, Database, GateStatusCache};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Gate answering a value set by the test.
pub(crate) struct SwitchGate {
    pub active: AtomicBool,
    pub calls: AtomicUsize,
}

impl SwitchGate {
    pub(crate) fn new(active: bool) -> Arc<Self> {
        Arc::new(Self {
            active: AtomicBool::new(active),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GateSource for SwitchGate {
    fn fetch_status(&self) -> Result<bool, GateFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.active.load(Ordering::SeqCst))
    }

    fn describe(&self) -> &str {
        "switch"
    }
}

/// Role directory with a fixed answer; `None` behaves as unreachable.
pub(crate) struct FixedChefreds(pub Option<Vec<String>>);

impl ChefredSource for FixedChefreds {
    fn current_chefreds(&self) -> Result<Vec<String>, RosterFetchError> {
        self.0.clone().ok_or(RosterFetchError::Status(503))
    }
}

/// Test server plus handles the tests need to seed and inspect state.
pub(crate) struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub gate: Arc<SwitchGate>,
    _temp: TempDir,
}

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        gate_url: String::new(),
        gate_timeout_secs: 1,
        max_form_size: 1_000_000,
        dfunkt_url: String::new(),
    }
}

/// Start a server whose gate reports `gate_active`.
pub(crate) fn setup_test_app(gate_active: bool) -> TestApp {
    setup_test_app_with_chefreds(gate_active, FixedChefreds(Some(Vec::new())))
}

/// Start a server whose gate reports `gate_active` and whose role directory
/// answers with `chefreds`.
pub(crate) fn setup_test_app_with_chefreds(gate_active: bool, chefreds: FixedChefreds) -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_db_path(&temp_dir.path().join("test.db"));
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let seed_handle = db.share().expect("share db");

    let gate = SwitchGate::new(gate_active);
    let cache = Arc::new(GateStatusCache::new(gate.clone()));
    let state = AppState::with_gate(config, db, cache).with_chefreds(Arc::new(chefreds));
    let server = TestServer::new(create_app(state, false)).expect("server");

    TestApp {
        server,
        db: seed_handle,
        gate,
        _temp: temp_dir,
    }
}

/// Create an issue holding one article per `(title, safe)` pair, in order.
pub(crate) fn seed_issue(db: &Database, title: &str, articles: &[(&str, bool)]) -> (Issue, Vec<i64>) {
    let issue = db.issues.create(NewIssue::titled(title)).expect("create issue");
    let drafts: Vec<Article> = articles
        .iter()
        .enumerate()
        .map(|(index, (title, safe))| Article {
            id: -1,
            issue: issue.id,
            issue_index: index,
            title: title.to_string(),
            author_text: None,
            content: format!("{title} body"),
            last_edited: Utc::now(),
            safe: *safe,
        })
        .collect();
    let applied = TransactionOps::apply_issue_update(db, issue.id, &drafts, &[], &[])
        .expect("seed articles");
    (issue, applied.inserted)
}

/// Store an active roster member.
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
