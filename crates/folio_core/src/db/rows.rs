//! Row encoding and identifier assignment shared by storage modules.

use crate::error::AppError;
use crate::models::article::Article;
use crate::models::issue::Issue;
use crate::models::member::Member;
use redb::{ReadableTable, Table};

pub(crate) fn encode<T: serde::Serialize>(row: &T) -> Result<Vec<u8>, AppError> {
    Ok(bincode::serialize(row)?)
}

pub(crate) fn decode_article(bytes: &[u8]) -> Result<Article, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn decode_issue(bytes: &[u8]) -> Result<Issue, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn decode_member(bytes: &[u8]) -> Result<Member, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Reserve the next identifier for `counter` inside an open write transaction.
///
/// Identifiers start at 1 and are never reused, even after deletes.
pub(crate) fn next_id(counters: &mut Table<&str, i64>, counter: &str) -> Result<i64, AppError> {
    let last = counters.get(counter)?.map(|guard| guard.value()).unwrap_or(0);
    let next = last
        .checked_add(1)
        .ok_or_else(|| AppError::StorageMessage(format!("{} identifiers exhausted", counter)))?;
    counters.insert(counter, next)?;
    Ok(next)
}

/// Article ids stored under `issue_id`, read from the membership index.
pub(crate) fn issue_article_ids(
    index: &impl ReadableTable<(i64, i64), ()>,
    issue_id: i64,
) -> Result<Vec<i64>, AppError> {
    let mut ids = Vec::new();
    for entry in index.range((issue_id, i64::MIN)..=(issue_id, i64::MAX))? {
        let (key, _) = entry?;
        ids.push(key.value().1);
    }
    Ok(ids)
}

/// KTH ids credited on `article_id`, in key order.
pub(crate) fn article_author_ids(
    authored_by: &impl ReadableTable<(i64, &'static str), ()>,
    article_id: i64,
) -> Result<Vec<String>, AppError> {
    let mut ids = Vec::new();
    for entry in authored_by.range((article_id, "")..)? {
        let (key, _) = entry?;
        let (owner, kth_id) = key.value();
        if owner != article_id {
            break;
        }
        ids.push(kth_id.to_string());
    }
    Ok(ids)
}

/// Drop every authorship link of `article_id`.
pub(crate) fn clear_article_authors(
    authored_by: &mut Table<(i64, &'static str), ()>,
    article_id: i64,
) -> Result<(), AppError> {
    for kth_id in article_author_ids(&*authored_by, article_id)? {
        let _ = authored_by.remove((article_id, kth_id.as_str()))?;
    }
    Ok(())
}
