//! Per-article form field extraction.

use crate::constants::{AUTHOR_TEXT_SUFFIX, CONTENT_SUFFIX, TITLE_SUFFIX};
use crate::models::article::Article;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Read access to submitted form fields by name.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

fn field_or_empty(fields: &impl FieldSource, article_id: i64, suffix: &str) -> String {
    fields
        .field(&format!("{article_id}{suffix}"))
        .unwrap_or_default()
        .to_string()
}

/// Build the article record for one order slot.
///
/// Fields are looked up as `<id>_Title`, `<id>_Authortext` and `<id>_Content`.
/// Missing fields read as empty strings. A blank author text means no override.
/// Every record is marked safe.
// TODO: read a submitted safe flag once the editor form exposes one.
pub fn extract_article(
    fields: &impl FieldSource,
    article_id: i64,
    index: usize,
    issue_id: i64,
    now: DateTime<Utc>,
) -> Article {
    let author_text = field_or_empty(fields, article_id, AUTHOR_TEXT_SUFFIX);
    Article {
        id: article_id,
        issue: issue_id,
        issue_index: index,
        title: field_or_empty(fields, article_id, TITLE_SUFFIX),
        author_text: if author_text.trim().is_empty() {
            None
        } else {
            Some(author_text)
        },
        content: field_or_empty(fields, article_id, CONTENT_SUFFIX),
        last_edited: now,
        safe: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_fields_keyed_by_identifier() {
        let fields = form(&[
            ("7_Title", "Ordförande har ordet"),
            ("7_Authortext", "Skriven av styrelsen"),
            ("7_Content", "# Hej\n\ntext"),
            ("8_Title", "Someone else"),
        ]);
        let now = Utc::now();
        let article = extract_article(&fields, 7, 2, 5, now);

        assert_eq!(article.id, 7);
        assert_eq!(article.issue, 5);
        assert_eq!(article.issue_index, 2);
        assert_eq!(article.title, "Ordförande har ordet");
        assert_eq!(article.author_text.as_deref(), Some("Skriven av styrelsen"));
        assert_eq!(article.content, "# Hej\n\ntext");
        assert_eq!(article.last_edited, now);
        assert!(article.safe);
    }

    #[test]
    fn negative_placeholders_use_their_own_keys() {
        let fields = form(&[("-3_Title", "Fresh"), ("3_Title", "Stale")]);
        let article = extract_article(&fields, -3, 0, 1, Utc::now());
        assert_eq!(article.title, "Fresh");
        assert!(article.is_new());
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let article = extract_article(&HashMap::new(), 4, 0, 1, Utc::now());
        assert_eq!(article.title, "");
        assert_eq!(article.content, "");
        assert_eq!(article.author_text, None);
        assert!(article.safe);
    }

    #[test]
    fn blank_author_text_is_not_an_override() {
        let fields = form(&[("4_Authortext", "   ")]);
        let article = extract_article(&fields, 4, 0, 1, Utc::now());
        assert_eq!(article.author_text, None);
    }
}
