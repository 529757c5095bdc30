//! Editorial staff and article authorship.

use serde::{Deserialize, Serialize};

/// Role title given to editors-in-chief that are not on the member roster.
pub const CHEFRED_TITLE: &str = "chefred";

/// A member of the editorial staff, keyed by KTH id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub kth_id: String,
    /// Name to print instead of the directory display name.
    pub prefered_name: Option<String>,
    pub picture_url: Option<String>,
    pub title: String,
    pub active: bool,
}

impl Member {
    /// Placeholder profile for an editor-in-chief missing from the roster.
    pub fn chefred(kth_id: impl Into<String>) -> Self {
        Self {
            kth_id: kth_id.into(),
            prefered_name: None,
            picture_url: None,
            title: CHEFRED_TITLE.to_string(),
            active: true,
        }
    }

    /// Name shown for this member.
    ///
    /// Falls back to the KTH id; directory lookups are not done here.
    pub fn display_name(&self) -> &str {
        self.prefered_name.as_deref().unwrap_or(&self.kth_id)
    }

    pub fn as_author(&self) -> Author {
        Author {
            kth_id: self.kth_id.clone(),
            prefered_name: self.prefered_name.clone(),
        }
    }
}

/// Editable member fields, as submitted to the members endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberProfile {
    #[serde(default)]
    pub prefered_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    pub title: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl MemberProfile {
    pub fn into_member(self, kth_id: impl Into<String>) -> Member {
        Member {
            kth_id: kth_id.into(),
            prefered_name: self.prefered_name.filter(|name| !name.trim().is_empty()),
            picture_url: self.picture_url.filter(|url| !url.trim().is_empty()),
            title: self.title,
            active: self.active,
        }
    }
}

/// One author credited on an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub kth_id: String,
    pub prefered_name: Option<String>,
}

impl Author {
    pub fn display_name(&self) -> &str {
        self.prefered_name.as_deref().unwrap_or(&self.kth_id)
    }
}

/// Printed author line for an article.
///
/// An explicit `author_text` wins. Otherwise authors are joined as
/// `Skriven av A, B och C`. Without either there is no line.
pub fn byline(author_text: Option<&str>, authors: &[Author]) -> Option<String> {
    if let Some(text) = author_text {
        return Some(text.to_string());
    }
    let (last, rest) = authors.split_last()?;
    let mut line = String::from("Skriven av ");
    if rest.is_empty() {
        line.push_str(last.display_name());
        return Some(line);
    }
    let names: Vec<&str> = rest.iter().map(Author::display_name).collect();
    line.push_str(&names.join(", "));
    line.push_str(" och ");
    line.push_str(last.display_name());
    Some(line)
}

/// Split the roster into editors-in-chief and everyone else.
///
/// Each chefred id is moved out of `members` so nobody is listed twice. An id
/// with no matching member gets a [`Member::chefred`] placeholder. Chefreds
/// keep the order of `chefred_ids`.
pub fn split_chefreds(chefred_ids: &[String], mut members: Vec<Member>) -> (Vec<Member>, Vec<Member>) {
    let mut chefreds = Vec::with_capacity(chefred_ids.len());
    for kth_id in chefred_ids {
        match members.iter().position(|member| &member.kth_id == kth_id) {
            Some(position) => chefreds.push(members.remove(position)),
            None => chefreds.push(Member::chefred(kth_id.as_str())),
        }
    }
    (chefreds, members)
}
