//! Editor-submitted article order.
//!
//! The order is a comma-separated list of article identifiers. A non-negative
//! identifier names an existing article of the issue; a negative one asks for a
//! new article at that position. Slot position becomes the stored index.

use crate::error::AppError;

/// Parsed article order, one identifier per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleOrder {
    ids: Vec<i64>,
}

impl ArticleOrder {
    /// Parse a comma-separated order string.
    ///
    /// Tokens are not trimmed, so `"1, 2"` is rejected. Duplicates and any
    /// sign are accepted. An empty string is a single blank token that names
    /// no article: it parses into an order without usable slots, which
    /// reconciliation then refuses.
    ///
    /// # Returns
    /// The parsed order with one entry per token.
    ///
    /// # Errors
    /// Returns [`AppError::MalformedOrder`] naming the first token that is not
    /// an integer; no partial order is produced.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Ok(Self { ids: Vec::new() });
        }
        let ids = raw
            .split(',')
            .map(|token| {
                token.parse::<i64>().map_err(|_| AppError::MalformedOrder {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ids })
    }

    /// Identifiers in slot order.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// `(position, identifier)` pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.ids.iter().copied().enumerate()
    }

    /// Identifiers that reference existing articles.
    pub fn existing_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied().filter(|id| *id >= 0)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<i64>> for ArticleOrder {
    fn from(ids: Vec<i64>) -> Self {
        Self { ids }
    }
}
