//! Query parsing and keyword containment.
//!
//! A query is used two ways: whole (for n-gram scoring) and split on
//! whitespace into keywords (for containment checks). Both forms are
//! lower-cased.

use serde::Serialize;

/// A parsed, case-folded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// The text as supplied by the caller.
    pub raw: String,
    /// `raw`, lower-cased. Used whole for n-gram scoring.
    pub lowered: String,
    /// Distinct whitespace-separated tokens of `lowered`, first-seen order.
    pub keywords: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let mut keywords: Vec<String> = Vec::new();
        for token in lowered.split_whitespace() {
            if !keywords.iter().any(|k| k == token) {
                keywords.push(token.to_string());
            }
        }
        Self {
            raw: raw.to_string(),
            lowered,
            keywords,
        }
    }

    /// True when the query has no keywords (empty or whitespace-only).
    pub fn is_blank(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True when every keyword occurs in `text_lower`.
    ///
    /// Vacuously true for a blank query.
    pub fn all_present_in(&self, text_lower: &str) -> bool {
        self.keywords
            .iter()
            .all(|k| contains_keyword(k, text_lower))
    }
}

/// Substring test of a single lower-cased keyword.
pub fn contains_keyword(keyword: &str, text_lower: &str) -> bool {
    text_lower.contains(keyword)
}

/// Case-insensitive check that every whitespace-separated keyword of
/// `query` is a substring of `text`.
pub fn contains_all_keywords(query: &str, text: &str) -> bool {
    Query::parse(query).all_present_in(&text.to_lowercase())
}
