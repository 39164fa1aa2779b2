//! Matching strategies.
//!
//! Both strategies consume the same [`Corpus`] and [`Query`] and share the
//! n-gram scorer, the keyword filter, and [`sort_by_similarity`]. They
//! differ in granularity and keyword semantics:
//!
//! | Strategy | Output | Keyword semantics |
//! |----------|--------|-------------------|
//! | [`GroupedStrategy`] | one row per origin (`database/table`) | any keyword (OR) |
//! | [`RowStrategy`] | one row per record | every keyword (AND) |

pub mod grouped;
pub mod rows;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::keywords::Query;
use crate::models::Corpus;

pub use grouped::{GroupedMatch, GroupedStrategy};
pub use rows::{RowMatch, RowStrategy};

/// Anything carrying a similarity in `[0, 1]`.
pub trait Scored {
    fn similarity(&self) -> f64;
}

/// Maps a corpus and a query to a ranked list of matches.
///
/// Implementations must return matches sorted by similarity descending,
/// with ties kept in the order they were first produced.
pub trait MatchingStrategy {
    type Match: Scored;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn rank(&self, corpus: &Corpus, query: &Query, ngram_size: usize) -> Vec<Self::Match>;
}

/// Stable sort by similarity, highest first.
pub fn sort_by_similarity<T: Scored>(items: &mut [T]) {
    items.sort_by(|a, b| {
        b.similarity()
            .partial_cmp(&a.similarity())
            .unwrap_or(Ordering::Equal)
    });
}

/// Which strategy a search runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyKind {
    /// Strategy A: keyword-grouped, one row per origin.
    #[default]
    Grouped,
    /// Strategy B: row-filtered, one row per record.
    Rows,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grouped" | "a" => Ok(StrategyKind::Grouped),
            "rows" | "b" => Ok(StrategyKind::Rows),
            other => Err(format!(
                "Unknown strategy: '{}'. Use grouped (a) or rows (b).",
                other
            )),
        }
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StrategyKind> for String {
    fn from(kind: StrategyKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Grouped => f.write_str("grouped"),
            StrategyKind::Rows => f.write_str("rows"),
        }
    }
}
