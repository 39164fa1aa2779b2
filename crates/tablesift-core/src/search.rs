//! Single search entry point over a [`Corpus`].
//!
//! The calling application loads the corpus, picks a [`StrategyKind`], and
//! passes [`SearchParams`]; this module parses the query, dispatches to the
//! strategy, and returns a [`RankedResultSet`]. There is no index: every
//! call is a full linear scan.
//!
//! # Result invariants
//!
//! - Sorted by similarity, non-increasing; ties keep first-produced order.
//! - Grouped results carry at most one row per origin key.
//! - Row results never carry a similarity `<= 0`.
//! - An empty query yields an empty result, never an error.

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::debug;

use crate::keywords::Query;
use crate::models::Corpus;
use crate::ngram::DEFAULT_NGRAM_SIZE;
use crate::strategy::{
    GroupedMatch, GroupedStrategy, MatchingStrategy, RowMatch, RowStrategy, StrategyKind,
};

/// Search tuning parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub strategy: StrategyKind,
    /// Character window for the n-gram scorer. Must be `>= 1`.
    pub ngram_size: usize,
    /// Keep only the first `limit` ranked results.
    pub limit: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            ngram_size: DEFAULT_NGRAM_SIZE,
            limit: None,
        }
    }
}

/// Ranked output of either strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", content = "matches", rename_all = "lowercase")]
pub enum RankedResultSet {
    Grouped(Vec<GroupedMatch>),
    Rows(Vec<RowMatch>),
}

impl RankedResultSet {
    pub fn strategy(&self) -> StrategyKind {
        match self {
            RankedResultSet::Grouped(_) => StrategyKind::Grouped,
            RankedResultSet::Rows(_) => StrategyKind::Rows,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RankedResultSet::Grouped(m) => m.len(),
            RankedResultSet::Rows(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Similarities in ranked order.
    pub fn similarities(&self) -> Vec<f64> {
        match self {
            RankedResultSet::Grouped(m) => m.iter().map(|g| g.similarity).collect(),
            RankedResultSet::Rows(m) => m.iter().map(|r| r.similarity).collect(),
        }
    }

    fn truncate(&mut self, limit: usize) {
        match self {
            RankedResultSet::Grouped(m) => m.truncate(limit),
            RankedResultSet::Rows(m) => m.truncate(limit),
        }
    }
}

/// Run one query against the corpus with the chosen strategy.
pub fn search(corpus: &Corpus, query: &str, params: &SearchParams) -> Result<RankedResultSet> {
    if params.ngram_size == 0 {
        bail!("ngram_size must be >= 1");
    }
    if params.limit == Some(0) {
        bail!("limit must be >= 1");
    }

    let query = Query::parse(query);

    let mut results = match params.strategy {
        StrategyKind::Grouped => {
            RankedResultSet::Grouped(GroupedStrategy.rank(corpus, &query, params.ngram_size))
        }
        StrategyKind::Rows => {
            RankedResultSet::Rows(RowStrategy.rank(corpus, &query, params.ngram_size))
        }
    };

    if let Some(limit) = params.limit {
        results.truncate(limit);
    }

    debug!(
        strategy = %params.strategy,
        keywords = query.keywords.len(),
        records = corpus.len(),
        results = results.len(),
        "search complete"
    );

    Ok(results)
}
