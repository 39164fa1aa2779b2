//! Strategy A: keyword-grouped matching.
//!
//! Returns one row per distinct origin (`database/table`), listing every
//! query keyword found anywhere in that origin together with the best
//! similarity of any record that contained one of them.
//!
//! # Algorithm
//!
//! 1. For each record, score the *whole* query against its flattened text.
//! 2. For each keyword present in that text, register a candidate
//!    `(keyword, origin, similarity)`.
//! 3. Collapse candidates with the same `(keyword, origin)`, keeping the
//!    maximum similarity.
//! 4. Merge candidates with the same origin: union the keywords, keep the
//!    maximum similarity.
//! 5. Stable sort by similarity descending; ties stay in first-seen order.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::{sort_by_similarity, MatchingStrategy, Scored};
use crate::keywords::{contains_keyword, Query};
use crate::models::Corpus;
use crate::ngram::similarity_lowered;

/// One merged row per origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMatch {
    /// Matched keywords, in the order they were first found.
    pub keywords: Vec<String>,
    /// `database/table`.
    pub origin_key: String,
    pub similarity: f64,
}

impl Scored for GroupedMatch {
    fn similarity(&self) -> f64 {
        self.similarity
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedStrategy;

struct Candidate {
    keyword: String,
    origin_key: String,
    similarity: f64,
}

impl MatchingStrategy for GroupedStrategy {
    type Match = GroupedMatch;

    fn name(&self) -> &'static str {
        "grouped"
    }

    fn rank(&self, corpus: &Corpus, query: &Query, ngram_size: usize) -> Vec<GroupedMatch> {
        if query.is_blank() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut by_pair: HashMap<(String, String), usize> = HashMap::new();

        for entry in corpus.entries() {
            let present: Vec<&String> = query
                .keywords
                .iter()
                .filter(|k| contains_keyword(k, &entry.text))
                .collect();
            if present.is_empty() {
                continue;
            }

            let score = similarity_lowered(&query.lowered, &entry.text, ngram_size);
            let origin_key = entry.record.origin_key();

            for keyword in present {
                let pair = (keyword.clone(), origin_key.clone());
                match by_pair.get(&pair) {
                    Some(&i) => {
                        let existing = &mut candidates[i];
                        existing.similarity = existing.similarity.max(score);
                    }
                    None => {
                        by_pair.insert(pair, candidates.len());
                        candidates.push(Candidate {
                            keyword: keyword.clone(),
                            origin_key: origin_key.clone(),
                            similarity: score,
                        });
                    }
                }
            }
        }

        let mut rows: Vec<GroupedMatch> = Vec::new();
        let mut by_origin: HashMap<String, usize> = HashMap::new();

        for cand in &candidates {
            match by_origin.get(&cand.origin_key) {
                Some(&i) => {
                    let row = &mut rows[i];
                    if !row.keywords.contains(&cand.keyword) {
                        row.keywords.push(cand.keyword.clone());
                    }
                    row.similarity = row.similarity.max(cand.similarity);
                }
                None => {
                    by_origin.insert(cand.origin_key.clone(), rows.len());
                    rows.push(GroupedMatch {
                        keywords: vec![cand.keyword.clone()],
                        origin_key: cand.origin_key.clone(),
                        similarity: cand.similarity,
                    });
                }
            }
        }

        sort_by_similarity(&mut rows);

        debug!(
            strategy = self.name(),
            candidates = candidates.len(),
            rows = rows.len(),
            "ranked grouped matches"
        );

        rows
    }
}
