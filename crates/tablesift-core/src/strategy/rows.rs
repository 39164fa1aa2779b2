//! Strategy B: row-filtered matching.
//!
//! Keeps only records whose flattened text contains *every* query keyword,
//! scores each kept record against the whole query, drops zero scores,
//! and sorts the rest by similarity descending (stable).

use serde::Serialize;
use tracing::debug;

use super::{sort_by_similarity, MatchingStrategy, Scored};
use crate::keywords::Query;
use crate::models::Corpus;
use crate::ngram::similarity_lowered;

/// A single matching record, referenced by its position in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowMatch {
    pub record_index: usize,
    /// Always `> 0.0`.
    pub similarity: f64,
}

impl Scored for RowMatch {
    fn similarity(&self) -> f64 {
        self.similarity
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowStrategy;

impl MatchingStrategy for RowStrategy {
    type Match = RowMatch;

    fn name(&self) -> &'static str {
        "rows"
    }

    fn rank(&self, corpus: &Corpus, query: &Query, ngram_size: usize) -> Vec<RowMatch> {
        let mut kept = 0usize;
        let mut matches: Vec<RowMatch> = Vec::new();

        for (record_index, entry) in corpus.entries().iter().enumerate() {
            if !query.all_present_in(&entry.text) {
                continue;
            }
            kept += 1;
            let similarity = similarity_lowered(&query.lowered, &entry.text, ngram_size);
            if similarity > 0.0 {
                matches.push(RowMatch {
                    record_index,
                    similarity,
                });
            }
        }

        sort_by_similarity(&mut matches);

        debug!(
            strategy = self.name(),
            kept,
            rows = matches.len(),
            "ranked row matches"
        );

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn rank(corpus: &Corpus, q: &str) -> Vec<RowMatch> {
        RowStrategy.rank(corpus, &Query::parse(q), 3)
    }

    fn hr_corpus() -> Corpus {
        Corpus::new(vec![
            Record::builder("hr", "staff")
                .text("name", "john smith")
                .text("dept", "engineering dept")
                .build(),
            Record::builder("hr", "staff")
                .text("name", "jane doe")
                .text("dept", "marketing dept")
                .build(),
        ])
    }

    #[test]
    fn test_requires_all_keywords() {
        assert!(rank(&hr_corpus(), "john marketing").is_empty());
    }

    #[test]
    fn test_single_record_match() {
        let rows = rank(&hr_corpus(), "jane marketing");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record_index, 1);
        assert!(rows[0].similarity > 0.0);
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        // Every record passes the vacuous keyword check, then scores 0.
        assert!(rank(&hr_corpus(), "").is_empty());
    }

    #[test]
    fn test_short_keywords_score_zero_and_are_dropped() {
        // "jo" is present but has no trigrams.
        assert!(rank(&hr_corpus(), "jo").is_empty());
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let corpus = Corpus::new(vec![
            Record::builder("d", "t").text("n", "dept one").build(),
            Record::builder("d", "t").text("n", "sales dept").build(),
            Record::builder("d", "t").text("n", "dept two").build(),
        ]);
        let rows = rank(&corpus, "sales dept");
        let order: Vec<usize> = rows.iter().map(|r| r.record_index).collect();
        assert_eq!(order, vec![1]);

        let rows = rank(&corpus, "dept");
        let order: Vec<usize> = rows.iter().map(|r| r.record_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        for w in rows.windows(2) {
            assert!(w[0].similarity >= w[1].similarity);
        }
    }

    #[test]
    fn test_ranks_better_rows_first() {
        let corpus = Corpus::new(vec![
            Record::builder("d", "t").text("n", "smith").build(),
            Record::builder("d", "t").text("n", "john smith").build(),
        ]);
        let rows = rank(&corpus, "smith john");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record_index, 1);

        let rows = rank(&corpus, "smith");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record_index, 0);
    }

    #[test]
    fn test_never_emits_non_positive() {
        let corpus = hr_corpus();
        for q in ["", "dept", "staff hr", "a", "john", "xyz"] {
            for m in rank(&corpus, q) {
                assert!(m.similarity > 0.0, "q={:?}", q);
            }
        }
    }
}
