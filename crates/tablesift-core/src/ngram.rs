//! Character n-gram similarity.
//!
//! The score is a recall-style ratio: the fraction of the query's distinct
//! n-grams that also occur in the text.
//!
//! ```text
//! similarity(q, t) = |ngrams(q) ∩ ngrams(t)| / max(|ngrams(q)|, 1)
//! ```
//!
//! The denominator depends only on the query, so a long text containing
//! every query n-gram scores the same as a short one. The floor of 1 makes
//! an empty (or shorter-than-`n`) query score exactly `0.0`.
//!
//! Windows slide over Unicode scalar values, never bytes, so multi-byte
//! characters are never split.

use std::collections::HashSet;

/// Window length used when the caller does not choose one.
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Distinct contiguous character n-grams of `text`.
///
/// Empty when `text` has fewer than `n` characters or when `n == 0`.
pub fn ngrams(text: &str, n: usize) -> HashSet<&str> {
    let mut set = HashSet::new();
    if n == 0 {
        return set;
    }
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    if bounds.len() <= n {
        return set;
    }
    for start in 0..bounds.len() - n {
        set.insert(&text[bounds[start]..bounds[start + n]]);
    }
    set
}

/// Case-insensitive n-gram similarity of `text` against `query`.
pub fn similarity(query: &str, text: &str, n: usize) -> f64 {
    similarity_lowered(&query.to_lowercase(), &text.to_lowercase(), n)
}

/// Same as [`similarity`] for inputs that are already lower-cased.
pub fn similarity_lowered(query_lower: &str, text_lower: &str, n: usize) -> f64 {
    let query_ngrams = ngrams(query_lower, n);
    if query_ngrams.is_empty() {
        return 0.0;
    }
    let text_ngrams = ngrams(text_lower, n);
    let common = query_ngrams.intersection(&text_ngrams).count();
    common as f64 / query_ngrams.len().max(1) as f64
}
