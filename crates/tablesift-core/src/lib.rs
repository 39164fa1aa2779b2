//! # tablesift core
//!
//! Shared, I/O-free logic for tablesift: the record model, the n-gram
//! similarity scorer, the keyword containment filter, both matching
//! strategies, the search entry point, and result formatting.
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. Corpus
//! acquisition lives behind the [`source::CorpusSource`] trait; the
//! application crate provides the SQLite implementation.
//!
//! ```rust
//! use tablesift_core::models::{Corpus, Record};
//! use tablesift_core::search::{search, SearchParams};
//!
//! let corpus = Corpus::new(vec![
//!     Record::builder("hr", "staff").text("name", "john smith").build(),
//! ]);
//! let results = search(&corpus, "john", &SearchParams::default()).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod format;
pub mod keywords;
pub mod models;
pub mod ngram;
pub mod search;
pub mod source;
pub mod strategy;
