//! `sift search`: load the configured corpus, rank it, print the results.
//!
//! Matching itself lives in [`tablesift_core::search`]; this module merges
//! CLI overrides into the configured [`SearchParams`], loads the corpus,
//! and renders either a plain-text table or JSON.

use anyhow::Result;
use serde::Serialize;

use tablesift_core::format::{format_results, FormattedResults};
use tablesift_core::models::Corpus;
use tablesift_core::search::{search, SearchParams};
use tablesift_core::strategy::StrategyKind;

use crate::config::Config;
use crate::loader;

/// Per-invocation overrides of the `[matching]` config section.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub strategy: Option<StrategyKind>,
    pub ngram_size: Option<usize>,
    pub limit: Option<usize>,
    pub json: bool,
}

impl SearchOptions {
    pub fn params(&self, config: &Config) -> SearchParams {
        let base = config.matching.search_params();
        SearchParams {
            strategy: self.strategy.unwrap_or(base.strategy),
            ngram_size: self.ngram_size.unwrap_or(base.ngram_size),
            limit: self.limit.or(base.limit),
        }
    }
}

/// JSON output shape of `sift search --json`.
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    pub strategy: StrategyKind,
    pub total: usize,
    pub results: FormattedResults,
}

pub async fn run_search(config: &Config, query: &str, opts: &SearchOptions) -> Result<()> {
    let corpus = loader::load_configured_corpus(config).await?;
    let output = render_search(&corpus, query, &opts.params(config), opts.json)?;
    println!("{}", output);
    Ok(())
}

/// Search `corpus` and render the outcome as text or JSON.
pub fn render_search(
    corpus: &Corpus,
    query: &str,
    params: &SearchParams,
    json: bool,
) -> Result<String> {
    let ranked = search(corpus, query, params)?;
    let formatted = format_results(corpus, &ranked)?;

    if json {
        let output = SearchOutput {
            query,
            strategy: ranked.strategy(),
            total: formatted.len(),
            results: formatted,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    if formatted.is_empty() {
        return Ok("No results.".to_string());
    }
    Ok(formatted.render_table())
}
