//! Corpus acquisition abstraction.
//!
//! The [`CorpusSource`] trait is the only contract the core has with the
//! outside world: something that yields fully materialized [`Record`]s.
//! The application crate implements it over SQLite; [`memory::MemorySource`]
//! serves tests and library callers.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::models::{Corpus, Record};

pub use memory::MemorySource;

/// A provider of records for one logical source (usually one database).
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Materialize every record this source provides.
    ///
    /// Each record must carry non-empty `source_database` and
    /// `source_table` values.
    async fn load(&self) -> Result<Vec<Record>>;
}

/// Load all sources in order into one [`Corpus`].
///
/// Any failing source aborts the whole load; a partial corpus is never
/// returned.
pub async fn load_corpus(sources: &[Box<dyn CorpusSource>]) -> Result<Corpus> {
    let mut records: Vec<Record> = Vec::new();

    for source in sources {
        let loaded = source
            .load()
            .await
            .with_context(|| format!("Failed to load corpus source '{}'", source.name()))?;

        if let Some(bad) = loaded
            .iter()
            .position(|r| r.source_database.is_empty() || r.source_table.is_empty())
        {
            bail!(
                "Corpus source '{}' produced record {} without source_database/source_table",
                source.name(),
                bad
            );
        }

        info!(source = source.name(), records = loaded.len(), "loaded corpus source");
        records.extend(loaded);
    }

    Ok(Corpus::new(records))
}
