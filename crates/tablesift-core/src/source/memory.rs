//! In-memory [`CorpusSource`] for tests and callers that already hold rows.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Record;

use super::CorpusSource;

/// A source that hands out a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    records: Vec<Record>,
}

impl MemorySource {
    pub fn new(name: &str, records: Vec<Record>) -> Self {
        Self {
            name: name.to_string(),
            records,
        }
    }
}

#[async_trait]
impl CorpusSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}
