//! TOML configuration parsing and validation.
//!
//! ```toml
//! [matching]
//! strategy = "grouped"   # or "rows"
//! ngram_size = 3
//! limit = 25
//!
//! [[databases]]
//! name = "db_alumni"
//! path = "./data/db_alumni.sqlite"
//! tables = []            # empty = every table
//!
//! [databases.descriptions]
//! alumni = "Alumni master data"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tablesift_core::ngram::DEFAULT_NGRAM_SIZE;
use tablesift_core::search::SearchParams;
use tablesift_core::strategy::StrategyKind;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub databases: Vec<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_ngram_size() -> usize {
    DEFAULT_NGRAM_SIZE
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            ngram_size: default_ngram_size(),
            limit: None,
        }
    }
}

impl MatchingConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            strategy: self.strategy,
            ngram_size: self.ngram_size,
            limit: self.limit,
        }
    }
}

/// One SQLite database contributing records to the corpus.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Recorded as `source_database` on every row.
    pub name: String,
    pub path: PathBuf,
    /// Allow-list of tables; empty means every user table.
    #[serde(default)]
    pub tables: Vec<String>,
    /// Per-table `source_description`.
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    // Relative database paths are relative to the config file.
    if let Some(base) = path.parent() {
        for db in &mut config.databases {
            if db.path.is_relative() {
                db.path = base.join(&db.path);
            }
        }
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.matching.ngram_size == 0 {
        anyhow::bail!("matching.ngram_size must be >= 1");
    }

    if config.matching.limit == Some(0) {
        anyhow::bail!("matching.limit must be >= 1");
    }

    if config.databases.is_empty() {
        anyhow::bail!("at least one [[databases]] entry is required");
    }

    let mut seen = HashSet::new();
    for db in &config.databases {
        if db.name.trim().is_empty() {
            anyhow::bail!("databases.name must not be empty");
        }
        if !seen.insert(db.name.as_str()) {
            anyhow::bail!("duplicate database name: '{}'", db.name);
        }
    }

    Ok(())
}
