//! SQLite corpus loader.
//!
//! Materializes every row of every (allow-listed) table in a configured
//! database as a [`Record`], tagging it with the database name, the table
//! name, and the configured table description.
//!
//! # Value mapping
//!
//! Columns are mapped by the runtime storage class of each value, not the
//! declared column type, since SQLite lets any column hold any class:
//!
//! | Storage class | [`FieldValue`] |
//! |---------------|----------------|
//! | `INTEGER` | `Integer` |
//! | `REAL` | `Real` |
//! | `TEXT` | `Text` |
//! | `BLOB` | `Text` (lower-case hex) |
//! | `NULL` | `Null` |

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use tablesift_core::models::{Corpus, Field, FieldValue, Record};
use tablesift_core::source::{load_corpus, CorpusSource};

use crate::config::{Config, DatabaseConfig};
use crate::db;

/// A [`CorpusSource`] reading one SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    name: String,
    path: PathBuf,
    tables: Vec<String>,
    descriptions: HashMap<String, String>,
}

impl SqliteSource {
    pub fn from_config(db: &DatabaseConfig) -> Self {
        Self {
            name: db.name.clone(),
            path: db.path.clone(),
            tables: db.tables.clone(),
            descriptions: db.descriptions.clone(),
        }
    }

    /// Tables this source reads, after applying the allow-list.
    pub async fn selected_tables(&self, pool: &SqlitePool) -> Result<Vec<String>> {
        let all = list_tables(pool).await?;
        if self.tables.is_empty() {
            return Ok(all);
        }
        for wanted in &self.tables {
            if !all.contains(wanted) {
                bail!("table '{}' not found in database '{}'", wanted, self.name);
            }
        }
        Ok(self.tables.clone())
    }

    async fn load_table(&self, pool: &SqlitePool, table: &str) -> Result<Vec<Record>> {
        let sql = format!("SELECT * FROM {}", quote_ident(table));
        let rows = sqlx::query(&sql)
            .fetch_all(pool)
            .await
            .with_context(|| format!("Failed to read table '{}.{}'", self.name, table))?;

        let description = self.descriptions.get(table).cloned().unwrap_or_default();

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(Record {
                fields: row_to_fields(row)
                    .with_context(|| format!("Failed to decode a row of '{}.{}'", self.name, table))?,
                source_database: self.name.clone(),
                source_table: table.to_string(),
                source_description: description.clone(),
            });
        }

        debug!(database = %self.name, table, rows = records.len(), "loaded table");
        Ok(records)
    }
}

#[async_trait]
impl CorpusSource for SqliteSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Record>> {
        let pool = db::connect(&self.path).await?;
        let tables = self.selected_tables(&pool).await?;

        let mut records = Vec::new();
        for table in &tables {
            records.extend(self.load_table(&pool, table).await?);
        }

        pool.close().await;
        Ok(records)
    }
}

/// User tables in creation order.
pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list tables")?;
    Ok(tables)
}

/// Build one source per configured database, in config order.
pub fn sources_from_config(config: &Config) -> Vec<Box<dyn CorpusSource>> {
    config
        .databases
        .iter()
        .map(|db| Box::new(SqliteSource::from_config(db)) as Box<dyn CorpusSource>)
        .collect()
}

/// Load every configured database into one corpus snapshot.
pub async fn load_configured_corpus(config: &Config) -> Result<Corpus> {
    let corpus = load_corpus(&sources_from_config(config)).await?;
    info!(
        records = corpus.len(),
        origins = corpus.origins().len(),
        "corpus ready"
    );
    Ok(corpus)
}

fn row_to_fields(row: &SqliteRow) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(row.len());
    for (i, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(i)?;
        let value = if raw.is_null() {
            FieldValue::Null
        } else {
            let class = raw.type_info().name().to_string();
            match class.as_str() {
                "INTEGER" | "BOOLEAN" => FieldValue::Integer(row.try_get::<i64, _>(i)?),
                "REAL" | "NUMERIC" => FieldValue::Real(row.try_get::<f64, _>(i)?),
                "BLOB" => FieldValue::Text(hex::encode(row.try_get::<Vec<u8>, _>(i)?)),
                _ => FieldValue::Text(row.try_get::<String, _>(i)?),
            }
        };
        fields.push(Field {
            name: column.name().to_string(),
            value,
        });
    }
    Ok(fields)
}

/// Double-quote an SQL identifier, escaping embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
