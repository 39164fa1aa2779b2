//! Database health and status listing.
//!
//! Reports, for each configured database, whether it can be opened and
//! which of its tables will contribute records. Used by `sift sources`.

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::db;
use crate::loader::SqliteSource;

/// Health and table listing of a single configured database.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub path: String,
    /// The file opened and its table list was readable.
    pub healthy: bool,
    /// Tables that will be loaded (allow-list applied).
    pub tables: Vec<String>,
    /// Diagnostic message when unhealthy.
    pub notes: Option<String>,
}

pub async fn get_sources(config: &Config) -> Vec<SourceStatus> {
    let mut statuses = Vec::with_capacity(config.databases.len());

    for db_config in &config.databases {
        let source = SqliteSource::from_config(db_config);
        let probe = async {
            let pool = db::connect(&db_config.path).await?;
            let tables = source.selected_tables(&pool).await;
            pool.close().await;
            tables
        };

        let status = match probe.await {
            Ok(tables) => SourceStatus {
                name: db_config.name.clone(),
                path: db_config.path.display().to_string(),
                healthy: true,
                tables,
                notes: None,
            },
            Err(e) => {
                warn!(database = %db_config.name, error = %e, "database unhealthy");
                SourceStatus {
                    name: db_config.name.clone(),
                    path: db_config.path.display().to_string(),
                    healthy: false,
                    tables: Vec::new(),
                    notes: Some(format!("{:#}", e)),
                }
            }
        };
        statuses.push(status);
    }

    statuses
}

pub async fn list_sources(config: &Config) -> Result<()> {
    let statuses = get_sources(config).await;

    println!("{:<20} {:<10} {:<8} PATH", "NAME", "STATUS", "TABLES");
    for s in &statuses {
        let status = if s.healthy { "OK" } else { "UNHEALTHY" };
        println!(
            "{:<20} {:<10} {:<8} {}",
            s.name,
            status,
            s.tables.len(),
            s.path
        );
        if let Some(notes) = &s.notes {
            println!("    {}", notes);
        }
    }

    Ok(())
}
