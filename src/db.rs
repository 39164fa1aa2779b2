use anyhow::{bail, Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Open a read-only pool on an existing SQLite database.
///
/// Source databases are never created or modified; a missing file is an
/// error rather than an empty corpus.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if !path.is_file() {
        bail!("database file does not exist: {}", path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    Ok(pool)
}
