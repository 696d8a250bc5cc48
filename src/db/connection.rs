use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open (or create) the catalog database at `path` and make sure the `books`
/// table exists. Existing tables are left untouched; there are no migrations.
pub fn ensure_schema(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
    create_books_table(&conn)?;

    tracing::info!(path = %path.display(), "catalog database ready");
    Ok(conn)
}

/// Create the `books` table if it is missing. Split out so in-memory
/// connections in tests share the exact production DDL.
pub(crate) fn create_books_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            author TEXT,
            status TEXT
        )",
        [],
    )
    .context("failed to create books table")?;
    Ok(())
}
