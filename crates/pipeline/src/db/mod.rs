//! SQLite document store
//!
//! Raw and silver collections live in one `documents` table keyed by logical
//! database and collection name. Each row holds one JSON document.

mod documents;

pub use documents::*;

use rusqlite::{Connection, Result};
use std::path::Path;

pub fn open_connection(path: &Path) -> Result<Connection> {
    tracing::debug!("Opening document store at {}", path.display());
    let conn = Connection::open(path)?;
    init_tables(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_tables(&conn)?;
    Ok(conn)
}

fn init_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            database TEXT NOT NULL,
            collection TEXT NOT NULL,
            body TEXT NOT NULL,
            inserted_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(database, collection)",
        [],
    )?;

    Ok(())
}
