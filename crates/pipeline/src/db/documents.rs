//! Document reads and writes

use chrono::Utc;
use igdb_features_core::constants::REFERENCE_YEAR_FIELD;
use igdb_features_core::Resource;
use rusqlite::Connection;
use serde_json::Value;

use crate::error::Result;
use crate::paginate::into_resource_table;

/// Top-level field equality; an empty filter matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    fields: Vec<(String, Value)>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_year(year: i32) -> Self {
        Self::all().with_field(REFERENCE_YEAR_FIELD, year)
    }

    pub fn with_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.push((field.to_string(), value.into()));
        self
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// Append documents to a collection in one transaction
pub fn insert_documents(
    conn: &Connection,
    database: &str,
    collection: &str,
    documents: &[Value],
) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let now = Utc::now().to_rfc3339();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO documents (database, collection, body, inserted_at)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for document in documents {
            let body = serde_json::to_string(document)?;
            stmt.execute((database, collection, body, &now))?;
        }
    }
    tx.commit()?;

    tracing::debug!("Wrote {} documents to {}.{}", documents.len(), database, collection);
    Ok(documents.len())
}

/// Documents of a collection matching `filter`, in insertion order
pub fn get_documents(
    conn: &Connection,
    database: &str,
    collection: &str,
    filter: &DocumentFilter,
) -> Result<Vec<Value>> {
    let mut stmt = conn.prepare(
        "SELECT body FROM documents WHERE database = ?1 AND collection = ?2 ORDER BY id",
    )?;

    let bodies = stmt
        .query_map((database, collection), |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut documents = Vec::new();
    for body in bodies {
        let document: Value = serde_json::from_str(&body)?;
        if filter.matches(&document) {
            documents.push(document);
        }
    }
    Ok(documents)
}

/// Typed read; documents that no longer fit the record schema are skipped
pub fn get_resource<R: Resource>(
    conn: &Connection,
    database: &str,
    collection: &str,
    filter: &DocumentFilter,
) -> Result<Vec<R>> {
    let documents = get_documents(conn, database, collection, filter)?;
    Ok(into_resource_table(documents))
}

pub fn count_documents(conn: &Connection, database: &str, collection: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE database = ?1 AND collection = ?2",
        (database, collection),
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
