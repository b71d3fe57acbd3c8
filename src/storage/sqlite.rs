//! SQLite storage implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::quote::Quote;
use super::{schema, QuoteRepository};

const SELECT_QUOTE: &str = "SELECT id, author, tags, quote_text FROM quotes";

/// SQLite-backed storage for quote records.
///
/// The connection is guarded by a mutex; every operation holds the guard
/// only for its own statements.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn();
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// A panicking handler cannot leave a statement half-applied, so a
    /// poisoned guard is still usable.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Bulk Operations ==========

    /// Insert several quotes in one transaction; nothing is written if any insert fails
    pub fn insert_many(&self, quotes: &[Quote]) -> Result<Vec<Quote>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let mut inserted = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let id = insert_row(&tx, quote)?;
            inserted.push(quote.clone().with_id(id));
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Count all quotes
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn().query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let conn = self.conn();
        let quotes: i64 = conn.query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        let authors: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT author) FROM quotes WHERE author IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        let tags: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT j.value) FROM quotes, json_each(quotes.tags) AS j WHERE quotes.tags IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(DbStats {
            quotes: quotes as usize,
            authors: authors as usize,
            tags: tags as usize,
        })
    }
}

impl QuoteRepository for SqliteStore {
    fn list(&self) -> Result<Vec<Quote>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{SELECT_QUOTE} ORDER BY id"))?;
        let quotes = stmt
            .query_map([], row_to_quote)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(quotes)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Quote>> {
        self.conn()
            .query_row(&format!("{SELECT_QUOTE} WHERE id = ?1"), [id], row_to_quote)
            .optional()
            .map_err(Into::into)
    }

    fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn()
            .query_row("SELECT 1 FROM quotes WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&self, quote: &Quote) -> Result<Quote> {
        let id = insert_row(&self.conn(), quote)?;
        Ok(quote.clone().with_id(id))
    }

    fn replace(&self, quote: &Quote) -> Result<()> {
        let changed = self.conn().execute(
            "UPDATE quotes SET author = ?2, tags = ?3, quote_text = ?4 WHERE id = ?1",
            params![
                quote.id,
                quote.author,
                encode_list(quote.tags.as_deref())?,
                encode_list(quote.quote_text.as_deref())?,
            ],
        )?;

        if changed == 0 {
            // SQLite always writes an existing row, so zero changes means it was
            // deleted underneath us; Conflict covers stores that can reject writes
            if self.exists(quote.id)? {
                return Err(Error::Conflict(quote.id));
            }
            return Err(Error::NotFound(quote.id));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let changed = self.conn().execute("DELETE FROM quotes WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }
}

fn insert_row(conn: &Connection, quote: &Quote) -> Result<i64> {
    conn.execute(
        "INSERT INTO quotes (author, tags, quote_text) VALUES (?1, ?2, ?3)",
        params![
            quote.author,
            encode_list(quote.tags.as_deref())?,
            encode_list(quote.quote_text.as_deref())?,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn encode_list(list: Option<&[String]>) -> Result<Option<String>> {
    Ok(list.map(serde_json::to_string).transpose()?)
}

fn decode_list(raw: Option<String>, idx: usize) -> rusqlite::Result<Option<Vec<String>>> {
    raw.map(|json| {
        serde_json::from_str(&json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    })
    .transpose()
}

/// Helper to convert a row to a Quote
fn row_to_quote(row: &rusqlite::Row) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: row.get(0)?,
        author: row.get(1)?,
        tags: decode_list(row.get(2)?, 2)?,
        quote_text: decode_list(row.get(3)?, 3)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub quotes: usize,
    pub authors: usize,
    pub tags: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Quotes: {}", self.quotes)?;
        writeln!(f, "  Authors: {}", self.authors)?;
        writeln!(f, "  Tags: {}", self.tags)
    }
}
