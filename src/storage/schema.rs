//! Database schema definitions

/// SQL to create the quotes table.
///
/// `tags` and `quote_text` hold JSON arrays, NULL when absent.
/// AUTOINCREMENT keeps ids of deleted rows from being reused.
pub const CREATE_QUOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT,
    tags TEXT,
    quote_text TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_quotes_author ON quotes(author)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_QUOTES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
