//! # Quotehub - quote records over HTTP
//!
//! A small CRUD API for quote records (author, tags, text fragments).
//!
//! Quotehub provides:
//! - The `Quote` data model and its JSON shape
//! - A `QuoteRepository` abstraction with a SQLite-backed implementation
//! - Three-facet search (author, tags, quote text)
//! - An axum router exposing list/get/create/update/delete/search

pub mod quote;
pub mod search;
pub mod storage;
pub mod server;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use quote::Quote;
pub use search::QuoteFilter;
pub use storage::{QuoteRepository, SqliteStore};

/// Result type alias for Quotehub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Quotehub operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Quote not found: {0}")]
    NotFound(i64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Concurrent modification of quote {0}")]
    Conflict(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
