//! Storage Layer - repository abstraction over quote persistence
//!
//! Handlers talk to `QuoteRepository`; `SqliteStore` is the concrete store
//! with a single table:
//! - quotes(id, author, tags, quote_text)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};

use crate::quote::Quote;
use crate::search::QuoteFilter;
use crate::Result;

/// Single-record operations against a quote store.
///
/// Implementations must be shareable across request handlers.
pub trait QuoteRepository: Send + Sync {
    /// All quotes in store order
    fn list(&self) -> Result<Vec<Quote>>;

    fn get_by_id(&self, id: i64) -> Result<Option<Quote>>;

    fn exists(&self, id: i64) -> Result<bool>;

    /// Insert a new quote, ignoring `quote.id`, and return it with the assigned id
    fn insert(&self, quote: &Quote) -> Result<Quote>;

    /// Replace every field of the quote identified by `quote.id`.
    ///
    /// Fails with `Error::NotFound` if the record is gone, or
    /// `Error::Conflict` if it exists but no row was written.
    fn replace(&self, quote: &Quote) -> Result<()>;

    /// Delete a quote; returns false when nothing matched
    fn delete(&self, id: i64) -> Result<bool>;

    /// Quotes matching every facet of `filter`, in store order
    fn search(&self, filter: &QuoteFilter) -> Result<Vec<Quote>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|quote| filter.matches(quote))
            .collect())
    }
}
