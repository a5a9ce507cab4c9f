//! Airport data store
//!
//! The service only ever reads from the store. The dataset itself is produced
//! offline by [`crate::import`].

use async_trait::async_trait;

use crate::types::Airport;
use crate::Result;

pub mod sqlite;

pub use sqlite::SqliteAirportStore;

/// Read-only access to the airport dataset
#[async_trait]
pub trait AirportStore: Send + Sync {
    /// Return up to `limit` airports whose name or ident contains `query`
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Airport>>;

    /// Total number of airports in the dataset
    async fn count(&self) -> Result<u64>;
}

/// Escape `LIKE` metacharacters and wrap the query for a substring match.
///
/// The returned pattern must be used with `ESCAPE '\'`.
pub fn substring_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
