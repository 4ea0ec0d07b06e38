//! Document store client abstraction
//!
//! The back office never owns the store: consumers receive a
//! [`DocumentStore`] and only issue request/response calls against it.

mod memory;
mod query;

pub use memory::MemoryStore;
pub use query::{Direction, Filter, FilterOp, OrderBy, Query};

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::models::Document;

use crate::error::StoreResult;

/// Generic document store client
///
/// Implementations may fail on any call (network, permissions); callers
/// treat every error as recoverable.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Query a collection with filters, optional ordering and limit
    async fn query_records(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;

    /// Insert a record, returning the generated id
    async fn insert_record(&self, collection: &str, fields: Map<String, Value>)
    -> StoreResult<String>;

    /// Delete a record; `Ok(false)` when nothing matched
    async fn delete_record(&self, collection: &str, id: &str) -> StoreResult<bool>;
}
