//! In-process document store
//!
//! Keeps collections in insertion order behind a tokio `RwLock`. Used by
//! tests and local tooling; production wires a remote client instead.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::models::Document;
use tokio::sync::RwLock;

use super::{DocumentStore, Query};
use crate::error::StoreResult;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query_records(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let docs = guard
            .get(collection)
            .map(|docs| query.apply(docs))
            .unwrap_or_default();
        tracing::debug!(collection, matched = docs.len(), "Memory store query");
        Ok(docs)
    }

    async fn insert_record(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn delete_record(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }
}
