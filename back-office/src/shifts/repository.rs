//! Shift Repository
//!
//! Typed access to the closed-shift collection. Documents are decoded here,
//! at the store boundary; fields of the wrong shape fall back to their
//! defaults so the record still counts.

use std::sync::Arc;

use shared::models::{Document, ShiftRecord, ShiftStatus};

use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, Filter, Query};

pub struct ShiftRepository<S: ?Sized> {
    store: Arc<S>,
    collection: String,
}

impl<S: DocumentStore + ?Sized> ShiftRepository<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// All closed shifts, in store order
    ///
    /// Only the status filter runs server-side; date filtering happens in
    /// [`crate::reports::aggregate_period`].
    pub async fn find_closed(&self) -> StoreResult<Vec<ShiftRecord>> {
        let query = Query::new().filter(Filter::eq("status", ShiftStatus::Closed.as_str()));
        let docs = self.store.query_records(&self.collection, &query).await?;

        let mut shifts = Vec::with_capacity(docs.len());
        for doc in &docs {
            match doc.decode::<ShiftRecord>() {
                Ok(shift) => shifts.push(shift),
                Err(e) => {
                    tracing::warn!(
                        id = %doc.id,
                        collection = %self.collection,
                        "Skipping undecodable shift: {}",
                        e
                    );
                }
            }
        }
        Ok(shifts)
    }

    /// Append a closed shift to the history, returning its id
    pub async fn record_closed(&self, shift: &ShiftRecord) -> StoreResult<String> {
        if !shift.is_closed() {
            return Err(StoreError::Malformed(format!(
                "Shift {} is not closed",
                shift.id
            )));
        }
        if shift.closed_at.is_none() {
            return Err(StoreError::Malformed(format!(
                "Shift {} has no closedAt",
                shift.id
            )));
        }

        let fields = Document::fields_of(shift)?;
        let id = self.store.insert_record(&self.collection, fields).await?;
        tracing::info!(id = %id, opened_by = %shift.opened_by, "Closed shift recorded");
        Ok(id)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.delete_record(&self.collection, id).await
    }
}
