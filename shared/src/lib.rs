//! Shared types for the back-office workspace
//!
//! Data model for closed cash-register shifts, the schemaless record type
//! returned by the document store, and business time helpers.

pub mod models;
pub mod util;

// Re-exports
pub use models::{Document, SalesStats, ShiftRecord, ShiftStatus, SoldProduct};
pub use serde::{Deserialize, Serialize};
