//! Data models
//!
//! Records live in a schemaless document store, so every numeric field is
//! decoded leniently (see [`serde_helpers`]) and every model is reached
//! through [`Document::decode`].

pub mod document;
pub mod serde_helpers;
pub mod shift;

// Re-exports
pub use document::*;
pub use shift::*;

/// Collection names in the document store
pub mod collections {
    /// Closed cash-register sessions (append-only history)
    pub const CLOSED_SHIFTS: &str = "closed_shifts";
    pub const STAFF: &str = "staff";
    pub const ATTENDANCE: &str = "attendance";
    pub const DOCUMENTS: &str = "documents";
}
