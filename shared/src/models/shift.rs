//! Shift Model (closed cash-register sessions)

use serde::{Deserialize, Serialize};

use super::serde_helpers::{amount, list, optional_text, or_default, quantity, text, timestamp};

/// Shift status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    #[default]
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "closed")]
    Closed,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Units of one product sold within a shift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldProduct {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "quantity")]
    pub qty: u32,
    #[serde(default, deserialize_with = "amount")]
    pub total: f64,
}

impl SoldProduct {
    pub fn new(name: impl Into<String>, qty: u32, total: f64) -> Self {
        Self {
            name: name.into(),
            qty,
            total,
        }
    }
}

/// Sales figures frozen when a shift closes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    #[serde(default, deserialize_with = "amount")]
    pub cash_sales: f64,
    #[serde(default, deserialize_with = "amount")]
    pub digital_sales: f64,
    #[serde(default, deserialize_with = "amount")]
    pub qr_sales: f64,
    #[serde(default, deserialize_with = "amount")]
    pub card_sales: f64,
    #[serde(default, deserialize_with = "amount")]
    pub total_expenses: f64,
    #[serde(default, deserialize_with = "amount")]
    pub total_cost_of_goods: f64,
    #[serde(default, deserialize_with = "list")]
    pub sold_products: Vec<SoldProduct>,
}

impl SalesStats {
    /// Gross sales as reported on the history screen (cash + digital)
    pub fn gross_sales(&self) -> f64 {
        self.cash_sales + self.digital_sales
    }
}

/// Shift record - one closed cash-register session
///
/// Immutable once written; the history collection is append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub status: ShiftStatus,
    /// Close time (ISO 8601), absent for open or corrupt records
    #[serde(default, deserialize_with = "timestamp")]
    pub closed_at: Option<String>,
    /// Operator who opened the register
    #[serde(default, deserialize_with = "text")]
    pub opened_by: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub opening_note: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub final_sales_stats: SalesStats,
    /// Cash the register should hold at close
    #[serde(default, deserialize_with = "amount")]
    pub final_cash_calculated: f64,
}

impl ShiftRecord {
    pub fn is_closed(&self) -> bool {
        self.status == ShiftStatus::Closed
    }
}
