//! Period reports over closed shifts
//!
//! The store only filters by status; the date window is applied here so the
//! backing collection needs no composite index.

mod window;

pub use window::DateWindow;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::ShiftRecord;
use shared::util;

/// Summary totals of a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// Σ(cash + digital)
    pub sales: f64,
    pub expenses: f64,
    pub cash: f64,
    pub shift_count: usize,
}

/// Shifts closed inside the window, most recent first, with totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub shifts: Vec<ShiftRecord>,
    pub totals: PeriodTotals,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Filter closed shifts to `window` and reduce them to totals
///
/// Records without a readable `closedAt` are skipped. The sort is stable,
/// so shifts closed at the same instant keep their input order.
pub fn aggregate_period(records: &[ShiftRecord], window: &DateWindow) -> PeriodSummary {
    let tz = window.timezone();

    let mut retained: Vec<(DateTime<Utc>, &ShiftRecord)> = records
        .iter()
        .filter(|record| record.is_closed())
        .filter_map(|record| {
            let Some(raw) = record.closed_at.as_deref() else {
                tracing::debug!(id = %record.id, "Skipping shift without closedAt");
                return None;
            };
            match util::parse_timestamp(raw, tz) {
                Some(closed_at) => Some((closed_at, record)),
                None => {
                    tracing::warn!(
                        id = %record.id,
                        closed_at = raw,
                        "Skipping shift with unreadable closedAt"
                    );
                    None
                }
            }
        })
        .filter(|(closed_at, _)| window.contains(*closed_at))
        .collect();

    retained.sort_by(|a, b| b.0.cmp(&a.0));

    let totals = retained
        .iter()
        .fold(PeriodTotals::default(), |mut acc, (_, record)| {
            let stats = &record.final_sales_stats;
            let cash = finite_or_zero(stats.cash_sales);
            acc.sales += cash + finite_or_zero(stats.digital_sales);
            acc.expenses += finite_or_zero(stats.total_expenses);
            acc.cash += cash;
            acc.shift_count += 1;
            acc
        });

    PeriodSummary {
        shifts: retained.into_iter().map(|(_, record)| record.clone()).collect(),
        totals,
    }
}
