//! Shift history service
//!
//! Loads closed shifts for a date window and keeps the latest applied
//! report. Date-range changes can fire overlapping loads; each load takes a
//! generation number and a response is only applied if no newer load has
//! started since (latest wins).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use shared::models::ShiftRecord;
use tokio::sync::RwLock;

use super::ShiftRepository;
use crate::charts::{self, ChartData, ChartMode, DonutGeometry};
use crate::config::Config;
use crate::error::StoreError;
use crate::reports::{DateWindow, PeriodSummary, aggregate_period};
use crate::store::DocumentStore;

/// Result of one history load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub generation: u64,
    pub window: DateWindow,
    pub summary: PeriodSummary,
    /// Set when the fetch failed; `summary` is then empty
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "failure_message")]
    pub failure: Option<StoreError>,
}

fn failure_message<S>(failure: &Option<StoreError>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match failure {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}

impl PeriodReport {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeriodLoad {
    /// Newest load; apply it (check `failure` for a notification)
    Ready(PeriodReport),
    /// A newer load started before this one resolved; discard
    Stale { generation: u64 },
}

pub struct ShiftHistory<S: ?Sized> {
    repo: ShiftRepository<S>,
    config: Config,
    geometry: DonutGeometry,
    generation: AtomicU64,
    latest: RwLock<Option<PeriodReport>>,
}

impl<S: DocumentStore + ?Sized> ShiftHistory<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        let repo = ShiftRepository::new(store, config.shift_collection.clone());
        Self {
            repo,
            config,
            geometry: DonutGeometry::default(),
            generation: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    pub fn with_geometry(mut self, geometry: DonutGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn repository(&self) -> &ShiftRepository<S> {
        &self.repo
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch closed shifts and aggregate them over `window`
    ///
    /// A failed fetch still yields `Ready` with zero totals and `failure`
    /// set; it does not replace the last successful report.
    pub async fn load_period(&self, window: DateWindow) -> PeriodLoad {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            generation,
            start = %window.start_date(),
            end = %window.end_date(),
            "Loading shift history"
        );

        let report = match self.repo.find_closed().await {
            Ok(records) => {
                let summary = aggregate_period(&records, &window);
                tracing::info!(
                    generation,
                    fetched = records.len(),
                    retained = summary.totals.shift_count,
                    "Shift history loaded"
                );
                PeriodReport {
                    generation,
                    window,
                    summary,
                    failure: None,
                }
            }
            Err(e) => {
                tracing::warn!(generation, "Failed to load shift history: {}", e);
                PeriodReport {
                    generation,
                    window,
                    summary: PeriodSummary::default(),
                    failure: Some(e),
                }
            }
        };

        let mut latest = self.latest.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding stale shift history response");
            return PeriodLoad::Stale { generation };
        }
        if report.failure.is_none() {
            *latest = Some(report.clone());
        }
        PeriodLoad::Ready(report)
    }

    /// Last successfully applied report
    pub async fn latest(&self) -> Option<PeriodReport> {
        self.latest.read().await.clone()
    }

    /// Product chart over every shift in a report
    pub fn period_product_chart(&self, report: &PeriodReport, mode: ChartMode) -> ChartData {
        let merged = charts::merge_sold_products(
            report
                .summary
                .shifts
                .iter()
                .flat_map(|shift| shift.final_sales_stats.sold_products.iter()),
        );
        charts::build_chart(&merged, mode, self.config.chart_top_n, &self.geometry)
    }

    /// Product chart of a single shift
    pub fn shift_product_chart(&self, shift: &ShiftRecord, mode: ChartMode) -> ChartData {
        charts::build_chart(
            &shift.final_sales_stats.sold_products,
            mode,
            self.config.chart_top_n,
            &self.geometry,
        )
    }
}
