use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use back_office::{
    ChartData, ChartMode, Config, DateWindow, DocumentStore, MemoryStore, PeriodLoad, Query,
    ShiftHistory, StoreError, StoreResult,
};
use serde_json::{Map, Value, json};
use shared::models::{Document, SalesStats, ShiftRecord, ShiftStatus, SoldProduct};
use tokio::sync::oneshot;

fn closed_shift(
    closed_at: &str,
    cash: f64,
    digital: f64,
    expenses: f64,
    sold: Vec<SoldProduct>,
) -> ShiftRecord {
    ShiftRecord {
        status: ShiftStatus::Closed,
        closed_at: Some(closed_at.to_string()),
        opened_by: "ana".to_string(),
        final_sales_stats: SalesStats {
            cash_sales: cash,
            digital_sales: digital,
            total_expenses: expenses,
            sold_products: sold,
            ..Default::default()
        },
        ..Default::default()
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let history = ShiftHistory::new(store.clone(), Config::default());
    let repo = history.repository();

    repo.record_closed(&closed_shift(
        "2024-01-05T10:00",
        100.0,
        50.0,
        20.0,
        vec![SoldProduct::new("Taco", 4, 10.0), SoldProduct::new("Agua", 2, 2.0)],
    ))
    .await
    .unwrap();
    repo.record_closed(&closed_shift(
        "2024-01-10T10:00",
        200.0,
        0.0,
        10.0,
        vec![SoldProduct::new("Agua", 6, 6.0)],
    ))
    .await
    .unwrap();
    repo.record_closed(&closed_shift("2024-02-02T09:00", 999.0, 999.0, 999.0, vec![]))
        .await
        .unwrap();

    // written by a terminal without a close time
    store
        .insert_record(
            "closed_shifts",
            json!({ "status": "closed", "finalSalesStats": { "cashSales": 500 } })
                .as_object()
                .cloned()
                .unwrap(),
        )
        .await
        .unwrap();
    // still open, never reaches the aggregator
    store
        .insert_record(
            "closed_shifts",
            json!({
                "status": "open",
                "closedAt": "2024-01-07T10:00",
                "finalSalesStats": { "cashSales": 700 }
            })
                .as_object()
                .cloned()
                .unwrap(),
        )
        .await
        .unwrap();

    store
}

fn january() -> DateWindow {
    DateWindow::parse("2024-01-01", "2024-01-31", chrono_tz::UTC).unwrap()
}

#[tokio::test]
async fn test_load_period_totals() {
    let store = seeded_store().await;
    let history = ShiftHistory::new(store, Config::default());

    let PeriodLoad::Ready(report) = history.load_period(january()).await else {
        panic!("expected ready");
    };

    assert!(!report.is_failed());
    assert_eq!(report.summary.totals.sales, 350.0);
    assert_eq!(report.summary.totals.expenses, 30.0);
    assert_eq!(report.summary.totals.cash, 300.0);
    assert_eq!(report.summary.shifts.len(), 2);
    assert_eq!(report.summary.shifts[0].closed_at.as_deref(), Some("2024-01-10T10:00"));

    let latest = history.latest().await.unwrap();
    assert_eq!(latest, report);

    // same input, same totals
    let PeriodLoad::Ready(again) = history.load_period(january()).await else {
        panic!("expected ready");
    };
    assert_eq!(again.summary, report.summary);
    assert_eq!(again.generation, report.generation + 1);
}

#[tokio::test]
async fn test_period_product_chart_merges_shifts() {
    let store = seeded_store().await;
    let history = ShiftHistory::new(store, Config::default());

    let PeriodLoad::Ready(report) = history.load_period(january()).await else {
        panic!("expected ready");
    };

    let chart = history.period_product_chart(&report, ChartMode::Bar);
    let ChartData::Bars { bars, legend } = chart else {
        panic!("expected bars");
    };
    // Agua 8, Taco 4
    assert_eq!(bars[0].label, "Agua");
    assert_eq!(bars[0].value, 8);
    assert_eq!(bars[0].percent, 100.0);
    assert_eq!(bars[1].percent, 50.0);
    assert_eq!(legend[1].name, "Taco");

    let chart = history.period_product_chart(&report, ChartMode::Pie);
    let ChartData::Donut { slices, .. } = chart else {
        panic!("expected donut");
    };
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].sweep_angle_deg, 240.0);
}

#[tokio::test]
async fn test_shift_product_chart_empty_state() {
    let history = ShiftHistory::new(Arc::new(MemoryStore::new()), Config::default());
    let shift = closed_shift("2024-01-05T10:00", 0.0, 0.0, 0.0, vec![]);

    assert!(history.shift_product_chart(&shift, ChartMode::Pie).is_empty());
    assert!(history.shift_product_chart(&shift, ChartMode::Bar).is_empty());
}

/// Store that fails every call
struct OfflineStore;

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn query_records(&self, _collection: &str, _query: &Query) -> StoreResult<Vec<Document>> {
        Err(StoreError::Unavailable("network down".into()))
    }

    async fn insert_record(
        &self,
        _collection: &str,
        _fields: Map<String, Value>,
    ) -> StoreResult<String> {
        Err(StoreError::PermissionDenied("read only".into()))
    }

    async fn delete_record(&self, _collection: &str, _id: &str) -> StoreResult<bool> {
        Err(StoreError::PermissionDenied("read only".into()))
    }
}

#[tokio::test]
async fn test_fetch_failure_reports_zero_and_signals() {
    let history = ShiftHistory::new(Arc::new(OfflineStore), Config::default());

    let PeriodLoad::Ready(report) = history.load_period(january()).await else {
        panic!("expected ready");
    };

    assert_eq!(report.failure, Some(StoreError::Unavailable("network down".into())));
    assert_eq!(report.summary.totals.sales, 0.0);
    assert!(report.summary.shifts.is_empty());
    assert!(history.latest().await.is_none());
}

#[tokio::test]
async fn test_dyn_store() {
    let store: Arc<dyn DocumentStore> = seeded_store().await;
    let history = ShiftHistory::new(store, Config::default());
    assert!(matches!(history.load_period(january()).await, PeriodLoad::Ready(_)));
}

/// Holds the first query until released
struct GatedStore {
    inner: Arc<MemoryStore>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl DocumentStore for GatedStore {
    async fn query_records(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.inner.query_records(collection, query).await
    }

    async fn insert_record(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<String> {
        self.inner.insert_record(collection, fields).await
    }

    async fn delete_record(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.inner.delete_record(collection, id).await
    }
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let (tx, rx) = oneshot::channel();
    let store = Arc::new(GatedStore {
        inner: seeded_store().await,
        gate: Mutex::new(Some(rx)),
    });
    let history = ShiftHistory::new(store, Config::default());

    let february = DateWindow::parse("2024-02-01", "2024-02-29", chrono_tz::UTC).unwrap();

    let (slow, fast) = tokio::join!(history.load_period(january()), async {
        let load = history.load_period(february).await;
        let _ = tx.send(());
        load
    });

    assert_eq!(slow, PeriodLoad::Stale { generation: 1 });
    let PeriodLoad::Ready(report) = fast else {
        panic!("expected ready");
    };
    assert_eq!(report.generation, 2);
    assert_eq!(report.summary.totals.sales, 1998.0);

    let latest = history.latest().await.unwrap();
    assert_eq!(latest.window, february);
}

#[tokio::test]
async fn test_malformed_side_fields_still_count() {
    let store = Arc::new(MemoryStore::new());
    for fields in [
        json!({
            "status": "closed",
            "closedAt": "2024-01-05T10:00",
            "openingNote": 42,
            "finalSalesStats": { "cashSales": 100, "digitalSales": 50, "totalExpenses": 20 }
        }),
        json!({
            "status": "closed",
            "closedAt": "2024-01-06T10:00",
            "finalSalesStats": { "cashSales": 10, "soldProducts": [{ "name": 7, "qty": 1 }] }
        }),
    ] {
        store
            .insert_record("closed_shifts", fields.as_object().cloned().unwrap())
            .await
            .unwrap();
    }
    let history = ShiftHistory::new(store, Config::default());

    let PeriodLoad::Ready(report) = history.load_period(january()).await else {
        panic!("expected ready");
    };

    let totals = report.summary.totals;
    assert_eq!(totals.sales, 160.0);
    assert_eq!(totals.expenses, 20.0);
    assert_eq!(totals.cash, 110.0);
    assert_eq!(totals.shift_count, 2);

    let chart = history.period_product_chart(&report, ChartMode::Bar);
    let ChartData::Bars { bars, .. } = chart else {
        panic!("expected bars");
    };
    assert_eq!(bars[0].label, "7");
}
