//! # back-office
//!
//! Analytics core for the restaurant back office.
//!
//! ## Scope
//!
//! This crate handles WHAT the dashboards show:
//! - Product charts (bars with staggered reveal, donut sectors, legend)
//! - Period reports over closed cash-register shifts
//! - Access to the document store behind an injected client
//!
//! Rendering, routing and the CRUD screens stay in the front end.
//!
//! ## Example
//!
//! ```ignore
//! use back_office::{Config, DateWindow, MemoryStore, ShiftHistory, PeriodLoad};
//!
//! let config = Config::from_env();
//! let history = ShiftHistory::new(store, config.clone());
//!
//! let window = DateWindow::parse("2024-01-01", "2024-01-31", config.timezone)?;
//! if let PeriodLoad::Ready(report) = history.load_period(window).await {
//!     println!("sales: {}", report.summary.totals.sales);
//! }
//! ```

pub mod charts;
pub mod config;
pub mod error;
pub mod logger;
pub mod reports;
pub mod shifts;
pub mod store;

// Re-exports
pub use charts::{ChartData, ChartMode, DonutGeometry, build_chart, top_products};
pub use config::Config;
pub use error::{ReportError, ReportResult, StoreError, StoreResult};
pub use reports::{DateWindow, PeriodSummary, PeriodTotals, aggregate_period};
pub use shifts::{PeriodLoad, PeriodReport, ShiftHistory, ShiftRepository};
pub use store::{DocumentStore, Filter, FilterOp, MemoryStore, OrderBy, Query};
