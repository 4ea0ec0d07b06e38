//! Closed-shift history: store access and period loading

mod history;
mod repository;

pub use history::{PeriodLoad, PeriodReport, ShiftHistory};
pub use repository::ShiftRepository;
