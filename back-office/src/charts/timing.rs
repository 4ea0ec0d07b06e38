//! Reveal timing for bar charts
//!
//! Each bar grows from 0 to its target width after a staggered delay,
//! `(index + 1) * 100ms`, producing a top-down cascade.

use std::time::Duration;

use serde::Serialize;

use super::Bar;

/// Delay step between consecutive bars
pub const REVEAL_STEP: Duration = Duration::from_millis(100);

pub fn reveal_delay(index: usize) -> Duration {
    REVEAL_STEP * (index as u32 + 1)
}

/// Animation instruction for one bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarReveal {
    pub index: usize,
    pub from_percent: f64,
    pub target_percent: f64,
    pub delay: Duration,
}

pub fn bar_reveals(bars: &[Bar]) -> Vec<BarReveal> {
    bars.iter()
        .enumerate()
        .map(|(index, bar)| BarReveal {
            index,
            from_percent: 0.0,
            target_percent: bar.percent,
            delay: reveal_delay(index),
        })
        .collect()
}
