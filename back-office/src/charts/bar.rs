use serde::Serialize;
use shared::models::SoldProduct;

use super::{ChartData, legend, palette};

/// One horizontal bar, width as a percentage of the best seller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: String,
    pub value: u32,
    /// 0..=100, exactly 100 for the maximum
    pub percent: f64,
    pub color_index: usize,
}

/// Bar chart: `percent = 100 * qty / max(qty)`
pub fn bar_chart(products: &[SoldProduct]) -> ChartData {
    let max = products.iter().map(|p| p.qty).max().unwrap_or(0);
    if max == 0 {
        return ChartData::Empty;
    }

    let bars = products
        .iter()
        .enumerate()
        .map(|(i, p)| Bar {
            label: p.name.clone(),
            value: p.qty,
            percent: 100.0 * f64::from(p.qty) / f64::from(max),
            color_index: palette::color_index(i),
        })
        .collect();

    ChartData::Bars {
        bars,
        legend: legend(products),
    }
}
