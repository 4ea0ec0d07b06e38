//! Product charts
//!
//! Turns the sold products of a shift (or of a whole period) into render
//! primitives: bars with percentages, or donut sectors with SVG paths. The
//! engine only ever sees the top-N products by quantity.
//!
//! Both modes return [`ChartData::Empty`] for an empty or all-zero input so
//! the presentation layer can show its empty state instead of geometry.

pub mod bar;
pub mod donut;
pub mod legend;
pub mod palette;
pub mod timing;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::models::SoldProduct;

pub use bar::{Bar, bar_chart};
pub use donut::{DonutGeometry, Point, Slice, SliceShape, donut_chart};
pub use legend::{LegendEntry, legend};
pub use timing::{BarReveal, bar_reveals, reveal_delay};

/// Chart type selected on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Bar,
    Pie,
}

/// Output of the chart engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartData {
    /// Nothing to draw
    Empty,
    Bars {
        bars: Vec<Bar>,
        legend: Vec<LegendEntry>,
    },
    Donut {
        slices: Vec<Slice>,
        legend: Vec<LegendEntry>,
    },
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::Empty)
    }

    pub fn legend(&self) -> &[LegendEntry] {
        match self {
            ChartData::Empty => &[],
            ChartData::Bars { legend, .. } | ChartData::Donut { legend, .. } => legend,
        }
    }
}

/// Top `n` products by quantity, descending
///
/// Stable: products with equal quantity keep their input order.
pub fn top_products(products: &[SoldProduct], n: usize) -> Vec<SoldProduct> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| b.qty.cmp(&a.qty));
    ranked.truncate(n);
    ranked
}

/// Sum quantities and totals by product name, in first-seen order
pub fn merge_sold_products<'a>(
    products: impl IntoIterator<Item = &'a SoldProduct>,
) -> Vec<SoldProduct> {
    let mut merged: Vec<SoldProduct> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for product in products {
        match index.get(product.name.as_str()) {
            Some(&i) => {
                merged[i].qty = merged[i].qty.saturating_add(product.qty);
                merged[i].total += product.total;
            }
            None => {
                index.insert(product.name.as_str(), merged.len());
                merged.push(product.clone());
            }
        }
    }
    merged
}

/// Select the top-N products and build the chart for `mode`
pub fn build_chart(
    products: &[SoldProduct],
    mode: ChartMode,
    top_n: usize,
    geometry: &DonutGeometry,
) -> ChartData {
    let top = top_products(products, top_n);
    match mode {
        ChartMode::Bar => bar_chart(&top),
        ChartMode::Pie => donut_chart(&top, geometry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(qtys: &[u32]) -> Vec<SoldProduct> {
        qtys.iter()
            .enumerate()
            .map(|(i, q)| SoldProduct::new(format!("p{i}"), *q, *q as f64 * 2.5))
            .collect()
    }

    #[test]
    fn test_top_products_keeps_ten() {
        let items = products(&[5, 15, 1, 9, 12, 3, 14, 7, 2, 11, 8, 13, 4, 10, 6]);
        let top = top_products(&items, 10);

        assert_eq!(top.len(), 10);
        let qtys: Vec<u32> = top.iter().map(|p| p.qty).collect();
        assert_eq!(qtys, [15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
        assert!(top.iter().all(|p| p.qty != 5));
    }

    #[test]
    fn test_top_products_ties_are_stable() {
        let items = vec![
            SoldProduct::new("a", 2, 0.0),
            SoldProduct::new("b", 3, 0.0),
            SoldProduct::new("c", 2, 0.0),
        ];
        let names: Vec<_> = top_products(&items, 3).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_build_chart_excludes_eleventh() {
        let items = products(&[5, 15, 1, 9, 12, 3, 14, 7, 2, 11, 8, 13, 4, 10, 6]);
        for mode in [ChartMode::Bar, ChartMode::Pie] {
            let chart = build_chart(&items, mode, 10, &DonutGeometry::default());
            let legend = chart.legend();
            assert_eq!(legend.len(), 10);
            // qty 5 ranks 11th
            assert!(legend.iter().all(|e| e.qty != 5));
        }
    }

    #[test]
    fn test_build_chart_empty() {
        let geometry = DonutGeometry::default();
        assert!(build_chart(&[], ChartMode::Bar, 10, &geometry).is_empty());
        assert!(build_chart(&products(&[0, 0]), ChartMode::Pie, 10, &geometry).is_empty());
    }

    #[test]
    fn test_merge_sold_products() {
        let a = vec![SoldProduct::new("Taco", 2, 5.0), SoldProduct::new("Agua", 1, 1.0)];
        let b = vec![SoldProduct::new("Agua", 3, 3.0), SoldProduct::new("Taco", 1, 2.5)];
        let merged = merge_sold_products(a.iter().chain(b.iter()));

        assert_eq!(
            merged,
            vec![SoldProduct::new("Taco", 3, 7.5), SoldProduct::new("Agua", 4, 4.0)]
        );
    }
}
