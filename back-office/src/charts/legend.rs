use serde::Serialize;
use shared::models::SoldProduct;

use super::palette;

/// One legend row: color swatch, product name, raw quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub name: String,
    pub qty: u32,
}

/// Legend in input order, zero-quantity products included
pub fn legend(products: &[SoldProduct]) -> Vec<LegendEntry> {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| LegendEntry {
            color: palette::color_for(i),
            name: p.name.clone(),
            qty: p.qty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_order_and_colors() {
        let products: Vec<_> = (0..12)
            .map(|i| SoldProduct::new(format!("p{i}"), 12 - i, 0.0))
            .collect();
        let entries = legend(&products);

        assert_eq!(entries.len(), 12);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.name, format!("p{i}"));
            assert_eq!(entry.color, palette::PALETTE[i % 10]);
        }
        assert_eq!(legend(&products), entries);
    }
}
