//! Donut chart geometry
//!
//! Slices are laid out clockwise from 0° by accumulating sweep angles.
//! A product holding the whole total cannot be drawn as an arc (start and
//! end points coincide), so it becomes [`SliceShape::FullCircle`].

use serde::Serialize;
use shared::models::SoldProduct;

use super::{ChartData, legend, palette};

/// Canvas placement of the donut
///
/// `inner_radius` is the hole painted over the pie by the renderer; slice
/// paths are full sectors from the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub inner_radius: f64,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
            inner_radius: 50.0,
        }
    }
}

impl DonutGeometry {
    /// Point on the outer circle at `angle_deg`
    pub fn point_at(&self, angle_deg: f64) -> Point {
        let theta = angle_deg.to_radians();
        Point {
            x: self.cx + self.radius * theta.cos(),
            y: self.cy + self.radius * theta.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SliceShape {
    FullCircle,
    #[serde(rename_all = "camelCase")]
    Sector {
        start: Point,
        end: Point,
        /// Sweep above 180°; selects the long arc in the path
        large_arc: bool,
    },
}

impl SliceShape {
    /// SVG path data for this shape
    pub fn path(&self, geometry: &DonutGeometry) -> String {
        let DonutGeometry { cx, cy, radius: r, .. } = *geometry;
        match self {
            SliceShape::FullCircle => {
                // two half arcs; a single arc with equal endpoints draws nothing
                let arc = format!("A {r:.3} {r:.3} 0 1 1");
                format!(
                    "M {:.3} {cy:.3} {arc} {:.3} {cy:.3} {arc} {:.3} {cy:.3} Z",
                    cx - r,
                    cx + r,
                    cx - r,
                )
            }
            SliceShape::Sector {
                start,
                end,
                large_arc,
            } => format!(
                "M {cx:.3} {cy:.3} L {:.3} {:.3} A {r:.3} {r:.3} 0 {} 1 {:.3} {:.3} Z",
                start.x,
                start.y,
                u8::from(*large_arc),
                end.x,
                end.y,
            ),
        }
    }
}

/// One drawn sector of the donut
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub label: String,
    pub value: u32,
    pub color_index: usize,
    pub start_angle_deg: f64,
    pub sweep_angle_deg: f64,
    pub shape: SliceShape,
}

/// Donut chart: `sweep = 360 * qty / total`, zero-quantity products skipped
///
/// Colors follow input position, so a skipped product still consumes its
/// palette slot and the legend stays aligned.
pub fn donut_chart(products: &[SoldProduct], geometry: &DonutGeometry) -> ChartData {
    let total: u64 = products.iter().map(|p| u64::from(p.qty)).sum();
    if total == 0 {
        return ChartData::Empty;
    }

    let mut slices = Vec::with_capacity(products.len());
    let mut accumulated = 0.0_f64;

    for (i, product) in products.iter().enumerate() {
        if product.qty == 0 {
            continue;
        }

        let qty = u64::from(product.qty);
        let sweep = 360.0 * qty as f64 / total as f64;
        let start_angle = accumulated;

        let shape = if qty == total {
            SliceShape::FullCircle
        } else {
            SliceShape::Sector {
                start: geometry.point_at(start_angle),
                end: geometry.point_at(start_angle + sweep),
                large_arc: sweep > 180.0,
            }
        };

        slices.push(Slice {
            label: product.name.clone(),
            value: product.qty,
            color_index: palette::color_index(i),
            start_angle_deg: start_angle,
            sweep_angle_deg: sweep,
            shape,
        });
        accumulated += sweep;
    }

    ChartData::Donut {
        slices,
        legend: legend(products),
    }
}
