//! Layout families.
//!
//! Every family exposes pure functions `(input, config, &Theme) -> Vec<LayoutPrimitive>`.
//! [`tree::org_chart`] is the only fallible one, because parent links can form a cycle.
//!
//! - [`cartesian`]: bar, stacked bar, area, sparkline, scatter, heatmap, bullet
//! - [`arc`]: pie, donut, gauge, progress ring, harvey balls
//! - [`proportional`]: funnel, pyramid, treemap strip, waterfall, bridge
//! - [`radial`]: cycle, loop, flywheel, hub-spoke, mind map, concentric circles,
//!   radar, venn, and the quadrant diagrams
//! - [`tree`]: org chart
//! - [`flow`]: sankey

pub mod arc;
pub mod cartesian;
pub mod flow;
pub mod proportional;
pub mod radial;
pub mod text;
pub mod tree;

use crate::geometry::Point;
use crate::primitive::TextAlign;

/// Text alignment for a label placed outside a circle at `angle` degrees:
/// centered near the vertical axis, left-anchored on the right half.
pub fn align_for_angle(angle: f64) -> TextAlign {
    let a = angle.rem_euclid(360.0);
    if a < 1.0 || (a - 180.0).abs() < 1.0 || a > 359.0 {
        TextAlign::Middle
    } else if a < 180.0 {
        TextAlign::Start
    } else {
        TextAlign::End
    }
}

/// Unit vector of clockwise travel on a circle at `angle` degrees.
pub fn tangent_cw(angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(rad.cos(), rad.sin())
}

/// Triangle pointing along `dir` with its tip at `tip`.
pub fn arrow_head(tip: Point, dir: Point, size: f64) -> Vec<Point> {
    let len = (dir.x * dir.x + dir.y * dir.y).sqrt();
    if len <= f64::EPSILON {
        return vec![tip, tip, tip];
    }
    let (ux, uy) = (dir.x / len, dir.y / len);
    let back = Point::new(tip.x - ux * size, tip.y - uy * size);
    let half = size * 0.5;
    vec![
        tip,
        Point::new(back.x - uy * half, back.y + ux * half),
        Point::new(back.x + uy * half, back.y - ux * half),
    ]
}
