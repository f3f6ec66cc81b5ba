//! Radial and quadrant diagrams.
//!
//! Ring diagrams place `N` items at `angle_i = start + i * 360/N`, clockwise from
//! 12 o'clock; `N = 1` gets a full 360° step and sits at the start angle. Quadrant
//! diagrams place items at `(x%, y%)` inside a square instead of on a circle.
//! Items keep input order and take `palette[i % len]`.

use serde::{Deserialize, Serialize};

use super::text::{truncate_to_width, wrap_to_width};
use super::{align_for_angle, arrow_head, tangent_cw};
use crate::geometry::{polar, Padding, Point, Rect, DEFAULT_CANVAS};
use crate::models::{MindMapBranch, QuadrantItem, RadarSeries};
use crate::primitive::{arc_path, LayoutPrimitive, Paint, PathCmd, Role, TextAlign};
use crate::scale::{max_floor, normalize};
use crate::style::Theme;

/// Angle between neighbours on a ring of `n` items. Never divides by zero.
#[inline]
pub fn angle_step(n: usize) -> f64 {
    360.0 / n.max(1) as f64
}

/// Angles and positions of `n` items evenly spaced on a circle.
pub fn radial_positions(n: usize, center: Point, radius: f64, start_angle: f64) -> Vec<(f64, Point)> {
    let step = angle_step(n);
    (0..n)
        .map(|i| {
            let a = start_angle + i as f64 * step;
            (a, polar(center, radius, a))
        })
        .collect()
}

/// Angles of `m` children fanned across `spread` degrees around `center_angle`.
/// A spread of 360° or more distributes them around a full ring.
pub fn fan_angles(m: usize, center_angle: f64, spread: f64) -> Vec<f64> {
    if m == 0 {
        return Vec::new();
    }
    if spread >= 360.0 {
        return (0..m).map(|j| center_angle + j as f64 * angle_step(m)).collect();
    }
    let step = spread / m as f64;
    (0..m)
        .map(|j| center_angle + (j as f64 - (m as f64 - 1.0) / 2.0) * step)
        .collect()
}

fn ring_radius(canvas: &Rect, explicit: Option<f64>, margin: f64) -> f64 {
    explicit.unwrap_or_else(|| (canvas.width.min(canvas.height) / 2.0 - margin).max(1.0))
}

/// Label inside a node circle, wrapped to two lines when needed.
fn node_labels(center: Point, radius: f64, text: &str, item: Option<usize>, theme: &Theme) -> Vec<LayoutPrimitive> {
    let font = theme.font_px;
    let lines = wrap_to_width(text, font, radius * 1.7, 2);
    let first_y = center.y - (lines.len() as f64 - 1.0) * font * 0.6;
    lines
        .into_iter()
        .enumerate()
        .map(|(k, line)| {
            let label = LayoutPrimitive::label(
                Point::new(center.x, first_y + k as f64 * font * 1.2),
                line,
                TextAlign::Middle,
                font,
                theme.background,
            );
            LayoutPrimitive { item, ..label }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub canvas: Rect,
    /// Ring radius; derived from the canvas when `None`.
    pub radius: Option<f64>,
    pub node_radius: f64,
    pub start_angle: f64,
    pub arrow_size: f64,
    /// Clearance between a node's edge and the connector ends.
    pub connector_gap: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            node_radius: 56.0,
            start_angle: 0.0,
            arrow_size: 12.0,
            connector_gap: 6.0,
        }
    }
}

fn ring_nodes(items: &[String], center: Point, radius: f64, cfg: &CycleConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let mut out = Vec::new();
    for (i, (label, (_, at))) in items
        .iter()
        .zip(radial_positions(items.len(), center, radius, cfg.start_angle))
        .enumerate()
    {
        out.push(
            LayoutPrimitive::circle(at, cfg.node_radius, Paint::fill(theme.palette.color(i)), Role::Mark).for_item(i),
        );
        out.extend(node_labels(at, cfg.node_radius, label, Some(i), theme));
    }
    out
}

/// Cycle: nodes on a ring with straight arrows from each node to the next.
pub fn cycle_diagram(items: &[String], cfg: &CycleConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let radius = ring_radius(&cfg.canvas, cfg.radius, cfg.node_radius + 16.0);
    let positions = radial_positions(items.len(), center, radius, cfg.start_angle);
    let n = items.len();
    let mut out = Vec::new();
    if n > 1 {
        let trim = cfg.node_radius + cfg.connector_gap;
        for i in 0..n {
            let a = positions[i].1;
            let b = positions[(i + 1) % n].1;
            if a.distance(b) <= trim * 2.0 {
                continue;
            }
            let from = a.toward(b, trim);
            let to = b.toward(a, trim);
            let dir = Point::new(to.x - from.x, to.y - from.y);
            out.push(
                LayoutPrimitive::line(from, to.toward(from, cfg.arrow_size * 0.5), Paint::stroke(theme.guide, 2.0), Role::Connector)
                    .for_item(i),
            );
            out.push(
                LayoutPrimitive::polygon(arrow_head(to, dir, cfg.arrow_size), Paint::fill(theme.guide), Role::Connector)
                    .for_item(i),
            );
        }
    }
    out.extend(ring_nodes(items, center, radius, cfg, theme));
    out
}

/// Loop: nodes on a ring joined by arcs that follow the ring.
pub fn loop_diagram(items: &[String], cfg: &CycleConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let radius = ring_radius(&cfg.canvas, cfg.radius, cfg.node_radius + 16.0);
    let n = items.len();
    let step = angle_step(n);
    // angular clearance occupied by a node plus its gap
    let clear = ((cfg.node_radius + cfg.connector_gap) / radius).to_degrees();
    let mut out = Vec::new();
    if n > 1 && clear * 2.0 < step {
        for i in 0..n {
            let a0 = cfg.start_angle + i as f64 * step + clear;
            let a1 = cfg.start_angle + (i + 1) as f64 * step - clear;
            let tip = polar(center, radius, a1);
            let dir = tangent_cw(a1);
            let shaft_end = polar(center, radius, a1 - (cfg.arrow_size * 0.5 / radius).to_degrees());
            let cmds = vec![
                PathCmd::MoveTo(polar(center, radius, a0)),
                PathCmd::ArcTo {
                    radius,
                    large_arc: a1 - a0 > 180.0,
                    sweep: true,
                    to: shaft_end,
                },
            ];
            out.push(LayoutPrimitive::path(cmds, Paint::stroke(theme.guide, 2.0), Role::Connector).for_item(i));
            out.push(
                LayoutPrimitive::polygon(arrow_head(tip, dir, cfg.arrow_size), Paint::fill(theme.guide), Role::Connector)
                    .for_item(i),
            );
        }
    }
    out.extend(ring_nodes(items, center, radius, cfg, theme));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlywheelConfig {
    pub canvas: Rect,
    /// Outer ring radius; derived from the canvas when `None`.
    pub radius: Option<f64>,
    pub thickness: f64,
    /// Empty angle between neighbouring segments.
    pub gap_angle: f64,
    pub hub_radius: f64,
    /// Angular length of each segment's arrow tip.
    pub arrow_angle: f64,
    pub label_offset: f64,
}

impl Default for FlywheelConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            thickness: 56.0,
            gap_angle: 6.0,
            hub_radius: 80.0,
            arrow_angle: 6.0,
            label_offset: 24.0,
        }
    }
}

/// Flywheel: a ring split into one arrow-tipped segment per item, with a hub.
pub fn flywheel(hub_label: &str, items: &[String], cfg: &FlywheelConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let outer = ring_radius(&cfg.canvas, cfg.radius, 96.0);
    let inner = (outer - cfg.thickness).max(0.0);
    let mid_r = (outer + inner) / 2.0;
    let n = items.len();
    let step = angle_step(n);
    let sweep = (step - cfg.gap_angle).max(0.0);
    let mut out = Vec::new();

    for (i, label) in items.iter().enumerate() {
        let at = i as f64 * step;
        let start = at - sweep / 2.0;
        let color = theme.palette.color(i);
        out.push(LayoutPrimitive::path(arc_path(center, outer, inner, start, sweep), Paint::fill(color), Role::Mark).for_item(i));
        if cfg.gap_angle > 0.0 {
            let end = start + sweep;
            out.push(
                LayoutPrimitive::polygon(
                    vec![
                        polar(center, outer, end),
                        polar(center, mid_r, end + cfg.arrow_angle.min(cfg.gap_angle)),
                        polar(center, inner, end),
                    ],
                    Paint::fill(color),
                    Role::Mark,
                )
                .for_item(i),
            );
        }
        out.push(
            LayoutPrimitive::label(
                polar(center, outer + cfg.label_offset, at),
                truncate_to_width(label, theme.font_px, 180.0),
                align_for_angle(at),
                theme.font_px,
                theme.text,
            )
            .for_item(i),
        );
    }
    if cfg.hub_radius > 0.0 && cfg.hub_radius < inner {
        out.push(LayoutPrimitive::circle(center, cfg.hub_radius, Paint::fill(theme.neutral), Role::Track));
        out.extend(
            wrap_to_width(hub_label, theme.font_px, cfg.hub_radius * 1.7, 2)
                .into_iter()
                .enumerate()
                .map(|(k, line)| {
                    LayoutPrimitive::label(
                        Point::new(center.x, center.y + (k as f64 - 0.5) * theme.font_px * 1.2),
                        line,
                        TextAlign::Middle,
                        theme.font_px,
                        theme.background,
                    )
                }),
        );
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSpokeConfig {
    pub canvas: Rect,
    pub radius: Option<f64>,
    pub hub_radius: f64,
    pub node_radius: f64,
    pub start_angle: f64,
}

impl Default for HubSpokeConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            hub_radius: 72.0,
            node_radius: 52.0,
            start_angle: 0.0,
        }
    }
}

/// Hub and spoke: a central hub with one spoke per item.
pub fn hub_spoke(hub: &str, spokes: &[String], cfg: &HubSpokeConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if spokes.is_empty() && hub.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let radius = ring_radius(&cfg.canvas, cfg.radius, cfg.node_radius + 16.0);
    let mut out = Vec::new();
    for (i, (a, at)) in radial_positions(spokes.len(), center, radius, cfg.start_angle)
        .into_iter()
        .enumerate()
    {
        out.push(
            LayoutPrimitive::line(
                polar(center, cfg.hub_radius, a),
                polar(center, radius - cfg.node_radius, a),
                Paint::stroke(theme.guide, 2.0),
                Role::Connector,
            )
            .for_item(i),
        );
        out.push(
            LayoutPrimitive::circle(at, cfg.node_radius, Paint::fill(theme.palette.color(i)), Role::Mark).for_item(i),
        );
        out.extend(node_labels(at, cfg.node_radius, &spokes[i], Some(i), theme));
    }
    out.push(LayoutPrimitive::circle(center, cfg.hub_radius, Paint::fill(theme.neutral), Role::Mark));
    out.extend(node_labels(center, cfg.hub_radius, hub, None, theme));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindMapConfig {
    pub canvas: Rect,
    /// Radius of the primary branch ring.
    pub radius: Option<f64>,
    pub root_radius: f64,
    pub branch_radius: f64,
    /// Distance from a branch node to its children.
    pub child_distance: f64,
    pub child_radius: f64,
    /// Angular fan of each branch's children, centered on the outward direction.
    pub child_spread: f64,
    pub start_angle: f64,
}

impl Default for MindMapConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            root_radius: 64.0,
            branch_radius: 44.0,
            child_distance: 96.0,
            child_radius: 8.0,
            child_spread: 120.0,
            start_angle: 0.0,
        }
    }
}

/// Mind map: root in the center, branches on a ring, each branch's children
/// fanned on a secondary ring around it.
pub fn mind_map(root: &str, branches: &[MindMapBranch], cfg: &MindMapConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if branches.is_empty() && root.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let radius = ring_radius(&cfg.canvas, cfg.radius, cfg.child_distance + cfg.branch_radius + 24.0);
    let font = theme.font_px;
    let mut connectors = Vec::new();
    let mut nodes = Vec::new();

    for (i, (branch, (a, at))) in branches
        .iter()
        .zip(radial_positions(branches.len(), center, radius, cfg.start_angle))
        .enumerate()
    {
        let color = theme.palette.color(i);
        connectors.push(
            LayoutPrimitive::line(
                center.toward(at, cfg.root_radius),
                at.toward(center, cfg.branch_radius),
                Paint::stroke(color, 3.0),
                Role::Connector,
            )
            .for_item(i),
        );
        nodes.push(LayoutPrimitive::circle(at, cfg.branch_radius, Paint::fill(color), Role::Mark).for_item(i));
        nodes.extend(node_labels(at, cfg.branch_radius, &branch.label, Some(i), theme));

        for (child, ca) in branch.children.iter().zip(fan_angles(branch.children.len(), a, cfg.child_spread)) {
            let cp = polar(at, cfg.child_distance, ca);
            connectors.push(
                LayoutPrimitive::line(
                    at.toward(cp, cfg.branch_radius),
                    cp.toward(at, cfg.child_radius),
                    Paint::stroke(color, 1.5).with_opacity(0.7),
                    Role::Connector,
                )
                .for_item(i),
            );
            nodes.push(
                LayoutPrimitive::circle(cp, cfg.child_radius, Paint::fill(color).with_opacity(0.6), Role::Mark)
                    .for_item(i),
            );
            nodes.push(
                LayoutPrimitive::label(
                    polar(cp, cfg.child_radius + 6.0, ca),
                    truncate_to_width(child, font, 160.0),
                    align_for_angle(ca),
                    font * 0.9,
                    theme.text,
                )
                .for_item(i),
            );
        }
    }
    connectors.extend(nodes);
    connectors.push(LayoutPrimitive::circle(center, cfg.root_radius, Paint::fill(theme.neutral), Role::Mark));
    connectors.extend(node_labels(center, cfg.root_radius, root, None, theme));
    connectors
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentricConfig {
    pub canvas: Rect,
    /// Radius of the outermost ring.
    pub max_radius: Option<f64>,
}

impl Default for ConcentricConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            max_radius: None,
        }
    }
}

/// Radius of ring `i` of `n`, outermost first: `max_r * (n - i) / n`.
pub fn ring_radii(n: usize, max_radius: f64) -> Vec<f64> {
    (0..n).map(|i| max_radius * (n - i) as f64 / n as f64).collect()
}

/// Concentric circles, outermost ring first so inner rings draw on top.
pub fn concentric_circles(rings: &[String], cfg: &ConcentricConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if rings.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let max_r = ring_radius(&cfg.canvas, cfg.max_radius, 16.0);
    let radii = ring_radii(rings.len(), max_r);
    let mut out = Vec::with_capacity(rings.len() * 2);
    for (i, r) in radii.iter().enumerate() {
        out.push(
            LayoutPrimitive::circle(
                center,
                *r,
                Paint::fill(theme.palette.color(i)).with_stroke(theme.background, 2.0),
                Role::Mark,
            )
            .for_item(i),
        );
    }
    for (i, (label, r)) in rings.iter().zip(&radii).enumerate() {
        let next = radii.get(i + 1).copied().unwrap_or(0.0);
        let band = r - next;
        out.push(
            LayoutPrimitive::label(
                Point::new(center.x, center.y - (r + next) / 2.0),
                truncate_to_width(label, theme.font_px, (band * 3.0).max(next * 1.4)),
                TextAlign::Middle,
                theme.font_px,
                theme.background,
            )
            .for_item(i),
        );
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub canvas: Rect,
    pub radius: Option<f64>,
    /// Number of concentric grid polygons.
    pub levels: usize,
    pub max_value: Option<f64>,
    pub fill_opacity: f64,
    pub show_markers: bool,
    pub label_offset: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            levels: 4,
            max_value: None,
            fill_opacity: 0.25,
            show_markers: true,
            label_offset: 16.0,
        }
    }
}

/// Radar chart: grid polygons, one spoke per axis and one polygon per series.
pub fn radar_chart(axes: &[String], series: &[RadarSeries], cfg: &RadarConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if axes.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let radius = ring_radius(&cfg.canvas, cfg.radius, 72.0);
    let n = axes.len();
    let max = cfg
        .max_value
        .filter(|m| *m > 0.0)
        .unwrap_or_else(|| max_floor(series.iter().flat_map(|s| s.values.iter().copied())));
    let guide = Paint::stroke(theme.guide, 1.0);
    let mut out = Vec::new();

    for level in 1..=cfg.levels {
        let r = radius * level as f64 / cfg.levels as f64;
        let ring: Vec<Point> = radial_positions(n, center, r, 0.0).into_iter().map(|(_, p)| p).collect();
        out.push(LayoutPrimitive::polygon(ring, guide.clone(), Role::Guide));
    }
    for (_, tip) in radial_positions(n, center, radius, 0.0) {
        out.push(LayoutPrimitive::line(center, tip, guide.clone(), Role::Guide));
    }
    for (i, s) in series.iter().enumerate() {
        let color = theme.palette.color(i);
        let pts: Vec<Point> = (0..n)
            .map(|k| {
                let v = s.values.get(k).copied().unwrap_or(0.0);
                polar(center, normalize(v, 0.0, max) * radius, k as f64 * angle_step(n))
            })
            .collect();
        out.push(
            LayoutPrimitive::polygon(
                pts.clone(),
                Paint::fill(color).with_opacity(cfg.fill_opacity),
                Role::Mark,
            )
            .for_item(i),
        );
        out.push(LayoutPrimitive::polygon(pts.clone(), Paint::stroke(color, 2.0), Role::Mark).for_item(i));
        if cfg.show_markers {
            out.extend(
                pts.into_iter()
                    .map(|p| LayoutPrimitive::circle(p, 3.5, Paint::fill(color), Role::Mark).for_item(i)),
            );
        }
    }
    for (label, (a, _)) in axes.iter().zip(radial_positions(n, center, radius, 0.0)) {
        out.push(LayoutPrimitive::label(
            polar(center, radius + cfg.label_offset, a),
            truncate_to_width(label, theme.font_px, 160.0),
            align_for_angle(a),
            theme.font_px,
            theme.text,
        ));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VennConfig {
    pub canvas: Rect,
    pub circle_radius: Option<f64>,
    /// Distance of each circle's center from the canvas center, as a fraction
    /// of the circle radius.
    pub overlap_offset: f64,
    pub fill_opacity: f64,
    /// Text placed on the shared center.
    pub center_label: Option<String>,
}

impl Default for VennConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            circle_radius: None,
            overlap_offset: 0.55,
            fill_opacity: 0.45,
            center_label: None,
        }
    }
}

/// Venn diagram: overlapping circles arranged around the canvas center.
///
/// The first circle sits at `-180/N` degrees so two sets line up side by side
/// and three form a triangle with the odd one at the bottom.
pub fn venn(sets: &[String], cfg: &VennConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if sets.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let n = sets.len();
    let r = cfg
        .circle_radius
        .unwrap_or_else(|| (cfg.canvas.width.min(cfg.canvas.height) / (2.0 + 2.0 * cfg.overlap_offset) - 16.0).max(1.0));
    let offset = if n == 1 { 0.0 } else { r * cfg.overlap_offset };
    let start = -180.0 / n as f64;
    let mut out = Vec::new();
    let positions = radial_positions(n, center, offset, start);
    for (i, (_, at)) in positions.iter().enumerate() {
        out.push(
            LayoutPrimitive::circle(*at, r, Paint::fill(theme.palette.color(i)).with_opacity(cfg.fill_opacity), Role::Mark)
                .for_item(i),
        );
    }
    for (i, (label, (a, _))) in sets.iter().zip(&positions).enumerate() {
        let anchor = if n == 1 { center } else { polar(center, offset + r * 0.5, *a) };
        out.push(
            LayoutPrimitive::label(anchor, truncate_to_width(label, theme.font_px, r), TextAlign::Middle, theme.font_px, theme.text)
                .for_item(i),
        );
    }
    if n > 1
        && let Some(text) = &cfg.center_label
    {
        out.push(LayoutPrimitive::label(center, text.clone(), TextAlign::Middle, theme.font_px, theme.text));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrantConfig {
    pub canvas: Rect,
    pub padding: Padding,
    /// Titles in reading order: top-left, top-right, bottom-left, bottom-right.
    pub quadrant_labels: [String; 4],
    /// Low and high end labels of the horizontal axis.
    pub x_axis: Option<(String, String)>,
    /// Low and high end labels of the vertical axis.
    pub y_axis: Option<(String, String)>,
    pub item_radius: f64,
    pub highlight_radius: f64,
}

impl Default for QuadrantConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding::uniform(56.0),
            quadrant_labels: Default::default(),
            x_axis: None,
            y_axis: None,
            item_radius: 9.0,
            highlight_radius: 15.0,
        }
    }
}

/// Position of a percentage coordinate inside `square`; `y` grows upward.
/// Both percentages are clamped to `[0, 100]`.
pub fn quadrant_position(square: &Rect, x_pct: f64, y_pct: f64) -> Point {
    Point::new(
        square.x + x_pct.clamp(0.0, 100.0) / 100.0 * square.width,
        square.bottom() - y_pct.clamp(0.0, 100.0) / 100.0 * square.height,
    )
}

fn quadrant_square(cfg: &QuadrantConfig) -> Rect {
    cfg.canvas.inset(&cfg.padding).centered_square()
}

fn quadrant_cells(sq: &Rect) -> [Rect; 4] {
    let hw = sq.width / 2.0;
    let hh = sq.height / 2.0;
    [
        Rect::new(sq.x, sq.y, hw, hh),
        Rect::new(sq.x + hw, sq.y, hw, hh),
        Rect::new(sq.x, sq.y + hh, hw, hh),
        Rect::new(sq.x + hw, sq.y + hh, hw, hh),
    ]
}

fn axis_labels(sq: &Rect, cfg: &QuadrantConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let font = theme.font_px;
    let c = sq.center();
    let mut out = Vec::new();
    if let Some((low, high)) = &cfg.x_axis {
        out.push(LayoutPrimitive::label(Point::new(sq.x, sq.bottom() + font * 1.2), low.clone(), TextAlign::Start, font, theme.text));
        out.push(LayoutPrimitive::label(Point::new(sq.right(), sq.bottom() + font * 1.2), high.clone(), TextAlign::End, font, theme.text));
    }
    if let Some((low, high)) = &cfg.y_axis {
        out.push(LayoutPrimitive::label(Point::new(c.x, sq.bottom() + font * 2.6), low.clone(), TextAlign::Middle, font, theme.text));
        out.push(LayoutPrimitive::label(Point::new(c.x, sq.y - font * 1.2), high.clone(), TextAlign::Middle, font, theme.text));
    }
    out
}

fn quadrant_titles(cells: &[Rect; 4], cfg: &QuadrantConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let font = theme.font_px;
    cells
        .iter()
        .zip(&cfg.quadrant_labels)
        .filter(|(_, t)| !t.is_empty())
        .map(|(cell, title)| {
            LayoutPrimitive::label(
                Point::new(cell.x + 12.0, cell.y + 12.0 + font / 2.0),
                truncate_to_width(title, font, cell.width - 24.0),
                TextAlign::Start,
                font,
                theme.text,
            )
        })
        .collect()
}

/// 2×2 matrix: tinted quadrants with titles, items at their percentage position.
pub fn matrix_quadrant(items: &[QuadrantItem], cfg: &QuadrantConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let sq = quadrant_square(cfg);
    let cells = quadrant_cells(&sq);
    let mut out = Vec::new();
    for (k, cell) in cells.iter().enumerate() {
        out.push(LayoutPrimitive::rect(
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            Paint::fill(theme.palette.color(k)).with_opacity(0.15).with_stroke(theme.background, 2.0),
            Role::Track,
        ));
    }
    out.extend(quadrant_titles(&cells, cfg, theme));
    out.extend(axis_labels(&sq, cfg, theme));
    for (i, item) in items.iter().enumerate() {
        let at = quadrant_position(&sq, item.x, item.y);
        out.push(LayoutPrimitive::circle(at, cfg.item_radius, Paint::fill(theme.palette.color(i)), Role::Mark).for_item(i));
        out.push(
            LayoutPrimitive::label(
                Point::new(at.x + cfg.item_radius + 6.0, at.y),
                truncate_to_width(&item.label, theme.font_px, sq.width / 2.0),
                TextAlign::Start,
                theme.font_px,
                theme.text,
            )
            .for_item(i),
        );
    }
    out
}

/// Priority matrix: quadrant frame with numbered badges; the legend lists
/// each number's label below the square.
pub fn priority_matrix(items: &[QuadrantItem], cfg: &QuadrantConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let sq = quadrant_square(cfg);
    let cells = quadrant_cells(&sq);
    let font = theme.font_px;
    let mut out = Vec::new();
    for cell in &cells {
        out.push(LayoutPrimitive::rect(
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            Paint::stroke(theme.guide, 1.5),
            Role::Guide,
        ));
    }
    out.extend(quadrant_titles(&cells, cfg, theme));
    out.extend(axis_labels(&sq, cfg, theme));
    let badge = cfg.item_radius.max(font * 0.8);
    for (i, item) in items.iter().enumerate() {
        let at = quadrant_position(&sq, item.x, item.y);
        let color = if item.highlight { theme.accent } else { theme.palette.color(i) };
        out.push(LayoutPrimitive::circle(at, badge, Paint::fill(color), Role::Mark).for_item(i));
        out.push(
            LayoutPrimitive::label(at, (i + 1).to_string(), TextAlign::Middle, font * 0.9, theme.background).for_item(i),
        );
        out.push(
            LayoutPrimitive::label(
                Point::new(sq.right() + 16.0, sq.y + font + i as f64 * font * 1.5),
                format!("{}. {}", i + 1, item.label),
                TextAlign::Start,
                font,
                theme.text,
            )
            .for_item(i),
        );
    }
    out
}

/// Competitor map: crosshair axes, items as dots, highlighted items drawn
/// larger in the accent color.
pub fn competitor_map(items: &[QuadrantItem], cfg: &QuadrantConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if items.is_empty() {
        return Vec::new();
    }
    let sq = quadrant_square(cfg);
    let c = sq.center();
    let guide = Paint::stroke(theme.guide, 1.5);
    let mut out = vec![
        LayoutPrimitive::line(Point::new(sq.x, c.y), Point::new(sq.right(), c.y), guide.clone(), Role::Guide),
        LayoutPrimitive::line(Point::new(c.x, sq.y), Point::new(c.x, sq.bottom()), guide, Role::Guide),
    ];
    out.extend(axis_labels(&sq, cfg, theme));
    for (i, item) in items.iter().enumerate() {
        let at = quadrant_position(&sq, item.x, item.y);
        let (r, color) = if item.highlight {
            (cfg.highlight_radius, theme.accent)
        } else {
            (cfg.item_radius, theme.palette.color(i))
        };
        out.push(LayoutPrimitive::circle(at, r, Paint::fill(color), Role::Mark).for_item(i));
        out.push(
            LayoutPrimitive::label(
                Point::new(at.x, at.y - r - theme.font_px * 0.8),
                truncate_to_width(&item.label, theme.font_px, sq.width / 3.0),
                TextAlign::Middle,
                theme.font_px,
                theme.text,
            )
            .for_item(i),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_is_centered_on_outward_angle() {
        let a = fan_angles(3, 90.0, 120.0);
        assert_eq!(a, vec![50.0, 90.0, 130.0]);
        assert_eq!(fan_angles(1, 45.0, 120.0), vec![45.0]);
    }

    #[test]
    fn outermost_ring_first() {
        assert_eq!(ring_radii(4, 200.0), vec![200.0, 150.0, 100.0, 50.0]);
    }
}
