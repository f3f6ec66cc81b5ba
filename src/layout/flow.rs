//! Two-column sankey layout.
//!
//! Sources are the nodes that appear as `from`, destinations the nodes that appear
//! as `to`. Declared nodes keep their declared order; the rest follow in
//! first-appearance order. Heights and ribbon thicknesses are
//! shares of the column's usable height, so every node's bar equals the sum of the
//! ribbons touching it on that side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::text::{format_value, truncate_to_width};
use crate::geometry::{Padding, Point, Rect, DEFAULT_CANVAS};
use crate::models::{FlowEdge, SankeyNode};
use crate::primitive::{LayoutPrimitive, Paint, PathCmd, Role, TextAlign};
use crate::scale::{clamp_non_negative, finite_or_zero};
use crate::style::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub node_width: f64,
    /// Vertical gap between stacked nodes in a column.
    pub gap: f64,
    pub label_gap: f64,
    pub ribbon_opacity: f64,
    pub show_values: bool,
    pub locale: String,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding {
                top: 40.0,
                right: 160.0,
                bottom: 40.0,
                left: 160.0,
            },
            node_width: 18.0,
            gap: 12.0,
            label_gap: 8.0,
            ribbon_opacity: 0.4,
            show_values: true,
            locale: "en".into(),
        }
    }
}

/// A node's bar in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeBar {
    pub id: String,
    pub label: String,
    /// Sum of the (weighted) edge values touching this node on this side.
    pub value: f64,
    pub rect: Rect,
}

/// One edge's band: thickness plus its offsets inside the two node bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ribbon {
    /// Index into the input edge list.
    pub edge: usize,
    /// Index into [`SankeyBands::sources`].
    pub source: usize,
    /// Index into [`SankeyBands::targets`].
    pub target: usize,
    /// Thickness at the source bar.
    pub thickness: f64,
    /// Thickness at the destination bar; differs from `thickness` only when the
    /// columns have different gap totals.
    pub target_thickness: f64,
    /// Top of the band at the source bar.
    pub source_y: f64,
    /// Top of the band at the destination bar.
    pub target_y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyBands {
    pub sources: Vec<NodeBar>,
    pub targets: Vec<NodeBar>,
    pub ribbons: Vec<Ribbon>,
    /// Usable height of the source column (height minus gaps).
    pub source_usable: f64,
    pub target_usable: f64,
}

/// Column order: declared nodes first (in declared order), then nodes only
/// referenced by edges, in first-appearance order.
fn column<'a>(declared: &[&'a str], used: impl Iterator<Item = &'a str>) -> (Vec<&'a str>, HashMap<&'a str, usize>) {
    let used: Vec<&str> = used.collect();
    let mut order: Vec<&str> = Vec::new();
    let mut slot = HashMap::new();
    let candidates = declared.iter().copied().filter(|id| used.contains(id)).chain(used.iter().copied());
    for id in candidates {
        slot.entry(id).or_insert_with(|| {
            order.push(id);
            order.len() - 1
        });
    }
    (order, slot)
}

fn stack_column(
    ids: &[&str],
    sums: &[f64],
    total: f64,
    x: f64,
    plot: &Rect,
    cfg: &SankeyConfig,
    labels: &HashMap<&str, &str>,
) -> (Vec<NodeBar>, f64) {
    let usable = (plot.height - cfg.gap * ids.len().saturating_sub(1) as f64).max(0.0);
    let mut y = plot.y;
    let bars = ids
        .iter()
        .zip(sums)
        .map(|(id, sum)| {
            let h = if total > 0.0 { sum / total * usable } else { 0.0 };
            let bar = NodeBar {
                id: (*id).to_string(),
                label: labels.get(id).copied().unwrap_or(*id).to_string(),
                value: *sum,
                rect: Rect::new(x, y, cfg.node_width, h),
            };
            y += h + cfg.gap;
            bar
        })
        .collect();
    (bars, usable)
}

/// Node bars and ribbon placement without building primitives.
///
/// Negative and non-finite edge values count as 0. When every value is 0 each
/// edge is weighted 1 so the columns split evenly.
pub fn sankey_bands(nodes: &[SankeyNode], flows: &[FlowEdge], cfg: &SankeyConfig) -> SankeyBands {
    if flows.is_empty() {
        return SankeyBands::default();
    }
    let mut weights: Vec<f64> = flows
        .iter()
        .map(|f| clamp_non_negative(finite_or_zero(f.value)))
        .collect();
    if weights.iter().sum::<f64>() <= 0.0 {
        weights.iter_mut().for_each(|w| *w = 1.0);
    }
    let total: f64 = weights.iter().sum();

    let labels: HashMap<&str, &str> = nodes
        .iter()
        .filter_map(|n| n.label.as_deref().map(|l| (n.id.as_str(), l)))
        .collect();
    let declared: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let (src_ids, src_slot) = column(&declared, flows.iter().map(|f| f.from.as_str()));
    let (dst_ids, dst_slot) = column(&declared, flows.iter().map(|f| f.to.as_str()));

    let mut src_sum = vec![0.0; src_ids.len()];
    let mut dst_sum = vec![0.0; dst_ids.len()];
    for (f, w) in flows.iter().zip(&weights) {
        src_sum[src_slot[f.from.as_str()]] += w;
        dst_sum[dst_slot[f.to.as_str()]] += w;
    }

    let plot = cfg.canvas.inset(&cfg.padding);
    let (sources, source_usable) = stack_column(&src_ids, &src_sum, total, plot.x, &plot, cfg, &labels);
    let (targets, target_usable) = stack_column(
        &dst_ids,
        &dst_sum,
        total,
        plot.right() - cfg.node_width,
        &plot,
        cfg,
        &labels,
    );

    let mut src_off: Vec<f64> = sources.iter().map(|b| b.rect.y).collect();
    let mut dst_off: Vec<f64> = targets.iter().map(|b| b.rect.y).collect();
    let ribbons = flows
        .iter()
        .zip(&weights)
        .enumerate()
        .map(|(edge, (f, w))| {
            let source = src_slot[f.from.as_str()];
            let target = dst_slot[f.to.as_str()];
            let share = w / total;
            let ribbon = Ribbon {
                edge,
                source,
                target,
                thickness: share * source_usable,
                target_thickness: share * target_usable,
                source_y: src_off[source],
                target_y: dst_off[target],
            };
            src_off[source] += share * source_usable;
            dst_off[target] += share * target_usable;
            ribbon
        })
        .collect();

    SankeyBands {
        sources,
        targets,
        ribbons,
        source_usable,
        target_usable,
    }
}

/// Closed band from `(x0, y0)` to `(x1, y1)` with cubic sides.
fn ribbon_path(x0: f64, y0: f64, t0: f64, x1: f64, y1: f64, t1: f64) -> Vec<PathCmd> {
    let mx = (x0 + x1) / 2.0;
    vec![
        PathCmd::MoveTo(Point::new(x0, y0)),
        PathCmd::CubicTo {
            c1: Point::new(mx, y0),
            c2: Point::new(mx, y1),
            to: Point::new(x1, y1),
        },
        PathCmd::LineTo(Point::new(x1, y1 + t1)),
        PathCmd::CubicTo {
            c1: Point::new(mx, y1 + t1),
            c2: Point::new(mx, y0 + t0),
            to: Point::new(x0, y0 + t0),
        },
        PathCmd::Close,
    ]
}

/// Sankey diagram: ribbons first, then node bars and outside labels.
pub fn sankey(nodes: &[SankeyNode], flows: &[FlowEdge], cfg: &SankeyConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let bands = sankey_bands(nodes, flows, cfg);
    if bands.ribbons.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for r in &bands.ribbons {
        if r.thickness <= 0.0 {
            continue;
        }
        let src = &bands.sources[r.source];
        let dst = &bands.targets[r.target];
        out.push(
            LayoutPrimitive::path(
                ribbon_path(src.rect.right(), r.source_y, r.thickness, dst.rect.x, r.target_y, r.target_thickness),
                Paint::fill(theme.palette.color(r.source)).with_opacity(cfg.ribbon_opacity),
                Role::Connector,
            )
            .for_item(r.edge),
        );
    }

    let font = theme.font_px;
    let max_label_w = (cfg.padding.left.min(cfg.padding.right) - cfg.label_gap).max(font);
    let columns = [(&bands.sources, TextAlign::End), (&bands.targets, TextAlign::Start)];
    for (side, (bars, align)) in columns.into_iter().enumerate() {
        for (i, bar) in bars.iter().enumerate() {
            let color = if side == 0 { theme.palette.color(i) } else { theme.neutral };
            out.push(LayoutPrimitive::rect(
                bar.rect.x,
                bar.rect.y,
                bar.rect.width,
                bar.rect.height,
                Paint::fill(color),
                Role::Mark,
            ));
            let x = match align {
                TextAlign::End => bar.rect.x - cfg.label_gap,
                _ => bar.rect.right() + cfg.label_gap,
            };
            let text = if cfg.show_values {
                format!("{} {}", bar.label, format_value(bar.value, &cfg.locale))
            } else {
                bar.label.clone()
            };
            out.push(LayoutPrimitive::label(
                Point::new(x, bar.rect.center().y),
                truncate_to_width(&text, font, max_label_w),
                align,
                font,
                theme.text,
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_weights_each_edge_once() {
        let flows = vec![FlowEdge::new("a", "x", 0.0), FlowEdge::new("a", "y", 0.0)];
        let bands = sankey_bands(&[], &flows, &SankeyConfig::default());
        assert_eq!(bands.sources[0].value, 2.0);
        let t: Vec<f64> = bands.ribbons.iter().map(|r| r.thickness).collect();
        assert!((t[0] - t[1]).abs() < 1e-9);
    }

    #[test]
    fn declared_labels_replace_ids() {
        let nodes = vec![SankeyNode {
            id: "a".into(),
            label: Some("Budget".into()),
        }];
        let bands = sankey_bands(&nodes, &[FlowEdge::new("a", "b", 5.0)], &SankeyConfig::default());
        assert_eq!(bands.sources[0].label, "Budget");
        assert_eq!(bands.targets[0].label, "b");
    }

    #[test]
    fn declared_order_wins() {
        let nodes = vec![
            SankeyNode { id: "y".into(), label: None },
            SankeyNode { id: "x".into(), label: None },
        ];
        let flows = vec![FlowEdge::new("a", "x", 1.0), FlowEdge::new("a", "y", 1.0), FlowEdge::new("a", "z", 1.0)];
        let bands = sankey_bands(&nodes, &flows, &SankeyConfig::default());
        let ids: Vec<&str> = bands.targets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }
}
