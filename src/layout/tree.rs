//! Org chart layout over an index arena.
//!
//! The forest is built from a flat node list. A node whose `parent_id` is absent or
//! unknown becomes a root. Layout runs in three passes over a pre-order of the
//! arena: leaf counts bottom-up, horizontal slices top-down, then internal nodes are
//! centered over their direct children.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::text::truncate_to_width;
use crate::error::{LayoutError, Result};
use crate::geometry::Point;
use crate::models::HierarchyNode;
use crate::primitive::{LayoutPrimitive, Paint, Role, Shape, TextAlign};
use crate::style::Theme;

/// What to do when parent links form a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Fail with [`LayoutError::CyclicHierarchy`].
    #[default]
    Reject,
    /// Detach the first node (input order) of each cycle and make it a root.
    Reparent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorStyle {
    Straight,
    #[default]
    Elbow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgChartConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal space allotted per leaf.
    pub h_unit: f64,
    /// Vertical distance between depth levels.
    pub v_unit: f64,
    pub top_margin: f64,
    pub left_margin: f64,
    pub corner_radius: f64,
    pub connector: ConnectorStyle,
    pub cycle_policy: CyclePolicy,
}

impl Default for OrgChartConfig {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 56.0,
            h_unit: 170.0,
            v_unit: 110.0,
            top_margin: 40.0,
            left_margin: 40.0,
            corner_radius: 6.0,
            connector: ConnectorStyle::default(),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

/// Placement of one node: `x` is the box center, `y` the box top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: String,
    /// Index into the input node list.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    /// Input indices of the direct children, in input order.
    pub children: Vec<usize>,
}

struct Forest<'a> {
    nodes: Vec<&'a HierarchyNode>,
    /// Input index of each arena slot.
    source: Vec<usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> Forest<'a> {
    fn build(input: &'a [HierarchyNode], policy: CyclePolicy) -> Result<Self> {
        let mut nodes = Vec::with_capacity(input.len());
        let mut source = Vec::with_capacity(input.len());
        let mut slot_of = std::collections::HashMap::with_capacity(input.len());
        for (i, node) in input.iter().enumerate() {
            if slot_of.contains_key(node.id.as_str()) {
                warn!("duplicate org chart node id {:?} at position {}, dropped", node.id, i);
                continue;
            }
            slot_of.insert(node.id.as_str(), nodes.len());
            nodes.push(node);
            source.push(i);
        }

        let mut parent: Vec<Option<usize>> = nodes
            .iter()
            .map(|n| n.parent_id.as_deref().and_then(|p| slot_of.get(p).copied()))
            .collect();
        for (slot, node) in nodes.iter().enumerate() {
            if parent[slot].is_none()
                && let Some(p) = &node.parent_id
            {
                debug!("node {:?} has unknown parent {:?}, treated as root", node.id, p);
            }
        }
        break_cycles(&mut parent, &nodes, policy)?;

        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (slot, p) in parent.iter().enumerate() {
            match p {
                Some(p) => children[*p].push(slot),
                None => roots.push(slot),
            }
        }
        Ok(Self {
            nodes,
            source,
            children,
            roots,
        })
    }

    /// Pre-order over all trees, roots left to right.
    fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            order.push(n);
            stack.extend(self.children[n].iter().rev());
        }
        order
    }
}

/// Walks every parent chain, marking nodes in progress (1) and finished (2).
/// Reaching an in-progress node means the chain closed on itself.
fn break_cycles(parent: &mut [Option<usize>], nodes: &[&HierarchyNode], policy: CyclePolicy) -> Result<()> {
    let mut mark = vec![0u8; parent.len()];
    for start in 0..parent.len() {
        let mut path = Vec::new();
        let mut cur = Some(start);
        while let Some(c) = cur {
            match mark[c] {
                2 => break,
                1 => {
                    let cycle = path.iter().position(|&p| p == c).map_or(&path[..], |pos| &path[pos..]);
                    let first = cycle.iter().copied().min().unwrap_or(c);
                    match policy {
                        CyclePolicy::Reject => {
                            return Err(LayoutError::CyclicHierarchy {
                                id: nodes[first].id.clone(),
                            });
                        }
                        CyclePolicy::Reparent => {
                            warn!("hierarchy cycle through {:?}, detached as root", nodes[first].id);
                            parent[first] = None;
                        }
                    }
                    break;
                }
                _ => {
                    mark[c] = 1;
                    path.push(c);
                    cur = parent[c];
                }
            }
        }
        for p in path {
            mark[p] = 2;
        }
    }
    Ok(())
}

fn place(forest: &Forest, cfg: &OrgChartConfig) -> Vec<NodePosition> {
    let n = forest.nodes.len();
    let order = forest.preorder();

    let mut leaves = vec![1usize; n];
    for &i in order.iter().rev() {
        if !forest.children[i].is_empty() {
            leaves[i] = forest.children[i].iter().map(|&c| leaves[c]).sum();
        }
    }

    let mut depth = vec![0usize; n];
    let mut slice_left = vec![0.0f64; n];
    let mut cursor = cfg.left_margin;
    for &r in &forest.roots {
        slice_left[r] = cursor;
        cursor += leaves[r] as f64 * cfg.h_unit;
    }
    for &i in &order {
        let mut cursor = slice_left[i];
        for &c in &forest.children[i] {
            depth[c] = depth[i] + 1;
            slice_left[c] = cursor;
            cursor += leaves[c] as f64 * cfg.h_unit;
        }
    }

    let mut x = vec![0.0f64; n];
    for &i in order.iter().rev() {
        let kids = &forest.children[i];
        x[i] = if kids.is_empty() {
            slice_left[i] + cfg.h_unit / 2.0
        } else {
            kids.iter().map(|&c| x[c]).sum::<f64>() / kids.len() as f64
        };
    }

    (0..n)
        .map(|i| NodePosition {
            id: forest.nodes[i].id.clone(),
            index: forest.source[i],
            x: x[i],
            y: cfg.top_margin + depth[i] as f64 * cfg.v_unit,
            depth: depth[i],
            children: forest.children[i].iter().map(|&c| forest.source[c]).collect(),
        })
        .collect()
}

/// Per-node placement, in input order with duplicate ids removed.
pub fn tree_positions(nodes: &[HierarchyNode], cfg: &OrgChartConfig) -> Result<Vec<NodePosition>> {
    let forest = Forest::build(nodes, cfg.cycle_policy)?;
    Ok(place(&forest, cfg))
}

/// Org chart: connectors, node boxes colored by depth, label and title lines.
pub fn org_chart(nodes: &[HierarchyNode], cfg: &OrgChartConfig, theme: &Theme) -> Result<Vec<LayoutPrimitive>> {
    if cfg.h_unit <= 0.0 || cfg.v_unit <= 0.0 {
        return Err(LayoutError::InvalidConfig(format!(
            "org chart spacing must be positive (h_unit {}, v_unit {})",
            cfg.h_unit, cfg.v_unit
        )));
    }
    let positions = tree_positions(nodes, cfg)?;
    if positions.is_empty() {
        return Ok(Vec::new());
    }
    let by_index: std::collections::HashMap<usize, &NodePosition> = positions.iter().map(|p| (p.index, p)).collect();
    let w = cfg.node_width;
    let h = cfg.node_height;
    let line = Paint::stroke(theme.guide, 1.5);
    let mut out = Vec::new();

    for parent in &positions {
        let from = Point::new(parent.x, parent.y + h);
        for child in parent.children.iter().filter_map(|c| by_index.get(c)) {
            let to = Point::new(child.x, child.y);
            let prim = match cfg.connector {
                ConnectorStyle::Straight => LayoutPrimitive::line(from, to, line.clone(), Role::Connector),
                ConnectorStyle::Elbow => {
                    let mid = (from.y + to.y) / 2.0;
                    LayoutPrimitive::polyline(
                        vec![from, Point::new(from.x, mid), Point::new(to.x, mid), to],
                        line.clone(),
                        Role::Connector,
                    )
                }
            };
            out.push(prim.for_item(child.index));
        }
    }

    let font = theme.font_px;
    for p in &positions {
        let node = &nodes[p.index];
        let shape = Shape::Rect {
            x: p.x - w / 2.0,
            y: p.y,
            width: w,
            height: h,
            corner_radius: cfg.corner_radius,
        };
        out.push(LayoutPrimitive::new(shape, Paint::fill(theme.palette.color(p.depth)), Role::Mark).for_item(p.index));

        let text_w = w - 12.0;
        match node.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => {
                out.push(
                    LayoutPrimitive::label(
                        Point::new(p.x, p.y + h / 2.0 - font * 0.55),
                        truncate_to_width(&node.label, font, text_w),
                        TextAlign::Middle,
                        font,
                        theme.background,
                    )
                    .for_item(p.index),
                );
                out.push(
                    LayoutPrimitive::label(
                        Point::new(p.x, p.y + h / 2.0 + font * 0.65),
                        truncate_to_width(title, font * 0.85, text_w),
                        TextAlign::Middle,
                        font * 0.85,
                        theme.background,
                    )
                    .for_item(p.index),
                );
            }
            None => out.push(
                LayoutPrimitive::label(
                    Point::new(p.x, p.y + h / 2.0),
                    truncate_to_width(&node.label, font, text_w),
                    TextAlign::Middle,
                    font,
                    theme.background,
                )
                .for_item(p.index),
            ),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>) -> HierarchyNode {
        HierarchyNode::new(id, id, parent)
    }

    #[test]
    fn leaves_take_consecutive_slices() {
        let nodes = vec![node("r", None), node("a", Some("r")), node("b", Some("r")), node("c", Some("r"))];
        let cfg = OrgChartConfig::default();
        let pos = tree_positions(&nodes, &cfg).unwrap();
        let xs: Vec<f64> = pos[1..].iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![125.0, 295.0, 465.0]);
        assert_eq!(pos[0].x, 295.0);
        assert_eq!(pos[1].depth, 1);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let nodes = vec![node("a", None), node("a", None), node("b", Some("a"))];
        let pos = tree_positions(&nodes, &OrgChartConfig::default()).unwrap();
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[1].index, 2);
        assert_eq!(pos[0].children, vec![2]);
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let nodes = vec![node("a", Some("a"))];
        let err = tree_positions(&nodes, &OrgChartConfig::default()).unwrap_err();
        assert!(matches!(err, LayoutError::CyclicHierarchy { ref id } if id == "a"));
    }
}
