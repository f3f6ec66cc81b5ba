//! Presentation order for finished layouts.
//!
//! Geometry never carries timing. A renderer that animates entrances asks for an
//! order here and schedules its own delays along it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::primitive::LayoutPrimitive;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StaggerMode {
    /// Items in ascending item index.
    #[default]
    Forward,
    /// Items in descending item index.
    Reverse,
    /// Exactly the order the layout emitted.
    Document,
}

/// Indices into `primitives` in presentation order.
///
/// Decoration (primitives with no item) comes first, then items per `mode`.
/// Primitives of the same item keep their emitted order.
pub fn stagger_order(primitives: &[LayoutPrimitive], mode: StaggerMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..primitives.len()).collect();
    match mode {
        StaggerMode::Document => {}
        StaggerMode::Forward => order.sort_by_key(|&i| primitives[i].item.map_or((0, 0), |it| (1, it))),
        StaggerMode::Reverse => {
            order.sort_by_key(|&i| primitives[i].item.map_or((0, 0), |it| (1, usize::MAX - it)))
        }
    }
    order
}

/// Groups of primitive indices that enter together, one group per step.
pub fn stagger_groups(primitives: &[LayoutPrimitive], mode: StaggerMode) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut last: Option<Option<usize>> = None;
    for i in stagger_order(primitives, mode) {
        let item = primitives[i].item;
        match groups.last_mut() {
            Some(g) if last == Some(item) => g.push(i),
            _ => groups.push(vec![i]),
        }
        last = Some(item);
    }
    groups
}
