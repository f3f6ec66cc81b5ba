use deck_geometry::layout::tree::{self, ConnectorStyle, CyclePolicy, NodePosition, OrgChartConfig};
use deck_geometry::{HierarchyNode, LayoutError, Role, Shape, Theme};

fn node(id: &str, label: &str, parent: Option<&str>) -> HierarchyNode {
    HierarchyNode::new(id, label, parent)
}

fn by_id<'a>(pos: &'a [NodePosition], id: &str) -> &'a NodePosition {
    pos.iter().find(|p| p.id == id).unwrap()
}

#[test]
fn ceo_is_centered_over_reports() {
    let nodes = vec![
        node("1", "CEO", None),
        node("2", "CTO", Some("1")),
        node("3", "VP", Some("1")),
    ];
    let pos = tree::tree_positions(&nodes, &OrgChartConfig::default()).unwrap();
    let (ceo, cto, vp) = (by_id(&pos, "1"), by_id(&pos, "2"), by_id(&pos, "3"));
    assert!((ceo.x - (cto.x + vp.x) / 2.0).abs() < 1e-9);
    assert!(cto.x < vp.x);
    assert_eq!(ceo.depth, 0);
    assert_eq!(cto.depth, 1);
    assert!(cto.y > ceo.y);
}

#[test]
fn every_parent_sits_at_the_mean_of_its_children() {
    let nodes = vec![
        node("root", "Root", None),
        node("a", "A", Some("root")),
        node("b", "B", Some("root")),
        node("a1", "A1", Some("a")),
        node("a2", "A2", Some("a")),
        node("a3", "A3", Some("a")),
        node("b1", "B1", Some("b")),
        node("a21", "A21", Some("a2")),
    ];
    let pos = tree::tree_positions(&nodes, &OrgChartConfig::default()).unwrap();
    for p in pos.iter().filter(|p| !p.children.is_empty()) {
        let xs: Vec<f64> = p
            .children
            .iter()
            .map(|c| pos.iter().find(|q| q.index == *c).unwrap().x)
            .collect();
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        assert!((p.x - mean).abs() < 1e-9, "{} at {} vs {}", p.id, p.x, mean);
    }
}

#[test]
fn siblings_never_overlap() {
    let cfg = OrgChartConfig::default();
    let nodes = vec![
        node("r", "R", None),
        node("a", "A", Some("r")),
        node("b", "B", Some("r")),
        node("a1", "A1", Some("a")),
        node("a2", "A2", Some("a")),
        node("b1", "B1", Some("b")),
    ];
    let pos = tree::tree_positions(&nodes, &cfg).unwrap();
    let mut leaves: Vec<f64> = pos.iter().filter(|p| p.children.is_empty()).map(|p| p.x).collect();
    leaves.sort_by(f64::total_cmp);
    for w in leaves.windows(2) {
        assert!(w[1] - w[0] >= cfg.h_unit - 1e-9);
    }
}

#[test]
fn dangling_parent_becomes_a_root() {
    let nodes = vec![node("a", "A", None), node("b", "B", Some("ghost"))];
    let pos = tree::tree_positions(&nodes, &OrgChartConfig::default()).unwrap();
    assert_eq!(by_id(&pos, "b").depth, 0);
    assert!(by_id(&pos, "a").x < by_id(&pos, "b").x);
}

#[test]
fn cycles_are_rejected_by_default() {
    let nodes = vec![
        node("a", "A", Some("c")),
        node("b", "B", Some("a")),
        node("c", "C", Some("b")),
    ];
    let err = tree::org_chart(&nodes, &OrgChartConfig::default(), &Theme::default()).unwrap_err();
    match err {
        LayoutError::CyclicHierarchy { id } => assert_eq!(id, "a"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn reparent_policy_detaches_the_first_cycle_node() {
    let nodes = vec![
        node("top", "Top", None),
        node("a", "A", Some("c")),
        node("b", "B", Some("a")),
        node("c", "C", Some("b")),
    ];
    let cfg = OrgChartConfig {
        cycle_policy: CyclePolicy::Reparent,
        ..Default::default()
    };
    let pos = tree::tree_positions(&nodes, &cfg).unwrap();
    assert_eq!(by_id(&pos, "a").depth, 0);
    assert_eq!(by_id(&pos, "b").depth, 1);
    assert_eq!(by_id(&pos, "c").depth, 2);
}

#[test]
fn connectors_join_bottom_center_to_top_center() {
    let cfg = OrgChartConfig {
        connector: ConnectorStyle::Straight,
        ..Default::default()
    };
    let nodes = vec![node("1", "CEO", None), node("2", "CTO", Some("1"))];
    let prims = tree::org_chart(&nodes, &cfg, &Theme::default()).unwrap();
    let pos = tree::tree_positions(&nodes, &cfg).unwrap();
    let line = prims
        .iter()
        .find_map(|p| match p.shape {
            Shape::Line { from, to } if p.role == Role::Connector => Some((from, to)),
            _ => None,
        })
        .expect("connector");
    assert_eq!(line.0.x, pos[0].x);
    assert_eq!(line.0.y, pos[0].y + cfg.node_height);
    assert_eq!(line.1.x, pos[1].x);
    assert_eq!(line.1.y, pos[1].y);
}

#[test]
fn long_labels_are_truncated_to_the_box() {
    let nodes = vec![node("1", "Chief Executive Officer of Everything Important", None)];
    let prims = tree::org_chart(&nodes, &OrgChartConfig::default(), &Theme::default()).unwrap();
    let text = prims.iter().find_map(|p| p.text()).unwrap();
    assert!(text.ends_with('…'), "{text}");
}

#[test]
fn empty_input_is_empty() {
    assert!(tree::org_chart(&[], &OrgChartConfig::default(), &Theme::default()).unwrap().is_empty());
}
