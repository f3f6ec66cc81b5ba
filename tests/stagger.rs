use deck_geometry::layout::arc::{self, PieConfig};
use deck_geometry::models::Segment;
use deck_geometry::stagger::stagger_groups;
use deck_geometry::{LayoutPrimitive, Paint, Point, Rgba, Role, StaggerMode, Theme, stagger_order};

fn prims(items: &[Option<usize>]) -> Vec<LayoutPrimitive> {
    items
        .iter()
        .map(|item| {
            let p = LayoutPrimitive::circle(Point::ZERO, 1.0, Paint::fill(Rgba::rgb(0, 0, 0)), Role::Mark);
            match item {
                Some(i) => p.for_item(*i),
                None => p,
            }
        })
        .collect()
}

#[test]
fn decoration_comes_first() {
    let list = prims(&[Some(1), None, Some(0), Some(1), None]);
    assert_eq!(stagger_order(&list, StaggerMode::Forward), vec![1, 4, 2, 0, 3]);
    assert_eq!(stagger_order(&list, StaggerMode::Reverse), vec![1, 4, 0, 3, 2]);
    assert_eq!(stagger_order(&list, StaggerMode::Document), vec![0, 1, 2, 3, 4]);
}

#[test]
fn groups_split_by_item() {
    let list = prims(&[Some(1), None, Some(0), Some(1)]);
    assert_eq!(
        stagger_groups(&list, StaggerMode::Forward),
        vec![vec![1], vec![2], vec![0, 3]]
    );
}

#[test]
fn order_does_not_change_geometry() {
    let segs = vec![Segment::new("a", 1.0), Segment::new("b", 2.0)];
    let theme = Theme::default();
    let layout = arc::pie_chart(&segs, &PieConfig::default(), &theme);
    let before = layout.clone();
    let order = stagger_order(&layout, StaggerMode::Reverse);
    assert_eq!(layout, before);
    let mut seen = order.clone();
    seen.sort_unstable();
    assert_eq!(seen, (0..layout.len()).collect::<Vec<_>>());
}
