use deck_geometry::layout::arc::{self, GaugeConfig, HarveyFill, PieConfig, sweep_angles};
use deck_geometry::models::Segment;
use deck_geometry::{PathCmd, Role, Shape, Theme};

fn segs(values: &[f64]) -> Vec<Segment> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Segment::new(format!("s{i}"), *v))
        .collect()
}

#[test]
fn pie_sweeps_follow_shares() {
    let sweeps = sweep_angles(&segs(&[40.0, 60.0]), 0.0);
    assert!((sweeps[0].sweep - 144.0).abs() < 1e-9);
    assert!((sweeps[1].sweep - 216.0).abs() < 1e-9);
    assert!((sweeps[1].start - 144.0).abs() < 1e-9);
}

#[test]
fn sweeps_sum_to_full_circle() {
    for values in [vec![1.0, 2.0, 3.0, 4.0], vec![0.1, 0.2, 0.7], vec![5.0, -3.0, 5.0], vec![0.0, 0.0]] {
        let total: f64 = sweep_angles(&segs(&values), 0.0).iter().map(|s| s.sweep).sum();
        assert!((total - 360.0).abs() < 1e-9, "{values:?} -> {total}");
    }
}

#[test]
fn negative_segments_get_no_slice() {
    let theme = Theme::default();
    let prims = arc::pie_chart(&segs(&[5.0, -3.0, 5.0]), &PieConfig::default(), &theme);
    let marked: Vec<usize> = prims
        .iter()
        .filter(|p| p.role == Role::Mark)
        .filter_map(|p| p.item)
        .collect();
    assert!(marked.contains(&0) && marked.contains(&2));
    assert!(!marked.contains(&1));
}

#[test]
fn single_segment_is_a_full_disc() {
    let prims = arc::pie_chart(&segs(&[7.0]), &PieConfig::default(), &Theme::default());
    let path = prims
        .iter()
        .find_map(|p| match &p.shape {
            Shape::Path { commands } if p.role == Role::Mark => Some(commands.clone()),
            _ => None,
        })
        .expect("pie slice");
    let arcs = path.iter().filter(|c| matches!(c, PathCmd::ArcTo { .. })).count();
    assert_eq!(arcs, 2, "full circle is drawn as two half arcs");
}

#[test]
fn donut_full_ring_has_a_hole() {
    let prims = arc::donut_chart(&segs(&[1.0]), &PieConfig::donut(), &Theme::default());
    let moves = prims
        .iter()
        .filter_map(|p| match &p.shape {
            Shape::Path { commands } => Some(commands.iter().filter(|c| matches!(c, PathCmd::MoveTo(_))).count()),
            _ => None,
        })
        .max();
    assert_eq!(moves, Some(2));
}

#[test]
fn empty_pie_is_empty() {
    assert!(arc::pie_chart(&[], &PieConfig::default(), &Theme::default()).is_empty());
}

#[test]
fn gauge_fraction_clamps() {
    assert_eq!(arc::gauge_fraction(50.0, 0.0, 100.0), 0.5);
    assert_eq!(arc::gauge_fraction(150.0, 0.0, 100.0), 1.0);
    assert_eq!(arc::gauge_fraction(-5.0, 0.0, 100.0), 0.0);
    let prims = arc::gauge(40.0, 0.0, 100.0, &GaugeConfig::default(), &Theme::default());
    assert!(prims.iter().any(|p| p.role == Role::Track));
}

#[test]
fn harvey_snaps_to_quarters() {
    assert_eq!(HarveyFill::from_percent(0.0), HarveyFill::Empty);
    assert_eq!(HarveyFill::from_percent(20.0), HarveyFill::Quarter);
    assert_eq!(HarveyFill::from_percent(50.0), HarveyFill::Half);
    assert_eq!(HarveyFill::from_percent(80.0), HarveyFill::ThreeQuarters);
    assert_eq!(HarveyFill::from_percent(140.0), HarveyFill::Full);
}
