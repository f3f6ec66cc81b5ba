use deck_geometry::layout::proportional::{
    self, FunnelConfig, TreemapConfig, WaterfallConfig, running_totals, strip_widths, trapezoid_layers,
};
use deck_geometry::models::DataPoint;
use deck_geometry::{Rect, Role, Shape, Theme};

fn rects(prims: &[deck_geometry::LayoutPrimitive]) -> Vec<(Option<usize>, Rect)> {
    prims
        .iter()
        .filter(|p| p.role == Role::Mark)
        .filter_map(|p| match p.shape {
            Shape::Rect {
                x, y, width, height, ..
            } => Some((p.item, Rect::new(x, y, width, height))),
            _ => None,
        })
        .collect()
}

#[test]
fn running_totals_end_at_the_sum() {
    let totals = running_totals(100.0, &[20.0, -50.0, 5.0]);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0].before, 100.0);
    assert_eq!(totals[1].delta(), -50.0);
    assert_eq!(totals.last().unwrap().after, 75.0);
}

#[test]
fn waterfall_total_bar_spans_final_level() {
    let deltas = vec![
        DataPoint::new("Q1", 10.0),
        DataPoint::new("Q2", -4.0),
        DataPoint::new("Q3", 6.0),
    ];
    let cfg = WaterfallConfig::default();
    let prims = proportional::waterfall_chart(&deltas, &cfg, &Theme::default());
    let bars = rects(&prims);
    assert_eq!(bars.len(), 4);
    let plot = cfg.canvas.inset(&cfg.padding);
    // final level 12 is the top of the scale
    let (item, total) = bars[3];
    assert_eq!(item, Some(3));
    assert!((total.y - plot.y).abs() < 1e-9);
    assert!((total.bottom() - plot.bottom()).abs() < 1e-9);
    for (_, r) in &bars {
        assert!(r.y >= plot.y - 1e-9 && r.bottom() <= plot.bottom() + 1e-9);
    }
}

#[test]
fn waterfall_colors_encode_sign() {
    let theme = Theme::default();
    let deltas = vec![DataPoint::new("up", 5.0), DataPoint::new("down", -2.0)];
    let cfg = WaterfallConfig {
        show_total: false,
        ..Default::default()
    };
    let prims = proportional::waterfall_chart(&deltas, &cfg, &theme);
    let fills: Vec<_> = prims
        .iter()
        .filter(|p| p.role == Role::Mark)
        .map(|p| p.paint.fill)
        .collect();
    assert_eq!(fills, vec![Some(theme.positive), Some(theme.negative)]);
}

#[test]
fn bridge_has_start_and_end_bars() {
    let cfg = WaterfallConfig::default();
    let prims = proportional::bridge_chart(
        &DataPoint::new("Start", 50.0),
        &[DataPoint::new("Growth", 30.0), DataPoint::new("Churn", -20.0)],
        "End",
        &cfg,
        &Theme::default(),
    );
    let bars = rects(&prims);
    assert_eq!(bars.len(), 4);
    let plot = cfg.canvas.inset(&cfg.padding);
    // both totals rest on the zero baseline at the bottom
    assert!((bars[0].1.bottom() - plot.bottom()).abs() < 1e-9);
    assert!((bars[3].1.bottom() - plot.bottom()).abs() < 1e-9);
    assert!(bars[3].1.height > bars[0].1.height);
}

#[test]
fn treemap_widths_fall_back_to_equal() {
    assert_eq!(strip_widths(&[1.0, 3.0], 400.0), vec![100.0, 300.0]);
    assert_eq!(strip_widths(&[0.0, 0.0], 400.0), vec![200.0, 200.0]);
    assert_eq!(strip_widths(&[-1.0, 1.0], 400.0), vec![0.0, 400.0]);
    let items = vec![DataPoint::new("a", 0.0), DataPoint::new("b", 0.0)];
    let prims = proportional::treemap_strip(&items, &TreemapConfig::default(), &Theme::default());
    let widths: Vec<f64> = rects(&prims).iter().map(|(_, r)| r.width).collect();
    assert_eq!(widths.len(), 2);
    assert!((widths[0] - widths[1]).abs() < 1e-9);
}

#[test]
fn funnel_layers_narrow_downward() {
    let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
    let layers = trapezoid_layers(4, plot, 0.25, 0.0, true);
    assert_eq!(layers.len(), 4);
    let top_w = |l: &[deck_geometry::Point; 4]| l[1].x - l[0].x;
    let bottom_w = |l: &[deck_geometry::Point; 4]| l[2].x - l[3].x;
    assert_eq!(top_w(&layers[0]), 400.0);
    assert_eq!(bottom_w(&layers[3]), 100.0);
    for pair in layers.windows(2) {
        assert!((bottom_w(&pair[0]) - top_w(&pair[1])).abs() < 1e-9);
    }
}

#[test]
fn funnel_emits_one_polygon_per_stage() {
    let stages = vec![
        DataPoint::new("Visits", 1000.0),
        DataPoint::new("Leads", 300.0),
        DataPoint::new("Deals", 40.0),
    ];
    let prims = proportional::funnel(&stages, &FunnelConfig::default(), &Theme::default());
    let polys = prims
        .iter()
        .filter(|p| matches!(p.shape, Shape::Polygon { .. }))
        .count();
    assert_eq!(polys, 3);
}

#[test]
fn huge_negative_delta_is_labelled() {
    let deltas = vec![DataPoint::new("drop", -1e19), DataPoint::new("rebound", 5.0)];
    let prims = proportional::waterfall_chart(&deltas, &WaterfallConfig::default(), &Theme::default());
    assert!(!prims.is_empty());
    let labels: Vec<&str> = prims
        .iter()
        .filter_map(|p| match &p.shape {
            Shape::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(labels.contains(&"-10,000,000,000,000,000,000"), "{labels:?}");
}
