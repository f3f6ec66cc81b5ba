use deck_geometry::layout::cartesian::{
    self, AreaChartConfig, BarChartConfig, BulletConfig, HeatmapConfig, Orientation, ScatterConfig,
    SparklineConfig, StackedBarConfig, cell_opacity,
};
use deck_geometry::models::{BulletData, DataPoint, HeatmapGrid, ScatterPoint, StackedBar};
use deck_geometry::{LayoutPrimitive, Point, Role, Shape, Theme};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// `(x, y, width, height)` of every rect with the given role, in emitted order.
fn rects(prims: &[LayoutPrimitive], role: Role) -> Vec<(f64, f64, f64, f64)> {
    prims
        .iter()
        .filter(|p| p.role == role)
        .filter_map(|p| match p.shape {
            Shape::Rect {
                x, y, width, height, ..
            } => Some((x, y, width, height)),
            _ => None,
        })
        .collect()
}

fn bars(values: &[(&str, f64)]) -> Vec<DataPoint> {
    values.iter().map(|(l, v)| DataPoint::new(*l, *v)).collect()
}

#[test]
fn bar_lengths_are_proportional() {
    let input = bars(&[("A", 50.0), ("B", 100.0)]);
    let geoms = cartesian::bar_geometry(&input, &BarChartConfig::default());
    assert_eq!(geoms.len(), 2);
    assert!((geoms[0].length * 2.0 - geoms[1].length).abs() < 1e-9);
    // B fills the whole plot height
    let cfg = BarChartConfig::default();
    let plot_h = cfg.canvas.height - cfg.padding.top - cfg.padding.bottom;
    assert!((geoms[1].length - plot_h).abs() < 1e-9);
}

#[test]
fn horizontal_bars_grow_from_the_left_edge() {
    let cfg = BarChartConfig {
        orientation: Orientation::Horizontal,
        ..Default::default()
    };
    let geoms = cartesian::bar_geometry(&bars(&[("A", 1.0), ("B", 4.0)]), &cfg);
    assert_eq!(geoms[0].rect.x, cfg.padding.left);
    assert_eq!(geoms[1].rect.x, cfg.padding.left);
    assert!(geoms[0].rect.width < geoms[1].rect.width);
}

#[test]
fn empty_bar_chart_is_empty() {
    let prims = cartesian::bar_chart(&[], &BarChartConfig::default(), &Theme::default());
    assert!(prims.is_empty());
}

#[test]
fn bars_take_palette_colors_in_order() {
    let theme = Theme::default();
    let prims = cartesian::bar_chart(
        &bars(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]),
        &BarChartConfig::default(),
        &theme,
    );
    let marks: Vec<_> = prims.iter().filter(|p| p.role == Role::Mark).collect();
    assert_eq!(marks.len(), 3);
    for (i, m) in marks.iter().enumerate() {
        assert_eq!(m.item, Some(i));
        assert_eq!(m.paint.fill, Some(theme.palette.color(i)));
    }
}

#[test]
fn heatmap_opacity_has_a_floor() {
    assert_eq!(cell_opacity(0.0, 10.0, 0.08), 0.08);
    assert_eq!(cell_opacity(10.0, 10.0, 0.08), 1.0);
    assert!((cell_opacity(5.0, 10.0, 0.08) - 0.5).abs() < 1e-12);

    let grid = HeatmapGrid {
        rows: vec!["r1".into(), "r2".into()],
        columns: vec!["c1".into(), "c2".into()],
        values: vec![vec![0.0, 4.0], vec![2.0, 8.0]],
    };
    let prims = cartesian::heatmap(&grid, &HeatmapConfig::default(), &Theme::default());
    let cells: Vec<f64> = prims
        .iter()
        .filter(|p| p.role == Role::Mark)
        .map(|p| p.paint.opacity)
        .collect();
    assert_eq!(cells.len(), 4);
    assert!(cells.iter().all(|o| *o >= 0.08));
}

#[test]
fn single_point_sparkline_is_centered() {
    let cfg = SparklineConfig::default();
    let prims = cartesian::sparkline(&[3.0], &cfg, &Theme::default());
    let marker = prims
        .iter()
        .find_map(|p| match &p.shape {
            Shape::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .expect("end marker");
    assert!((marker.x - cfg.canvas.center().x).abs() < 1e-9);
}

#[test]
fn stacked_segments_accumulate_left_to_right() {
    let rows = vec![
        StackedBar {
            label: "North".into(),
            segments: bars(&[("Q1", 30.0), ("Q2", 10.0)]),
        },
        StackedBar {
            label: "South".into(),
            segments: bars(&[("Q1", 80.0)]),
        },
    ];
    let cfg = StackedBarConfig::default();
    let plot = cfg.canvas.inset(&cfg.padding);
    let prims = cartesian::stacked_bar_chart(&rows, &cfg, &Theme::default());
    let marks = rects(&prims, Role::Mark);
    assert_eq!(marks.len(), 3);

    // North totals 40 against a max of 80: half the plot width
    let north_len = plot.width / 2.0;
    assert!(close(marks[0].0, plot.x));
    assert!(close(marks[0].2, north_len * 0.75));
    assert!(close(marks[1].0, marks[0].0 + marks[0].2));
    assert!(close(marks[0].2 + marks[1].2, north_len));
    assert_eq!(marks[0].1, marks[1].1);

    assert!(close(marks[2].0, plot.x));
    assert!(close(marks[2].2, plot.width));
    assert!(marks[2].1 > marks[0].1);
}

#[test]
fn area_fill_closes_down_to_the_baseline() {
    let cfg = AreaChartConfig::default();
    let plot = cfg.canvas.inset(&cfg.padding);
    let series = bars(&[("Jan", 2.0), ("Feb", 5.0), ("Mar", 4.0)]);
    let prims = cartesian::area_chart(&series, &cfg, &Theme::default());

    let line = prims
        .iter()
        .find_map(|p| match &p.shape {
            Shape::Polyline { points } => Some(points.clone()),
            _ => None,
        })
        .unwrap();
    let fill = prims
        .iter()
        .find_map(|p| match &p.shape {
            Shape::Polygon { points } => Some(points.clone()),
            _ => None,
        })
        .unwrap();

    assert_eq!(fill.len(), line.len() + 2);
    assert_eq!(&fill[..line.len()], &line[..]);
    let n = fill.len();
    assert_eq!(fill[n - 2], Point::new(line[line.len() - 1].x, plot.bottom()));
    assert_eq!(fill[n - 1], Point::new(line[0].x, plot.bottom()));
    // the peak touches the top of the plot
    assert!(close(line[1].y, plot.y));
}

#[test]
fn area_without_fill_has_no_polygon() {
    let cfg = AreaChartConfig {
        fill: false,
        ..Default::default()
    };
    let prims = cartesian::area_chart(&bars(&[("a", 1.0), ("b", 2.0)]), &cfg, &Theme::default());
    assert!(!prims.iter().any(|p| matches!(p.shape, Shape::Polygon { .. })));
}

fn scatter_centers(prims: &[LayoutPrimitive]) -> Vec<Point> {
    prims
        .iter()
        .filter(|p| p.role == Role::Mark)
        .filter_map(|p| match p.shape {
            Shape::Circle { center, .. } => Some(center),
            _ => None,
        })
        .collect()
}

#[test]
fn scatter_axes_have_their_own_ranges_through_zero() {
    let cfg = ScatterConfig::default();
    let plot = cfg.canvas.inset(&cfg.padding);
    let points = vec![
        ScatterPoint {
            label: "a".into(),
            x: -10.0,
            y: 5.0,
        },
        ScatterPoint {
            label: "b".into(),
            x: 30.0,
            y: 20.0,
        },
    ];
    let prims = cartesian::scatter_plot(&points, &cfg, &Theme::default());
    let c = scatter_centers(&prims);
    assert_eq!(c.len(), 2);
    // x spans [-10, 30], y spans [0, 20]
    assert!(close(c[0].x, plot.x));
    assert!(close(c[1].x, plot.right()));
    assert!(close(c[0].y, plot.bottom() - plot.height * 0.25));
    assert!(close(c[1].y, plot.y));

    // the vertical guide sits at x = 0
    let zero_x = plot.x + plot.width * 0.25;
    assert!(prims.iter().any(|p| p.role == Role::Guide
        && matches!(p.shape, Shape::Line { from, to } if close(from.x, zero_x) && close(to.x, zero_x))));
}

#[test]
fn scatter_range_is_widened_to_include_zero() {
    let cfg = ScatterConfig::default();
    let plot = cfg.canvas.inset(&cfg.padding);
    let points = vec![
        ScatterPoint {
            label: "a".into(),
            x: 5.0,
            y: 50.0,
        },
        ScatterPoint {
            label: "b".into(),
            x: 10.0,
            y: 100.0,
        },
    ];
    let c = scatter_centers(&cartesian::scatter_plot(&points, &cfg, &Theme::default()));
    assert!(close(c[0].x, plot.x + plot.width / 2.0));
    assert!(close(c[0].y, plot.bottom() - plot.height / 2.0));
}

#[test]
fn bullet_has_nested_bands_value_bar_and_target() {
    let cfg = BulletConfig::default();
    let plot = cfg.canvas.inset(&cfg.padding);
    let band_x = plot.x + cfg.label_width;
    let band_w = plot.width - cfg.label_width;
    let rows = vec![BulletData {
        label: "Revenue".into(),
        value: 60.0,
        target: 80.0,
        ranges: [75.0, 50.0, 100.0],
    }];
    let prims = cartesian::bullet_chart(&rows, &cfg, &Theme::default());

    let bands = rects(&prims, Role::Track);
    assert_eq!(bands.len(), 3);
    // widest first, all anchored at the band origin with the full row height
    let widths: Vec<f64> = bands.iter().map(|b| b.2).collect();
    assert!(close(widths[0], band_w));
    assert!(close(widths[1], band_w * 0.75));
    assert!(close(widths[2], band_w * 0.5));
    assert!(bands.iter().all(|b| close(b.0, band_x) && close(b.3, plot.height)));

    let value = rects(&prims, Role::Mark);
    assert_eq!(value.len(), 1);
    let (x, y, w, h) = value[0];
    assert!(close(x, band_x));
    assert!(close(w, band_w * 0.6));
    assert!(close(h, plot.height * cfg.value_bar_ratio));
    assert!(close(y + h / 2.0, plot.y + plot.height / 2.0));

    let tick = prims
        .iter()
        .find_map(|p| match p.shape {
            Shape::Line { from, to } => Some((from, to)),
            _ => None,
        })
        .unwrap();
    assert!(close(tick.0.x, band_x + band_w * 0.8));
    assert!(close(tick.0.x, tick.1.x));
    assert!(close(tick.1.y - tick.0.y, plot.height * cfg.target_ratio));
}
