//! Cartesian charts: bar, stacked bar, area, sparkline, scatter, heatmap, bullet.
//!
//! All charts here share one model: a plot box (`canvas` minus `padding`) and a
//! value range that is either caller-supplied or derived with [`max_floor`].

use serde::{Deserialize, Serialize};

use super::text::{estimate_text_width, format_value, truncate_to_width};
use crate::geometry::{Padding, Point, Rect, DEFAULT_CANVAS};
use crate::models::{BulletData, DataPoint, HeatmapGrid, ScatterPoint, StackedBar};
use crate::primitive::{LayoutPrimitive, Paint, Role, TextAlign};
use crate::scale::{clamp_non_negative, max_floor, normalize, LinearScale, ValueRange};
use crate::style::Theme;

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Columns growing upward from the bottom axis.
    #[default]
    Vertical,
    /// Bars growing rightward from the left axis.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub orientation: Orientation,
    /// Space between neighbouring bars.
    pub gap: f64,
    /// Bars never get thinner than this, even if they overflow the canvas.
    pub min_thickness: f64,
    /// Explicit top of the value axis; derived from the data when `None`.
    pub max_value: Option<f64>,
    pub show_values: bool,
    pub label_gap: f64,
    pub locale: String,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding {
                top: 48.0,
                right: 48.0,
                bottom: 64.0,
                left: 48.0,
            },
            orientation: Orientation::Vertical,
            gap: 16.0,
            min_thickness: 4.0,
            max_value: None,
            show_values: true,
            label_gap: 8.0,
            locale: "en".into(),
        }
    }
}

/// Geometry of one bar, before styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub rect: Rect,
    /// Extent along the value axis.
    pub length: f64,
    /// Extent across the value axis.
    pub thickness: f64,
}

/// Place bars inside the plot box. Empty input yields no bars.
pub fn bar_geometry(bars: &[DataPoint], cfg: &BarChartConfig) -> Vec<BarGeometry> {
    if bars.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let max = cfg
        .max_value
        .filter(|m| *m > 0.0)
        .unwrap_or_else(|| max_floor(bars.iter().map(|b| b.value)));
    let n = bars.len() as f64;
    let (across, along) = match cfg.orientation {
        Orientation::Vertical => (plot.width, plot.height),
        Orientation::Horizontal => (plot.height, plot.width),
    };
    let slot = across / n;
    let thickness = (slot - cfg.gap).max(cfg.min_thickness);
    if thickness * n > across {
        log::warn!(
            "{} bars need {:.1} units but the plot box offers {:.1}; bars will overflow",
            bars.len(),
            thickness * n,
            across
        );
    }

    bars.iter()
        .enumerate()
        .map(|(i, b)| {
            let length = normalize(b.value, 0.0, max) * along;
            let offset = i as f64 * slot + (slot - thickness) / 2.0;
            let rect = match cfg.orientation {
                Orientation::Vertical => Rect::new(
                    plot.x + offset,
                    plot.bottom() - length,
                    thickness,
                    length,
                ),
                Orientation::Horizontal => Rect::new(plot.x, plot.y + offset, length, thickness),
            };
            BarGeometry {
                rect,
                length,
                thickness,
            }
        })
        .collect()
}

/// Bar (column) chart.
pub fn bar_chart(bars: &[DataPoint], cfg: &BarChartConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let geoms = bar_geometry(bars, cfg);
    if geoms.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(geoms.len() * 3 + 1);

    let axis = match cfg.orientation {
        Orientation::Vertical => (
            Point::new(plot.x, plot.bottom()),
            Point::new(plot.right(), plot.bottom()),
        ),
        Orientation::Horizontal => (Point::new(plot.x, plot.y), Point::new(plot.x, plot.bottom())),
    };
    out.push(LayoutPrimitive::line(
        axis.0,
        axis.1,
        Paint::stroke(theme.guide, 1.0),
        Role::Guide,
    ));

    for (i, (bar, g)) in bars.iter().zip(&geoms).enumerate() {
        let r = g.rect;
        out.push(
            LayoutPrimitive::rect(
                r.x,
                r.y,
                r.width,
                r.height,
                Paint::fill(theme.palette.color(i)),
                Role::Mark,
            )
            .for_item(i),
        );
        let value_text = format_value(bar.value, &cfg.locale);
        match cfg.orientation {
            Orientation::Vertical => {
                let cx = r.x + r.width / 2.0;
                let label = truncate_to_width(&bar.label, font, r.width + cfg.gap);
                out.push(
                    LayoutPrimitive::label(
                        Point::new(cx, plot.bottom() + cfg.label_gap + font / 2.0),
                        label,
                        TextAlign::Middle,
                        font,
                        theme.text,
                    )
                    .for_item(i),
                );
                if cfg.show_values {
                    out.push(
                        LayoutPrimitive::label(
                            Point::new(cx, r.y - cfg.label_gap - font / 2.0),
                            value_text,
                            TextAlign::Middle,
                            font,
                            theme.text,
                        )
                        .for_item(i),
                    );
                }
            }
            Orientation::Horizontal => {
                let cy = r.y + r.height / 2.0;
                let label = truncate_to_width(&bar.label, font, cfg.padding.left - cfg.label_gap);
                out.push(
                    LayoutPrimitive::label(
                        Point::new(plot.x - cfg.label_gap, cy),
                        label,
                        TextAlign::End,
                        font,
                        theme.text,
                    )
                    .for_item(i),
                );
                if cfg.show_values {
                    out.push(
                        LayoutPrimitive::label(
                            Point::new(r.right() + cfg.label_gap, cy),
                            value_text,
                            TextAlign::Start,
                            font,
                            theme.text,
                        )
                        .for_item(i),
                    );
                }
            }
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedBarConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub gap: f64,
    pub min_thickness: f64,
    pub show_totals: bool,
    pub label_gap: f64,
    pub locale: String,
}

impl Default for StackedBarConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding {
                top: 40.0,
                right: 96.0,
                bottom: 40.0,
                left: 160.0,
            },
            gap: 16.0,
            min_thickness: 4.0,
            show_totals: true,
            label_gap: 8.0,
            locale: "en".into(),
        }
    }
}

/// Horizontal stacked bars. Each bar's length is its total against the largest
/// total; segments accumulate left to right and are colored by segment index.
pub fn stacked_bar_chart(
    rows: &[StackedBar],
    cfg: &StackedBarConfig,
    theme: &Theme,
) -> Vec<LayoutPrimitive> {
    if rows.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let font = theme.font_px;
    let max_total = max_floor(rows.iter().map(StackedBar::total));
    let slot = plot.height / rows.len() as f64;
    let thickness = (slot - cfg.gap).max(cfg.min_thickness);
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let y = plot.y + i as f64 * slot + (slot - thickness) / 2.0;
        let total = row.total();
        let bar_len = normalize(total, 0.0, max_total) * plot.width;
        let mut x = plot.x;
        if total > 0.0 {
            for (j, seg) in row.segments.iter().enumerate() {
                let w = clamp_non_negative(seg.value) / total * bar_len;
                out.push(
                    LayoutPrimitive::rect(x, y, w, thickness, Paint::fill(theme.palette.color(j)), Role::Mark)
                        .for_item(i),
                );
                x += w;
            }
        }
        let cy = y + thickness / 2.0;
        out.push(
            LayoutPrimitive::label(
                Point::new(plot.x - cfg.label_gap, cy),
                truncate_to_width(&row.label, font, cfg.padding.left - cfg.label_gap),
                TextAlign::End,
                font,
                theme.text,
            )
            .for_item(i),
        );
        if cfg.show_totals {
            out.push(
                LayoutPrimitive::label(
                    Point::new(x + cfg.label_gap, cy),
                    format_value(total, &cfg.locale),
                    TextAlign::Start,
                    font,
                    theme.text,
                )
                .for_item(i),
            );
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaChartConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub max_value: Option<f64>,
    /// Close the polyline down to the baseline and fill it.
    pub fill: bool,
    pub fill_opacity: f64,
    pub stroke_width: f64,
    pub show_points: bool,
    pub point_radius: f64,
}

impl Default for AreaChartConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding::uniform(48.0),
            max_value: None,
            fill: true,
            fill_opacity: 0.25,
            stroke_width: 2.0,
            show_points: false,
            point_radius: 4.0,
        }
    }
}

/// Spread values evenly across the plot box width and map them vertically
/// through `range` (bottom = `range.min`). A single value sits in the center.
pub fn series_points(values: &[f64], plot: Rect, range: ValueRange) -> Vec<Point> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n == 1 {
                plot.x + plot.width / 2.0
            } else {
                plot.x + plot.width * i as f64 / (n - 1) as f64
            };
            let y = LinearScale::new(range, plot.bottom(), plot.y).map(*v);
            Point::new(x, y)
        })
        .collect()
}

/// Close a polyline down to `baseline_y` by appending the two baseline corners.
pub fn close_to_baseline(points: &[Point], baseline_y: f64) -> Vec<Point> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let mut poly = points.to_vec();
    poly.push(Point::new(last.x, baseline_y));
    poly.push(Point::new(first.x, baseline_y));
    poly
}

/// Area chart over one series.
pub fn area_chart(series: &[DataPoint], cfg: &AreaChartConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if series.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let max = cfg
        .max_value
        .filter(|m| *m > 0.0)
        .unwrap_or_else(|| max_floor(values.iter().copied()));
    let points = series_points(&values, plot, ValueRange::new(0.0, max));
    let color = theme.palette.color(0);
    let font = theme.font_px;
    let mut out = Vec::new();

    out.push(LayoutPrimitive::line(
        Point::new(plot.x, plot.bottom()),
        Point::new(plot.right(), plot.bottom()),
        Paint::stroke(theme.guide, 1.0),
        Role::Guide,
    ));
    if cfg.fill {
        out.push(LayoutPrimitive::polygon(
            close_to_baseline(&points, plot.bottom()),
            Paint::fill(color).with_opacity(cfg.fill_opacity),
            Role::Mark,
        ));
    }
    out.push(LayoutPrimitive::polyline(
        points.clone(),
        Paint::stroke(color, cfg.stroke_width),
        Role::Mark,
    ));
    for (i, (p, dp)) in points.iter().zip(series).enumerate() {
        if cfg.show_points {
            out.push(
                LayoutPrimitive::circle(*p, cfg.point_radius, Paint::fill(color), Role::Mark).for_item(i),
            );
        }
        out.push(
            LayoutPrimitive::label(
                Point::new(p.x, plot.bottom() + 8.0 + font / 2.0),
                dp.label.clone(),
                TextAlign::Middle,
                font,
                theme.text,
            )
            .for_item(i),
        );
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub stroke_width: f64,
    pub fill: bool,
    pub fill_opacity: f64,
    pub end_marker: bool,
    pub marker_radius: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::new(0.0, 0.0, 160.0, 40.0),
            padding: Padding::uniform(4.0),
            stroke_width: 1.5,
            fill: false,
            fill_opacity: 0.2,
            end_marker: true,
            marker_radius: 2.5,
        }
    }
}

/// Compact trend line scaled to the series' own min..max; a flat series runs
/// along the vertical midline.
pub fn sparkline(values: &[f64], cfg: &SparklineConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if values.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let range = ValueRange::of(values.iter().copied());
    let points = series_points(values, plot, range);
    let color = theme.palette.color(0);
    let mut out = Vec::new();
    if cfg.fill {
        out.push(LayoutPrimitive::polygon(
            close_to_baseline(&points, plot.bottom()),
            Paint::fill(color).with_opacity(cfg.fill_opacity),
            Role::Mark,
        ));
    }
    out.push(LayoutPrimitive::polyline(
        points.clone(),
        Paint::stroke(color, cfg.stroke_width),
        Role::Mark,
    ));
    if cfg.end_marker
        && let Some(last) = points.last()
    {
        out.push(
            LayoutPrimitive::circle(*last, cfg.marker_radius, Paint::fill(theme.accent), Role::Mark)
                .for_item(points.len() - 1),
        );
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub point_radius: f64,
    pub show_labels: bool,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding::uniform(56.0),
            point_radius: 6.0,
            show_labels: true,
        }
    }
}

/// Scatter plot with independent x and y ranges, each including zero.
pub fn scatter_plot(points: &[ScatterPoint], cfg: &ScatterConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if points.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let xs = LinearScale::new(
        ValueRange::including_zero(points.iter().map(|p| p.x)),
        plot.x,
        plot.right(),
    );
    let ys = LinearScale::new(
        ValueRange::including_zero(points.iter().map(|p| p.y)),
        plot.bottom(),
        plot.y,
    );
    let guide = Paint::stroke(theme.guide, 1.0);
    let mut out = vec![
        LayoutPrimitive::line(
            Point::new(plot.x, ys.map(0.0)),
            Point::new(plot.right(), ys.map(0.0)),
            guide.clone(),
            Role::Guide,
        ),
        LayoutPrimitive::line(
            Point::new(xs.map(0.0), plot.y),
            Point::new(xs.map(0.0), plot.bottom()),
            guide,
            Role::Guide,
        ),
    ];
    for (i, p) in points.iter().enumerate() {
        let at = Point::new(xs.map(p.x), ys.map(p.y));
        out.push(
            LayoutPrimitive::circle(at, cfg.point_radius, Paint::fill(theme.palette.color(i)), Role::Mark)
                .for_item(i),
        );
        if cfg.show_labels {
            out.push(
                LayoutPrimitive::label(
                    Point::new(at.x + cfg.point_radius + 4.0, at.y),
                    p.label.clone(),
                    TextAlign::Start,
                    theme.font_px,
                    theme.text,
                )
                .for_item(i),
            );
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub cell_gap: f64,
    /// Zero cells still get this opacity so they stay visible.
    pub min_opacity: f64,
    pub max_value: Option<f64>,
    pub show_values: bool,
    pub locale: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding {
                top: 56.0,
                right: 40.0,
                bottom: 40.0,
                left: 140.0,
            },
            cell_gap: 2.0,
            min_opacity: 0.08,
            max_value: None,
            show_values: true,
            locale: "en".into(),
        }
    }
}

/// Opacity of a heatmap cell: `value / max`, floored at `min_opacity`.
pub fn cell_opacity(value: f64, max: f64, min_opacity: f64) -> f64 {
    normalize(clamp_non_negative(value), 0.0, max.max(f64::MIN_POSITIVE)).max(min_opacity)
}

/// Heatmap grid; cell opacity encodes the value against the grid maximum.
pub fn heatmap(grid: &HeatmapGrid, cfg: &HeatmapConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let rows = grid.rows.len().max(grid.values.len());
    let cols = grid
        .columns
        .len()
        .max(grid.values.iter().map(Vec::len).max().unwrap_or(0));
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let max = cfg
        .max_value
        .filter(|m| *m > 0.0)
        .unwrap_or_else(|| max_floor(grid.values.iter().flatten().copied()));
    let cell_w = plot.width / cols as f64;
    let cell_h = plot.height / rows as f64;
    let base = theme.palette.color(0);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(rows * cols + rows + cols);

    for r in 0..rows {
        for c in 0..cols {
            let v = grid.value(r, c);
            let x = plot.x + c as f64 * cell_w + cfg.cell_gap / 2.0;
            let y = plot.y + r as f64 * cell_h + cfg.cell_gap / 2.0;
            let w = (cell_w - cfg.cell_gap).max(0.0);
            let h = (cell_h - cfg.cell_gap).max(0.0);
            let paint = Paint::fill(base)
                .with_opacity(cell_opacity(v, max, cfg.min_opacity))
                .with_stroke(theme.guide, 1.0);
            out.push(LayoutPrimitive::rect(x, y, w, h, paint, Role::Mark).for_item(r * cols + c));
            if cfg.show_values {
                out.push(
                    LayoutPrimitive::label(
                        Point::new(x + w / 2.0, y + h / 2.0),
                        format_value(v, &cfg.locale),
                        TextAlign::Middle,
                        font * 0.85,
                        theme.text,
                    )
                    .for_item(r * cols + c),
                );
            }
        }
    }
    for (r, name) in grid.rows.iter().enumerate() {
        out.push(LayoutPrimitive::label(
            Point::new(plot.x - 8.0, plot.y + (r as f64 + 0.5) * cell_h),
            truncate_to_width(name, font, cfg.padding.left - 8.0),
            TextAlign::End,
            font,
            theme.text,
        ));
    }
    for (c, name) in grid.columns.iter().enumerate() {
        out.push(LayoutPrimitive::label(
            Point::new(plot.x + (c as f64 + 0.5) * cell_w, plot.y - 8.0 - font / 2.0),
            truncate_to_width(name, font, cell_w),
            TextAlign::Middle,
            font,
            theme.text,
        ));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub canvas: Rect,
    pub padding: Padding,
    /// Width reserved left of the bands for the row label.
    pub label_width: f64,
    pub max_value: Option<f64>,
    /// Value bar height as a fraction of the band height.
    pub value_bar_ratio: f64,
    /// Target tick height as a fraction of the band height.
    pub target_ratio: f64,
    pub row_gap: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::new(0.0, 0.0, 960.0, 240.0),
            padding: Padding::uniform(24.0),
            label_width: 160.0,
            max_value: None,
            value_bar_ratio: 0.33,
            target_ratio: 0.7,
            row_gap: 16.0,
        }
    }
}

/// Bullet charts, one row per entry: three nested qualitative bands, a thin
/// value bar and a target tick.
pub fn bullet_chart(rows: &[BulletData], cfg: &BulletConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if rows.is_empty() {
        return Vec::new();
    }
    let plot = cfg.canvas.inset(&cfg.padding);
    let band_x = plot.x + cfg.label_width;
    let band_w = (plot.width - cfg.label_width).max(0.0);
    let row_h = ((plot.height - cfg.row_gap * (rows.len() - 1) as f64) / rows.len() as f64).max(0.0);
    let font = theme.font_px;
    let mut out = Vec::new();

    for (i, b) in rows.iter().enumerate() {
        let max = cfg.max_value.filter(|m| *m > 0.0).unwrap_or_else(|| {
            max_floor(b.ranges.iter().copied().chain([b.value, b.target]))
        });
        let y = plot.y + i as f64 * (row_h + cfg.row_gap);
        let len = |v: f64| normalize(v, 0.0, max) * band_w;

        let mut thresholds = b.ranges;
        thresholds.sort_by(f64::total_cmp);
        // widest band first so the narrower ones stack on top
        for (k, t) in thresholds.iter().enumerate().rev() {
            let opacity = 0.25 + 0.2 * (2 - k) as f64;
            out.push(
                LayoutPrimitive::rect(
                    band_x,
                    y,
                    len(*t),
                    row_h,
                    Paint::fill(theme.neutral).with_opacity(opacity),
                    Role::Track,
                )
                .for_item(i),
            );
        }
        let bar_h = row_h * cfg.value_bar_ratio;
        out.push(
            LayoutPrimitive::rect(
                band_x,
                y + (row_h - bar_h) / 2.0,
                len(b.value),
                bar_h,
                Paint::fill(theme.palette.color(i)),
                Role::Mark,
            )
            .for_item(i),
        );
        let tick_h = row_h * cfg.target_ratio;
        let tx = band_x + len(b.target);
        out.push(
            LayoutPrimitive::line(
                Point::new(tx, y + (row_h - tick_h) / 2.0),
                Point::new(tx, y + (row_h + tick_h) / 2.0),
                Paint::stroke(theme.text, 3.0),
                Role::Mark,
            )
            .for_item(i),
        );
        let label_room = cfg.label_width - 12.0;
        let label = if estimate_text_width(&b.label, font) > label_room {
            truncate_to_width(&b.label, font, label_room)
        } else {
            b.label.clone()
        };
        out.push(
            LayoutPrimitive::label(
                Point::new(band_x - 12.0, y + row_h / 2.0),
                label,
                TextAlign::End,
                font,
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
    fn dense_bars_keep_min_thickness() {
        let bars: Vec<DataPoint> = (0..500).map(|i| DataPoint::new(format!("b{i}"), 1.0)).collect();
        let cfg = BarChartConfig::default();
        let g = bar_geometry(&bars, &cfg);
        assert!(g.iter().all(|b| b.thickness == cfg.min_thickness));
    }

    #[test]
    fn single_point_series_is_centered() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let pts = series_points(&[3.0], plot, ValueRange::new(0.0, 3.0));
        assert_eq!(pts[0], Point::new(50.0, 0.0));
    }
}
