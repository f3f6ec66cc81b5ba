//! Proportional area charts: funnel, pyramid, treemap strip, waterfall and bridge.

use serde::{Deserialize, Serialize};

use super::text::{format_value, truncate_to_width};
use crate::geometry::{lerp, Padding, Point, Rect, DEFAULT_CANVAS};
use crate::models::{DataPoint, Segment};
use crate::primitive::{LayoutPrimitive, Paint, Role, TextAlign};
use crate::scale::{finite_or_zero, proportions, LinearScale, ValueRange};
use crate::style::{LineDash, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub canvas: Rect,
    pub padding: Padding,
    /// Narrowest layer edge as a fraction of the plot width.
    pub min_width_ratio: f64,
    pub layer_gap: f64,
    pub show_values: bool,
    pub locale: String,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding::uniform(40.0),
            min_width_ratio: 0.25,
            layer_gap: 6.0,
            show_values: true,
            locale: "en".into(),
        }
    }
}

impl FunnelConfig {
    /// Defaults for a pyramid: the top layer closes to a point.
    pub fn pyramid() -> Self {
        Self {
            min_width_ratio: 0.0,
            ..Self::default()
        }
    }
}

/// Trapezoids for `n` stacked layers, each as four corners clockwise from
/// top-left.
///
/// Layer `i` spans widths `lerp(wide, narrow, i/n)` to `lerp(wide, narrow, (i+1)/n)`
/// when `narrowing` (funnel), or the reverse (pyramid).
pub fn trapezoid_layers(n: usize, plot: Rect, min_width_ratio: f64, gap: f64, narrowing: bool) -> Vec<[Point; 4]> {
    if n == 0 {
        return Vec::new();
    }
    let max_w = plot.width;
    let min_w = plot.width * min_width_ratio.clamp(0.0, 1.0);
    let (from_w, to_w) = if narrowing { (max_w, min_w) } else { (min_w, max_w) };
    let layer_h = ((plot.height - gap * (n - 1) as f64) / n as f64).max(0.0);
    let cx = plot.center().x;

    (0..n)
        .map(|i| {
            let top_w = lerp(from_w, to_w, i as f64 / n as f64);
            let bottom_w = lerp(from_w, to_w, (i + 1) as f64 / n as f64);
            let y0 = plot.y + i as f64 * (layer_h + gap);
            let y1 = y0 + layer_h;
            [
                Point::new(cx - top_w / 2.0, y0),
                Point::new(cx + top_w / 2.0, y0),
                Point::new(cx + bottom_w / 2.0, y1),
                Point::new(cx - bottom_w / 2.0, y1),
            ]
        })
        .collect()
}

fn layered_chart(stages: &[Segment], cfg: &FunnelConfig, theme: &Theme, narrowing: bool) -> Vec<LayoutPrimitive> {
    let plot = cfg.canvas.inset(&cfg.padding);
    let layers = trapezoid_layers(stages.len(), plot, cfg.min_width_ratio, cfg.layer_gap, narrowing);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(stages.len() * 2);
    for (i, (stage, corners)) in stages.iter().zip(&layers).enumerate() {
        out.push(
            LayoutPrimitive::polygon(corners.to_vec(), Paint::fill(theme.palette.color(i)), Role::Mark).for_item(i),
        );
        let mid_y = (corners[0].y + corners[3].y) / 2.0;
        let text = if cfg.show_values {
            format!("{} {}", stage.label, format_value(stage.value, &cfg.locale))
        } else {
            stage.label.clone()
        };
        // label fits inside the narrower of the two edges
        let room = (corners[1].x - corners[0].x).min(corners[2].x - corners[3].x);
        let text = if room > font * 3.0 {
            truncate_to_width(&text, font, room - 8.0)
        } else {
            text
        };
        let (anchor, align) = if room > font * 3.0 {
            (Point::new(plot.center().x, mid_y), TextAlign::Middle)
        } else {
            (Point::new(corners[1].x.max(corners[2].x) + 12.0, mid_y), TextAlign::Start)
        };
        out.push(LayoutPrimitive::label(anchor, text, align, font, theme.text).for_item(i));
    }
    out
}

/// Funnel: widest layer on top.
pub fn funnel(stages: &[Segment], cfg: &FunnelConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    layered_chart(stages, cfg, theme, true)
}

/// Pyramid: apex on top.
pub fn pyramid(levels: &[Segment], cfg: &FunnelConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    layered_chart(levels, cfg, theme, false)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub gap: f64,
    pub show_values: bool,
    pub locale: String,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding::uniform(40.0),
            gap: 4.0,
            show_values: true,
            locale: "en".into(),
        }
    }
}

/// Widths of a one-dimensional treemap strip: `value / total * total_width`,
/// equal widths when the total is not positive.
pub fn strip_widths(values: &[f64], total_width: f64) -> Vec<f64> {
    proportions(values).into_iter().map(|s| s * total_width).collect()
}

/// One-row treemap.
pub fn treemap_strip(items: &[Segment], cfg: &TreemapConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let plot = cfg.canvas.inset(&cfg.padding);
    let values: Vec<f64> = items.iter().map(|s| s.value).collect();
    let widths = strip_widths(&values, plot.width);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(items.len() * 3);
    let mut x = plot.x;
    for (i, (item, w)) in items.iter().zip(widths).enumerate() {
        let inner_w = (w - cfg.gap).max(0.0);
        let rx = x + cfg.gap / 2.0;
        out.push(
            LayoutPrimitive::rect(rx, plot.y, inner_w, plot.height, Paint::fill(theme.palette.color(i)), Role::Mark)
                .for_item(i),
        );
        if inner_w > font {
            let cx = rx + inner_w / 2.0;
            let cy = plot.center().y;
            out.push(
                LayoutPrimitive::label(
                    Point::new(cx, cy - font * 0.7),
                    truncate_to_width(&item.label, font, inner_w - 8.0),
                    TextAlign::Middle,
                    font,
                    theme.background,
                )
                .for_item(i),
            );
            if cfg.show_values {
                out.push(
                    LayoutPrimitive::label(
                        Point::new(cx, cy + font * 0.7),
                        truncate_to_width(&format_value(item.value, &cfg.locale), font, inner_w - 8.0),
                        TextAlign::Middle,
                        font,
                        theme.background,
                    )
                    .for_item(i),
                );
            }
        }
        x += w;
    }
    out
}

/// Level of the running total before and after one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningTotal {
    pub before: f64,
    pub after: f64,
}

impl RunningTotal {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

/// Accumulate signed deltas from `start`. The last `after` is `start + Σ deltas`.
pub fn running_totals(start: f64, deltas: &[f64]) -> Vec<RunningTotal> {
    let mut level = finite_or_zero(start);
    deltas
        .iter()
        .map(|d| {
            let before = level;
            level += finite_or_zero(*d);
            RunningTotal { before, after: level }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallConfig {
    pub canvas: Rect,
    pub padding: Padding,
    pub gap: f64,
    pub min_thickness: f64,
    /// Append a closing bar from zero to the final total (waterfall only).
    pub show_total: bool,
    pub total_label: String,
    /// Dashed lines joining each bar's resting level to the next bar.
    pub show_guides: bool,
    pub locale: String,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            padding: Padding {
                top: 48.0,
                right: 40.0,
                bottom: 64.0,
                left: 40.0,
            },
            gap: 16.0,
            min_thickness: 4.0,
            show_total: true,
            total_label: "Total".into(),
            show_guides: true,
            locale: "en".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StepKind {
    Total,
    Delta,
}

struct Step<'a> {
    label: &'a str,
    span: RunningTotal,
    kind: StepKind,
}

/// Waterfall: deltas accumulated from zero, optionally closed by a total bar.
pub fn waterfall_chart(deltas: &[DataPoint], cfg: &WaterfallConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if deltas.is_empty() {
        return Vec::new();
    }
    let values: Vec<f64> = deltas.iter().map(|d| d.value).collect();
    let totals = running_totals(0.0, &values);
    let mut steps: Vec<Step> = deltas
        .iter()
        .zip(&totals)
        .map(|(d, t)| Step {
            label: &d.label,
            span: *t,
            kind: StepKind::Delta,
        })
        .collect();
    if cfg.show_total
        && let Some(last) = totals.last()
    {
        steps.push(Step {
            label: &cfg.total_label,
            span: RunningTotal {
                before: 0.0,
                after: last.after,
            },
            kind: StepKind::Total,
        });
    }
    layout_steps(&steps, cfg, theme)
}

/// Bridge: a start bar, the deltas, and an end bar at the final level.
pub fn bridge_chart(
    start: &DataPoint,
    deltas: &[DataPoint],
    end_label: &str,
    cfg: &WaterfallConfig,
    theme: &Theme,
) -> Vec<LayoutPrimitive> {
    let values: Vec<f64> = deltas.iter().map(|d| d.value).collect();
    let totals = running_totals(start.value, &values);
    let start_level = finite_or_zero(start.value);
    let final_level = totals.last().map_or(start_level, |t| t.after);

    let mut steps = Vec::with_capacity(deltas.len() + 2);
    steps.push(Step {
        label: &start.label,
        span: RunningTotal {
            before: 0.0,
            after: start_level,
        },
        kind: StepKind::Total,
    });
    steps.extend(deltas.iter().zip(&totals).map(|(d, t)| Step {
        label: &d.label,
        span: *t,
        kind: StepKind::Delta,
    }));
    steps.push(Step {
        label: end_label,
        span: RunningTotal {
            before: 0.0,
            after: final_level,
        },
        kind: StepKind::Total,
    });
    layout_steps(&steps, cfg, theme)
}

fn layout_steps(steps: &[Step], cfg: &WaterfallConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let plot = cfg.canvas.inset(&cfg.padding);
    // scale from every running level, not the raw deltas
    let range = ValueRange::including_zero(steps.iter().flat_map(|s| [s.span.before, s.span.after]));
    let ys = LinearScale::new(range, plot.bottom(), plot.y);
    let slot = plot.width / steps.len() as f64;
    let thickness = (slot - cfg.gap).max(cfg.min_thickness);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(steps.len() * 4 + 1);

    out.push(LayoutPrimitive::line(
        Point::new(plot.x, ys.map(0.0)),
        Point::new(plot.right(), ys.map(0.0)),
        Paint::stroke(theme.guide, 1.0),
        Role::Guide,
    ));

    let mut prev_edge: Option<(f64, f64)> = None;
    for (i, step) in steps.iter().enumerate() {
        let x = plot.x + i as f64 * slot + (slot - thickness) / 2.0;
        let y_a = ys.map(step.span.before);
        let y_b = ys.map(step.span.after);
        let top = y_a.min(y_b);
        let delta = step.span.delta();
        let color = match step.kind {
            StepKind::Total => theme.neutral,
            StepKind::Delta if delta > 0.0 => theme.positive,
            StepKind::Delta if delta < 0.0 => theme.negative,
            StepKind::Delta => theme.neutral,
        };

        if cfg.show_guides
            && let Some((px, py)) = prev_edge
        {
            out.push(
                LayoutPrimitive::line(
                    Point::new(px, py),
                    Point::new(x, py),
                    Paint::stroke(theme.guide, 1.0).with_dash(LineDash::Dash),
                    Role::Guide,
                )
                .for_item(i),
            );
        }
        out.push(
            LayoutPrimitive::rect(x, top, thickness, (y_a - y_b).abs(), Paint::fill(color), Role::Mark).for_item(i),
        );

        let cx = x + thickness / 2.0;
        let value_text = match step.kind {
            StepKind::Total => format_value(step.span.after, &cfg.locale),
            StepKind::Delta if delta > 0.0 => format!("+{}", format_value(delta, &cfg.locale)),
            StepKind::Delta => format_value(delta, &cfg.locale),
        };
        out.push(
            LayoutPrimitive::label(
                Point::new(cx, top - 6.0 - font / 2.0),
                value_text,
                TextAlign::Middle,
                font,
                theme.text,
            )
            .for_item(i),
        );
        out.push(
            LayoutPrimitive::label(
                Point::new(cx, plot.bottom() + 8.0 + font / 2.0),
                truncate_to_width(step.label, font, slot),
                TextAlign::Middle,
                font,
                theme.text,
            )
            .for_item(i),
        );
        prev_edge = Some((x + thickness, y_b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_apex_is_a_point() {
        let layers = trapezoid_layers(3, Rect::new(0.0, 0.0, 300.0, 300.0), 0.0, 0.0, false);
        assert_eq!(layers[0][0], layers[0][1]);
        assert_eq!(layers[2][2].x - layers[2][3].x, 300.0);
    }

    #[test]
    fn strip_widths_fall_back_to_equal() {
        assert_eq!(strip_widths(&[0.0, 0.0, 0.0, 0.0], 100.0), vec![25.0; 4]);
    }
}
