//! Circular charts: pie, donut, gauge, progress ring and harvey balls.
//!
//! Angles are degrees clockwise from 12 o'clock. Segments are laid out in input
//! order, each sweep starting where the previous one ended.

use serde::{Deserialize, Serialize};

use super::align_for_angle;
use super::text::{format_percent, truncate_to_width};
use crate::geometry::{polar, Point, Rect, DEFAULT_CANVAS};
use crate::models::{DataPoint, Segment};
pub use crate::primitive::arc_path;
use crate::primitive::{LayoutPrimitive, Paint, PathCmd, Role, TextAlign};
use crate::scale::{normalize, proportions};
use crate::style::Theme;

/// Angular extent of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,
    pub sweep: f64,
}

impl Sweep {
    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }

    pub fn mid(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Contiguous sweeps for `segments`, starting at `start_angle`.
///
/// Negative values count as zero; a zero total falls back to equal shares.
pub fn sweep_angles(segments: &[Segment], start_angle: f64) -> Vec<Sweep> {
    let values: Vec<f64> = segments.iter().map(|s| s.value).collect();
    let mut offset = start_angle;
    proportions(&values)
        .into_iter()
        .map(|share| {
            let s = Sweep {
                start: offset,
                sweep: share * 360.0,
            };
            offset += s.sweep;
            s
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    pub canvas: Rect,
    /// Outer radius; derived from the canvas when `None`.
    pub radius: Option<f64>,
    /// Inner radius as a fraction of the outer radius (0 = pie).
    pub inner_ratio: f64,
    /// Reference angle of the first slice.
    pub start_angle: f64,
    pub show_labels: bool,
    /// Distance from the outer edge to the label anchor.
    pub label_offset: f64,
    /// Text in the donut hole.
    pub center_label: Option<String>,
    /// Stroke separating neighbouring slices, in background color.
    pub separator_width: f64,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            radius: None,
            inner_ratio: 0.0,
            start_angle: 0.0,
            show_labels: true,
            label_offset: 20.0,
            center_label: None,
            separator_width: 2.0,
        }
    }
}

impl PieConfig {
    /// Defaults for a donut chart.
    pub fn donut() -> Self {
        Self {
            inner_ratio: 0.6,
            ..Self::default()
        }
    }

    fn outer_radius(&self) -> f64 {
        self.radius
            .unwrap_or_else(|| (self.canvas.width.min(self.canvas.height) / 2.0 - 64.0).max(8.0))
    }
}

/// Pie chart; see [`sweep_angles`] for the proportional rule.
pub fn pie_chart(segments: &[Segment], cfg: &PieConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if segments.is_empty() {
        return Vec::new();
    }
    let center = cfg.canvas.center();
    let outer = cfg.outer_radius();
    let inner = outer * cfg.inner_ratio.clamp(0.0, 0.95);
    let sweeps = sweep_angles(segments, cfg.start_angle);
    let font = theme.font_px;
    let mut out = Vec::with_capacity(segments.len() * 2 + 1);

    for (i, (seg, sw)) in segments.iter().zip(&sweeps).enumerate() {
        let cmds = arc_path(center, outer, inner, sw.start, sw.sweep);
        if cmds.is_empty() {
            continue;
        }
        let mut paint = Paint::fill(theme.palette.color(i));
        if cfg.separator_width > 0.0 && sweeps.len() > 1 {
            paint = paint.with_stroke(theme.background, cfg.separator_width);
        }
        out.push(LayoutPrimitive::path(cmds, paint, Role::Mark).for_item(i));

        if cfg.show_labels {
            let anchor = polar(center, outer + cfg.label_offset, sw.mid());
            let align = align_for_angle(sw.mid());
            let text = format!(
                "{} {}",
                truncate_to_width(&seg.label, font, 160.0),
                format_percent(sw.sweep / 360.0)
            );
            out.push(LayoutPrimitive::label(anchor, text, align, font, theme.text).for_item(i));
        }
    }
    if inner > 0.0
        && let Some(text) = &cfg.center_label
    {
        out.push(LayoutPrimitive::label(
            center,
            truncate_to_width(text, font * 1.5, inner * 1.8),
            TextAlign::Middle,
            font * 1.5,
            theme.text,
        ));
    }
    out
}

/// Donut chart: a pie with a hole. A zero `inner_ratio` is bumped to the donut default.
pub fn donut_chart(segments: &[Segment], cfg: &PieConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    if cfg.inner_ratio > 0.0 {
        pie_chart(segments, cfg, theme)
    } else {
        let cfg = PieConfig {
            inner_ratio: PieConfig::donut().inner_ratio,
            ..cfg.clone()
        };
        pie_chart(segments, &cfg, theme)
    }
}

/// Shape of the background track of a gauge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcTrack {
    /// 180° from 9 o'clock to 3 o'clock.
    #[default]
    Half,
    /// 360° starting at 12 o'clock.
    Full,
}

impl ArcTrack {
    fn start(&self) -> f64 {
        match self {
            ArcTrack::Half => -90.0,
            ArcTrack::Full => 0.0,
        }
    }

    fn sweep(&self) -> f64 {
        match self {
            ArcTrack::Half => 180.0,
            ArcTrack::Full => 360.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub canvas: Rect,
    pub radius: Option<f64>,
    /// Ring thickness.
    pub thickness: f64,
    pub track: ArcTrack,
    pub show_label: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::new(0.0, 0.0, 400.0, 400.0),
            radius: None,
            thickness: 32.0,
            track: ArcTrack::Half,
            show_label: true,
        }
    }
}

impl GaugeConfig {
    pub fn progress_ring() -> Self {
        Self {
            track: ArcTrack::Full,
            thickness: 20.0,
            ..Self::default()
        }
    }
}

/// Filled fraction of a gauge: `clamp((value - min) / (max - min), 0, 1)`.
/// A degenerate range reads as empty.
pub fn gauge_fraction(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        return 0.0;
    }
    normalize(value, min, max)
}

/// Gauge or progress ring: a track arc with a value arc over it.
pub fn gauge(value: f64, min: f64, max: f64, cfg: &GaugeConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let frac = gauge_fraction(value, min, max);
    let side = cfg.canvas.width.min(cfg.canvas.height);
    let mut center = cfg.canvas.center();
    let radius = cfg.radius.unwrap_or((side / 2.0 - 8.0).max(1.0));
    if cfg.track == ArcTrack::Half {
        // the half ring sits on the canvas' horizontal midline shifted down
        center.y += radius / 2.0;
    }
    let inner = (radius - cfg.thickness).max(0.0);
    let start = cfg.track.start();

    let mut out = vec![LayoutPrimitive::path(
        arc_path(center, radius, inner, start, cfg.track.sweep()),
        Paint::fill(theme.neutral).with_opacity(0.35),
        Role::Track,
    )];
    let value_cmds = arc_path(center, radius, inner, start, frac * cfg.track.sweep());
    if !value_cmds.is_empty() {
        out.push(LayoutPrimitive::path(value_cmds, Paint::fill(theme.accent), Role::Mark).for_item(0));
    }
    if cfg.show_label {
        let anchor = match cfg.track {
            ArcTrack::Half => Point::new(center.x, center.y - theme.font_px * 1.5),
            ArcTrack::Full => center,
        };
        out.push(
            LayoutPrimitive::label(anchor, format_percent(frac), TextAlign::Middle, theme.font_px * 2.0, theme.text)
                .for_item(0),
        );
    }
    out
}

/// Full-circle gauge.
pub fn progress_ring(value: f64, min: f64, max: f64, cfg: &GaugeConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let cfg = GaugeConfig {
        track: ArcTrack::Full,
        ..cfg.clone()
    };
    gauge(value, min, max, &cfg, theme)
}

/// The five discrete fill states of a harvey ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarveyFill {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl HarveyFill {
    /// Snap a percentage to the nearest quarter.
    pub fn from_percent(pct: f64) -> Self {
        let q = (pct.clamp(0.0, 100.0) / 25.0).round() as u8;
        match q {
            0 => HarveyFill::Empty,
            1 => HarveyFill::Quarter,
            2 => HarveyFill::Half,
            3 => HarveyFill::ThreeQuarters,
            _ => HarveyFill::Full,
        }
    }

    pub fn percent(&self) -> f64 {
        match self {
            HarveyFill::Empty => 0.0,
            HarveyFill::Quarter => 25.0,
            HarveyFill::Half => 50.0,
            HarveyFill::ThreeQuarters => 75.0,
            HarveyFill::Full => 100.0,
        }
    }
}

/// One harvey ball: an outline circle plus the fill for its state.
pub fn harvey_ball(fill: HarveyFill, center: Point, radius: f64, theme: &Theme) -> Vec<LayoutPrimitive> {
    let color = theme.palette.color(0);
    let outline = LayoutPrimitive::circle(center, radius, Paint::stroke(color, 2.0), Role::Track);
    let top = Point::new(center.x, center.y - radius);
    let wedge = |large_arc: bool, to: Point| {
        vec![
            PathCmd::MoveTo(center),
            PathCmd::LineTo(top),
            PathCmd::ArcTo {
                radius,
                large_arc,
                sweep: true,
                to,
            },
            PathCmd::Close,
        ]
    };
    let body = match fill {
        HarveyFill::Empty => None,
        HarveyFill::Quarter => Some(LayoutPrimitive::path(
            wedge(false, Point::new(center.x + radius, center.y)),
            Paint::fill(color),
            Role::Mark,
        )),
        HarveyFill::Half => Some(LayoutPrimitive::path(
            vec![
                PathCmd::MoveTo(top),
                PathCmd::ArcTo {
                    radius,
                    large_arc: false,
                    sweep: true,
                    to: Point::new(center.x, center.y + radius),
                },
                PathCmd::Close,
            ],
            Paint::fill(color),
            Role::Mark,
        )),
        HarveyFill::ThreeQuarters => Some(LayoutPrimitive::path(
            wedge(true, Point::new(center.x - radius, center.y)),
            Paint::fill(color),
            Role::Mark,
        )),
        HarveyFill::Full => Some(LayoutPrimitive::circle(center, radius, Paint::fill(color), Role::Mark)),
    };
    let mut out = vec![outline];
    out.extend(body);
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarveyConfig {
    pub canvas: Rect,
    pub radius: f64,
    pub row_gap: f64,
}

impl Default for HarveyConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::new(0.0, 0.0, 480.0, 320.0),
            radius: 14.0,
            row_gap: 12.0,
        }
    }
}

/// A labelled column of harvey balls; each value is a percentage.
pub fn harvey_balls(items: &[DataPoint], cfg: &HarveyConfig, theme: &Theme) -> Vec<LayoutPrimitive> {
    let mut out = Vec::new();
    let step = cfg.radius * 2.0 + cfg.row_gap;
    for (i, item) in items.iter().enumerate() {
        let center = Point::new(
            cfg.canvas.x + cfg.radius + 2.0,
            cfg.canvas.y + cfg.radius + 2.0 + i as f64 * step,
        );
        out.extend(
            harvey_ball(HarveyFill::from_percent(item.value), center, cfg.radius, theme)
                .into_iter()
                .map(|p| p.for_item(i)),
        );
        out.push(
            LayoutPrimitive::label(
                Point::new(center.x + cfg.radius + 12.0, center.y),
                item.label.clone(),
                TextAlign::Start,
                theme.font_px,
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
    fn zero_sweep_emits_nothing() {
        assert!(arc_path(Point::ZERO, 10.0, 0.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn large_arc_flag_follows_sweep() {
        let cmds = arc_path(Point::ZERO, 10.0, 0.0, 0.0, 270.0);
        assert!(cmds.iter().any(|c| matches!(c, PathCmd::ArcTo { large_arc: true, .. })));
    }

    #[test]
    fn harvey_snaps_to_quarters() {
        assert_eq!(HarveyFill::from_percent(0.0), HarveyFill::Empty);
        assert_eq!(HarveyFill::from_percent(30.0), HarveyFill::Quarter);
        assert_eq!(HarveyFill::from_percent(62.5), HarveyFill::ThreeQuarters);
        assert_eq!(HarveyFill::from_percent(140.0), HarveyFill::Full);
    }
}
