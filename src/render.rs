//! Preview renderer: paint layout primitives to **SVG** or **PNG** with `plotters`.
//!
//! Layout units map one to one onto pixels. This is a preview, not a production
//! paint step: corner radii are ignored and circle strokes are always solid.
//!
//! Text needs a font. Plotters' `ab_glyph` path does not discover OS fonts, so a
//! font file is looked up once (`DECKGEO_FONT`, then common system locations). When
//! none is found labels are skipped with a warning and everything else is drawn.

use crate::geometry::Point;
use crate::primitive::{flatten, LayoutPrimitive, Paint, Shape, TextAlign};
use crate::style::Rgba;
use anyhow::{anyhow, Result};
use log::{debug, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Once;

/// Curve flattening tolerance in pixels.
const FLATTEN_TOLERANCE: f64 = 0.5;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let from_env = std::env::var_os("DECKGEO_FONT").map(PathBuf::from);
        for path in from_env.into_iter().chain(FONT_CANDIDATES.iter().map(PathBuf::from)) {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // registered fonts must live for the whole process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                debug!("registered preview font {}", path.display());
                return;
            }
        }
        warn!("no usable font found, preview labels will be skipped (set DECKGEO_FONT)");
    });
}

/// Paint primitives into `path`: SVG if the extension is `svg`, PNG otherwise.
pub fn render_to_file<P: AsRef<Path>>(primitives: &[LayoutPrimitive], path: P, width: u32, height: u32) -> Result<()> {
    ensure_fonts_registered();
    let out_path = path.as_ref();
    let path_string = out_path.to_string_lossy().to_string();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_all(&root, primitives)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_all(&root, primitives)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_all<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, primitives: &[LayoutPrimitive]) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut skipped = 0usize;
    for prim in primitives {
        if let Shape::Label {
            anchor,
            text,
            align,
            font_px,
        } = &prim.shape
        {
            if let Err(e) = draw_label(area, *anchor, text, *align, *font_px, &prim.paint) {
                skipped += 1;
                debug!("label {text:?} not drawn: {e}");
            }
            continue;
        }
        draw_shape(area, &prim.shape, &prim.paint)?;
    }
    if skipped > 0 {
        warn!("{skipped} label(s) could not be drawn");
    }
    Ok(())
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn to_color(c: Rgba, opacity: f64) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, (c.alpha() * opacity).clamp(0.0, 1.0))
}

fn fill_style(paint: &Paint) -> Option<ShapeStyle> {
    paint.fill.map(|c| ShapeStyle {
        color: to_color(c, paint.opacity),
        filled: true,
        stroke_width: 0,
    })
}

fn stroke_style(paint: &Paint) -> Option<ShapeStyle> {
    paint.stroke.filter(|_| paint.stroke_width > 0.0).map(|c| ShapeStyle {
        color: to_color(c, paint.opacity),
        filled: false,
        stroke_width: paint.stroke_width.round().max(1.0) as u32,
    })
}

fn draw_shape<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, shape: &Shape, paint: &Paint) -> Result<()> {
    match shape {
        Shape::Rect {
            x, y, width, height, ..
        } => {
            let corners = [px(Point::new(*x, *y)), px(Point::new(x + width, y + height))];
            if let Some(style) = fill_style(paint) {
                area.draw(&Rectangle::new(corners, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            let outline = vec![
                Point::new(*x, *y),
                Point::new(x + width, *y),
                Point::new(x + width, y + height),
                Point::new(*x, y + height),
                Point::new(*x, *y),
            ];
            stroke_polyline(area, &outline, paint)?;
        }
        Shape::Circle { center, radius } => {
            let r = radius.round().max(0.0) as i32;
            if let Some(style) = fill_style(paint) {
                area.draw(&Circle::new(px(*center), r, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            if let Some(style) = stroke_style(paint) {
                area.draw(&Circle::new(px(*center), r, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        Shape::Path { commands } => {
            let subpaths = flatten(commands, FLATTEN_TOLERANCE);
            if let Some(style) = fill_style(paint) {
                // Subpaths are chained into one ring; counter-wound holes stay open.
                let mut ring: Vec<(i32, i32)> = subpaths.iter().flatten().map(|p| px(*p)).collect();
                if subpaths.len() > 1
                    && let Some(first) = ring.first().copied()
                {
                    ring.push(first);
                }
                if ring.len() > 2 {
                    area.draw(&Polygon::new(ring, style))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
            for sub in &subpaths {
                stroke_polyline(area, sub, paint)?;
            }
        }
        Shape::Polygon { points } => {
            if let Some(style) = fill_style(paint)
                && points.len() > 2
            {
                let pts: Vec<(i32, i32)> = points.iter().map(|p| px(*p)).collect();
                area.draw(&Polygon::new(pts, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            if let Some(first) = points.first() {
                let mut closed = points.clone();
                closed.push(*first);
                stroke_polyline(area, &closed, paint)?;
            }
        }
        Shape::Polyline { points } => stroke_polyline(area, points, paint)?,
        Shape::Line { from, to } => stroke_polyline(area, &[*from, *to], paint)?,
        Shape::Label { .. } => {}
    }
    Ok(())
}

fn stroke_polyline<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, points: &[Point], paint: &Paint) -> Result<()> {
    let Some(style) = stroke_style(paint) else {
        return Ok(());
    };
    let pattern = paint.dash.pattern(paint.stroke_width);
    for run in dash_runs(points, &pattern) {
        let pts: Vec<(i32, i32)> = run.iter().map(|p| px(*p)).collect();
        area.draw(&PathElement::new(pts, style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Split a polyline into the "on" runs of a dash pattern.
/// An empty pattern returns the whole polyline as one run.
pub fn dash_runs(points: &[Point], pattern: &[f64]) -> Vec<Vec<Point>> {
    if points.len() < 2 {
        return Vec::new();
    }
    if pattern.is_empty() {
        return vec![points.to_vec()];
    }
    let step = |i: usize| pattern[i % pattern.len()].max(0.5);
    let mut runs = Vec::new();
    let mut idx = 0usize;
    let mut left = step(0);
    let mut cur = vec![points[0]];
    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut seg = a.distance(b);
        while seg > 0.0 {
            let on = idx % 2 == 0;
            if seg < left {
                left -= seg;
                if on {
                    cur.push(b);
                }
                seg = 0.0;
            } else {
                let p = a.toward(b, left);
                if on {
                    cur.push(p);
                    runs.push(std::mem::take(&mut cur));
                } else {
                    cur = vec![p];
                }
                seg -= left;
                a = p;
                idx += 1;
                left = step(idx);
            }
        }
    }
    if idx % 2 == 0 && cur.len() > 1 {
        runs.push(cur);
    }
    runs
}

fn draw_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    anchor: Point,
    text: &str,
    align: TextAlign,
    font_px: f64,
    paint: &Paint,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let color = paint.fill.or(paint.stroke).unwrap_or(Rgba::rgb(0, 0, 0));
    let hpos = match align {
        TextAlign::Start => HPos::Left,
        TextAlign::Middle => HPos::Center,
        TextAlign::End => HPos::Right,
    };
    let color = to_color(color, paint.opacity);
    let style = TextStyle::from((FontFamily::SansSerif, font_px))
        .pos(Pos::new(hpos, VPos::Center))
        .color(&color);
    area.draw(&Text::new(text.to_string(), px(anchor), style))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_runs_follow_pattern() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let runs = dash_runs(&line, &[2.0, 3.0]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
        assert_eq!(runs[1], vec![Point::new(5.0, 0.0), Point::new(7.0, 0.0)]);
    }

    #[test]
    fn dash_runs_turn_corners() {
        let l = [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 3.0)];
        let runs = dash_runs(&l, &[4.0, 10.0]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 1.0)]);
    }

    #[test]
    fn solid_is_one_run() {
        let l = [Point::new(0.0, 0.0), Point::new(3.0, 0.0)];
        assert_eq!(dash_runs(&l, &[]).len(), 1);
    }
}
