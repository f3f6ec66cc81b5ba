//! Renderer-independent drawing instructions produced by every layout.

use serde::{Deserialize, Serialize};

use crate::geometry::{polar, Point};
use crate::style::{LineDash, Rgba};

/// One path command, with SVG path semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc from the current point to `to`.
    ArcTo {
        radius: f64,
        large_arc: bool,
        /// `true` for a clockwise sweep on screen.
        sweep: bool,
        to: Point,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
    },
    Close,
}

/// Horizontal anchoring of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Start,
    #[default]
    Middle,
    End,
}

/// Geometry of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Path {
        commands: Vec<PathCmd>,
    },
    Polyline {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
    Line {
        from: Point,
        to: Point,
    },
    /// Text centered vertically on `anchor`.
    Label {
        anchor: Point,
        text: String,
        align: TextAlign,
        font_px: f64,
    },
}

/// Fill and stroke for a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f64,
    /// Multiplies the colors' own alpha.
    pub opacity: f64,
    pub dash: LineDash,
}

impl Paint {
    pub fn fill(color: Rgba) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
            dash: LineDash::Solid,
        }
    }

    pub fn stroke(color: Rgba, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            opacity: 1.0,
            dash: LineDash::Solid,
        }
    }

    pub fn with_stroke(mut self, color: Rgba, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_dash(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }
}

/// What a primitive stands for; lets consumers style or sequence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A data-bearing mark (bar, slice, node, ribbon).
    Mark,
    /// Background track or band behind marks.
    Track,
    /// Line or arrow joining two marks.
    Connector,
    /// Axis, grid line, tick or dashed guide.
    Guide,
    Label,
}

/// A single positioned drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPrimitive {
    pub shape: Shape,
    pub paint: Paint,
    pub role: Role,
    /// Index of the input item this primitive represents, if any.
    pub item: Option<usize>,
}

impl LayoutPrimitive {
    pub fn new(shape: Shape, paint: Paint, role: Role) -> Self {
        Self {
            shape,
            paint,
            role,
            item: None,
        }
    }

    pub fn for_item(mut self, item: usize) -> Self {
        self.item = Some(item);
        self
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, paint: Paint, role: Role) -> Self {
        Self::new(
            Shape::Rect {
                x,
                y,
                width,
                height,
                corner_radius: 0.0,
            },
            paint,
            role,
        )
    }

    pub fn circle(center: Point, radius: f64, paint: Paint, role: Role) -> Self {
        Self::new(Shape::Circle { center, radius }, paint, role)
    }

    pub fn path(commands: Vec<PathCmd>, paint: Paint, role: Role) -> Self {
        Self::new(Shape::Path { commands }, paint, role)
    }

    pub fn line(from: Point, to: Point, paint: Paint, role: Role) -> Self {
        Self::new(Shape::Line { from, to }, paint, role)
    }

    pub fn polygon(points: Vec<Point>, paint: Paint, role: Role) -> Self {
        Self::new(Shape::Polygon { points }, paint, role)
    }

    pub fn polyline(points: Vec<Point>, paint: Paint, role: Role) -> Self {
        Self::new(Shape::Polyline { points }, paint, role)
    }

    pub fn label(anchor: Point, text: impl Into<String>, align: TextAlign, font_px: f64, color: Rgba) -> Self {
        Self::new(
            Shape::Label {
                anchor,
                text: text.into(),
                align,
                font_px,
            },
            Paint::fill(color),
            Role::Label,
        )
    }

    /// Text of a label primitive.
    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Label { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Sweeps at or above this are drawn as a full ring.
const FULL_CIRCLE_EPS: f64 = 1e-9;

/// Path for a wedge (`inner == 0`) or annular sector.
///
/// A sweep of 360° or more emits a full circle as two half arcs (plus a
/// counter-wound inner ring for donuts). A sweep of zero yields no commands.
pub fn arc_path(center: Point, outer: f64, inner: f64, start: f64, sweep: f64) -> Vec<PathCmd> {
    if sweep <= 0.0 || outer <= 0.0 {
        return Vec::new();
    }
    let inner = inner.clamp(0.0, outer);
    if sweep >= 360.0 - FULL_CIRCLE_EPS {
        let mut cmds = ring(center, outer, start, true);
        if inner > 0.0 {
            cmds.extend(ring(center, inner, start, false));
        }
        return cmds;
    }
    let end = start + sweep;
    let large_arc = sweep > 180.0;
    let mut cmds = Vec::with_capacity(6);
    if inner > 0.0 {
        cmds.push(PathCmd::MoveTo(polar(center, outer, start)));
        cmds.push(PathCmd::ArcTo {
            radius: outer,
            large_arc,
            sweep: true,
            to: polar(center, outer, end),
        });
        cmds.push(PathCmd::LineTo(polar(center, inner, end)));
        cmds.push(PathCmd::ArcTo {
            radius: inner,
            large_arc,
            sweep: false,
            to: polar(center, inner, start),
        });
    } else {
        cmds.push(PathCmd::MoveTo(center));
        cmds.push(PathCmd::LineTo(polar(center, outer, start)));
        cmds.push(PathCmd::ArcTo {
            radius: outer,
            large_arc,
            sweep: true,
            to: polar(center, outer, end),
        });
    }
    cmds.push(PathCmd::Close);
    cmds
}

/// A closed circle made of two half arcs, wound clockwise or counter-clockwise.
fn ring(center: Point, r: f64, start: f64, clockwise: bool) -> Vec<PathCmd> {
    let half = if clockwise { 180.0 } else { -180.0 };
    vec![
        PathCmd::MoveTo(polar(center, r, start)),
        PathCmd::ArcTo {
            radius: r,
            large_arc: false,
            sweep: clockwise,
            to: polar(center, r, start + half),
        },
        PathCmd::ArcTo {
            radius: r,
            large_arc: false,
            sweep: clockwise,
            to: polar(center, r, start),
        },
        PathCmd::Close,
    ]
}

/// Flatten path commands into polylines, one per subpath.
///
/// Arcs and curves are approximated with straight segments no longer than
/// roughly `tolerance` layout units. Closed subpaths repeat their first point.
pub fn flatten(commands: &[PathCmd], tolerance: f64) -> Vec<Vec<Point>> {
    let tol = tolerance.max(0.05);
    let mut out: Vec<Vec<Point>> = Vec::new();
    let mut cur: Vec<Point> = Vec::new();
    let mut pen = Point::ZERO;
    let mut start = Point::ZERO;

    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(p) => {
                if cur.len() > 1 {
                    out.push(std::mem::take(&mut cur));
                }
                cur.clear();
                cur.push(p);
                pen = p;
                start = p;
            }
            PathCmd::LineTo(p) => {
                if cur.is_empty() {
                    cur.push(pen);
                }
                cur.push(p);
                pen = p;
            }
            PathCmd::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => {
                if cur.is_empty() {
                    cur.push(pen);
                }
                cur.extend(flatten_arc(pen, to, radius, large_arc, sweep, tol));
                pen = to;
            }
            PathCmd::CubicTo { c1, c2, to } => {
                if cur.is_empty() {
                    cur.push(pen);
                }
                let approx_len = pen.distance(c1) + c1.distance(c2) + c2.distance(to);
                let steps = ((approx_len / tol).ceil() as usize).clamp(1, 256);
                for i in 1..=steps {
                    let t = i as f64 / steps as f64;
                    let mt = 1.0 - t;
                    let a = mt * mt * mt;
                    let b = 3.0 * mt * mt * t;
                    let c = 3.0 * mt * t * t;
                    let d = t * t * t;
                    cur.push(Point::new(
                        a * pen.x + b * c1.x + c * c2.x + d * to.x,
                        a * pen.y + b * c1.y + c * c2.y + d * to.y,
                    ));
                }
                pen = to;
            }
            PathCmd::Close => {
                if !cur.is_empty() {
                    cur.push(start);
                    out.push(std::mem::take(&mut cur));
                }
                pen = start;
            }
        }
    }
    if cur.len() > 1 {
        out.push(cur);
    }
    out
}

/// Points along a circular arc (excluding `from`), following SVG endpoint
/// parameterization for a circle.
fn flatten_arc(from: Point, to: Point, radius: f64, large_arc: bool, sweep: bool, tol: f64) -> Vec<Point> {
    let chord = from.distance(to);
    if chord <= f64::EPSILON || radius <= f64::EPSILON {
        return vec![to];
    }
    // SVG scales the radius up when it cannot span the chord.
    let r = radius.max(chord / 2.0);
    let mid = from.lerp(to, 0.5);
    let h = (r * r - chord * chord / 4.0).max(0.0).sqrt();
    let (ux, uy) = ((to.x - from.x) / chord, (to.y - from.y) / chord);
    // Center lies to the right of the chord for a clockwise small arc.
    let side = if large_arc == sweep { -1.0 } else { 1.0 };
    let center = Point::new(mid.x - side * uy * h, mid.y + side * ux * h);

    let a0 = (from.y - center.y).atan2(from.x - center.x);
    let a1 = (to.y - center.y).atan2(to.x - center.x);
    let mut delta = a1 - a0;
    let tau = std::f64::consts::TAU;
    if sweep {
        while delta <= 0.0 {
            delta += tau;
        }
    } else {
        while delta >= 0.0 {
            delta -= tau;
        }
    }
    let steps = ((delta.abs() * r / tol).ceil() as usize).clamp(2, 512);
    (1..=steps)
        .map(|i| {
            let a = a0 + delta * i as f64 / steps as f64;
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_half_arc_stays_on_circle() {
        let cmds = vec![
            PathCmd::MoveTo(Point::new(0.0, -10.0)),
            PathCmd::ArcTo {
                radius: 10.0,
                large_arc: false,
                sweep: true,
                to: Point::new(0.0, 10.0),
            },
        ];
        let lines = flatten(&cmds, 0.5);
        assert_eq!(lines.len(), 1);
        for p in &lines[0] {
            assert!((p.distance(Point::ZERO) - 10.0).abs() < 1e-6);
        }
        // clockwise from the top passes through the right-hand side
        assert!(lines[0].iter().any(|p| p.x > 9.0));
    }
}
