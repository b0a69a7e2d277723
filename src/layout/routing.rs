//! Connector routing between node shapes
//!
//! Picks the best pair of attachment points on two bounding boxes and
//! synthesizes a cubic Bézier between them, with an optional arrowhead and
//! label anchor. Routing is pure and stateless; [`Connector`] wraps one
//! routed edge's surface handles and re-routes on demand.

use tracing::warn;

use crate::surface::{PathHandle, PathSpec, ShapeHandle, StrokeStyle, Surface, TextHandle, TextStyle};

use super::types::{BoundingBox, ConnectorGeometry, EdgeStyle, Point};

/// Default arrowhead barb length
pub const ARROW_LENGTH: f64 = 5.0;

/// Minimum control-point offset; keeps the curve non-degenerate for
/// adjacent or collinear shapes
pub const CURVATURE_FLOOR: f64 = 10.0;

const HIGHLIGHT_COLOR: &str = "green";
const HIGHLIGHT_WIDTH: f64 = 3.0;

/// Side of a bounding box a connector can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    North,
    South,
    West,
    East,
}

impl Anchor {
    /// Candidate sides in scan order; equal-distance pairs resolve to the
    /// earliest (source side, target side) combination in this order
    pub const ALL: [Anchor; 4] = [Anchor::North, Anchor::South, Anchor::West, Anchor::East];

    /// Midpoint of this side, zero standoff
    pub fn point(self, bounds: &BoundingBox) -> Point {
        match self {
            Anchor::North => Point::new(bounds.x + bounds.width / 2.0, bounds.y),
            Anchor::South => Point::new(bounds.x + bounds.width / 2.0, bounds.bottom()),
            Anchor::West => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
            Anchor::East => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
        }
    }

    /// Offset an endpoint outward along this side's axis to get its
    /// Bézier control point
    fn control_from(self, p: Point, dx: f64, dy: f64) -> Point {
        match self {
            Anchor::North => Point::new(p.x, p.y - dy),
            Anchor::South => Point::new(p.x, p.y + dy),
            Anchor::West => Point::new(p.x - dx, p.y),
            Anchor::East => Point::new(p.x + dx, p.y),
        }
    }
}

/// Whether a (source side, target side) pair can carry a forward curve.
///
/// Mirrored same-direction pairs always qualify. Otherwise each directed
/// side imposes a half-plane test on the two attachment points: leaving
/// east (or entering west) requires the source point strictly left of the
/// target point, and symmetrically for the other three axes.
fn admissible(a: Anchor, b: Anchor, pa: Point, pb: Point) -> bool {
    if a == b {
        return true;
    }
    ((a != Anchor::East && b != Anchor::West) || pa.x < pb.x)
        && ((a != Anchor::West && b != Anchor::East) || pa.x > pb.x)
        && ((a != Anchor::North && b != Anchor::South) || pa.y > pb.y)
        && ((a != Anchor::South && b != Anchor::North) || pa.y < pb.y)
}

/// Route a connector between two bounding boxes with the default arrowhead
/// length
pub fn route(box1: &BoundingBox, box2: &BoundingBox, style: &EdgeStyle) -> ConnectorGeometry {
    route_with_arrow_length(box1, box2, style, ARROW_LENGTH)
}

/// Route a connector between two bounding boxes.
///
/// Considers the 16 (source side, target side) combinations, keeps the
/// admissible ones, and picks the minimum-Manhattan-distance pair. When
/// nothing is admissible the fixed north-north pair is used so the result
/// is always drawable.
pub fn route_with_arrow_length(
    box1: &BoundingBox,
    box2: &BoundingBox,
    style: &EdgeStyle,
    arrow_length: f64,
) -> ConnectorGeometry {
    let mut best: Option<(f64, Anchor, Point, Anchor, Point)> = None;
    for a in Anchor::ALL {
        let pa = a.point(box1);
        for b in Anchor::ALL {
            let pb = b.point(box2);
            if !admissible(a, b, pa, pb) {
                continue;
            }
            let d = pa.manhattan(pb);
            if best.as_ref().map_or(true, |(bd, ..)| d < *bd) {
                best = Some((d, a, pa, b, pb));
            }
        }
    }

    let (a, pa, b, pb) = match best {
        Some((_, a, pa, b, pb)) => (a, pa, b, pb),
        None => {
            warn!("no admissible anchor pair, using north-north fallback");
            (
                Anchor::North,
                Anchor::North.point(box1),
                Anchor::North,
                Anchor::North.point(box2),
            )
        }
    };

    let dx = ((pa.x - pb.x).abs() / 2.0).max(CURVATURE_FLOOR);
    let dy = ((pa.y - pb.y).abs() / 2.0).max(CURVATURE_FLOOR);
    let control1 = a.control_from(pa, dx, dy);
    let control2 = b.control_from(pb, dx, dy);

    let arrow = style
        .directed
        .then(|| arrowhead(control2, pb, arrow_length));
    let label_anchor = style
        .label
        .is_some()
        .then(|| Point::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0));

    ConnectorGeometry {
        start: pa,
        control1,
        control2,
        end: pb,
        arrow,
        label_anchor,
    }
}

/// Two barb points, each at `length` from the curve's terminal point: the
/// final-segment tangent normalized to `length` and rotated ±90°.
fn arrowhead(last_control: Point, end: Point, length: f64) -> [Point; 2] {
    let tx = end.x - last_control.x;
    let ty = end.y - last_control.y;
    // the control point sits at least the curvature floor from the endpoint
    let mag = (tx * tx + ty * ty).sqrt();
    let ux = tx / mag * length;
    let uy = ty / mag * length;
    [
        Point::new(end.x - uy, end.y + ux),
        Point::new(end.x + uy, end.y - ux),
    ]
}

impl ConnectorGeometry {
    /// Point sequence for a surface: the curve, then the arrowhead barbs
    /// as a two-segment polyline through the endpoint
    pub fn to_path(&self) -> PathSpec {
        let mut path = PathSpec::new();
        path.move_to(self.start);
        path.curve_to(self.control1, self.control2, self.end);
        if let Some([barb1, barb2]) = self.arrow {
            path.move_to(barb1);
            path.line_to(self.end);
            path.line_to(barb2);
        }
        path
    }
}

/// The persistent result of routing one edge.
///
/// Owns the foreground path, the optional background path and label, and
/// knows how to redraw itself in place from the endpoint shapes' current
/// bounding boxes. Created once per edge on the first layout pass where
/// both endpoints exist; never destroyed before the engine.
#[derive(Debug)]
pub struct Connector {
    source: ShapeHandle,
    target: ShapeHandle,
    style: EdgeStyle,
    arrow_length: f64,
    fg: PathHandle,
    bg: Option<PathHandle>,
    label: Option<TextHandle>,
    /// Last geometry sent to the surface; resubmitted verbatim when only
    /// the stroke changes (highlighting)
    path: PathSpec,
}

impl Connector {
    /// Route the edge and draw it for the first time
    pub fn draw<S: Surface>(
        surface: &mut S,
        source: ShapeHandle,
        target: ShapeHandle,
        style: EdgeStyle,
        arrow_length: f64,
    ) -> Self {
        let geometry = current_geometry(surface, source, target, &style, arrow_length);
        let path = geometry.to_path();
        let fg = surface.upsert_path(
            None,
            &path,
            &StrokeStyle::new(style.stroke(), style.stroke_width()),
        );
        let bg = match style.background() {
            Some((color, width)) => {
                let stroke = StrokeStyle::new(color, width);
                Some(surface.upsert_path(None, &path, &stroke))
            }
            None => None,
        };
        let label = upsert_label(surface, None, &geometry, &style);
        Self {
            source,
            target,
            style,
            arrow_length,
            fg,
            bg,
            label,
            path,
        }
    }

    /// Recompute geometry from the endpoints' current bounding boxes and
    /// update the surface paths and label in place
    pub fn redraw<S: Surface>(&mut self, surface: &mut S) {
        let geometry =
            current_geometry(surface, self.source, self.target, &self.style, self.arrow_length);
        self.path = geometry.to_path();
        self.fg = surface.upsert_path(
            Some(self.fg),
            &self.path,
            &StrokeStyle::new(self.style.stroke(), self.style.stroke_width()),
        );
        if let Some(bg) = self.bg {
            if let Some((color, width)) = self.style.background() {
                let stroke = StrokeStyle::new(color, width);
                self.bg = Some(surface.upsert_path(Some(bg), &self.path, &stroke));
            }
        }
        self.label = upsert_label(surface, self.label, &geometry, &self.style);
    }

    /// Thicken and recolor the foreground stroke, or restore the edge's
    /// own style. Geometry is reused; bounding boxes are not re-read.
    pub fn set_highlighted<S: Surface>(&mut self, surface: &mut S, on: bool) {
        let stroke = if on {
            StrokeStyle::new(HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH)
        } else {
            StrokeStyle::new(self.style.stroke(), self.style.stroke_width())
        };
        self.fg = surface.upsert_path(Some(self.fg), &self.path, &stroke);
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    pub fn foreground(&self) -> PathHandle {
        self.fg
    }

    pub fn background(&self) -> Option<PathHandle> {
        self.bg
    }

    pub fn label(&self) -> Option<TextHandle> {
        self.label
    }

    /// The point sequence last sent to the surface
    pub fn path(&self) -> &PathSpec {
        &self.path
    }
}

fn current_geometry<S: Surface>(
    surface: &S,
    source: ShapeHandle,
    target: ShapeHandle,
    style: &EdgeStyle,
    arrow_length: f64,
) -> ConnectorGeometry {
    let bb1 = surface.bounding_box(source);
    let bb2 = surface.bounding_box(target);
    route_with_arrow_length(&bb1, &bb2, style, arrow_length)
}

fn upsert_label<S: Surface>(
    surface: &mut S,
    existing: Option<TextHandle>,
    geometry: &ConnectorGeometry,
    style: &EdgeStyle,
) -> Option<TextHandle> {
    let text = style.label.as_deref()?;
    let anchor = geometry.label_anchor?;
    let text_style = TextStyle {
        fill: "#000".to_string(),
        font_size: style.font_size(),
        attrs: style.label_style.clone(),
    };
    Some(surface.upsert_text(existing, anchor, text, &text_style))
}
