//! The rendering-surface seam
//!
//! The layout engine does not draw anything itself; it asks a [`Surface`]
//! for shape creation, bounding boxes, and path/text updates. Hosts
//! implement this trait over whatever drawing stack they embed; the crate
//! ships an SVG implementation in [`crate::render`].

use crate::layout::{BoundingBox, Node, Point};

/// Opaque handle to a node shape owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub usize);

/// Opaque handle to a path owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathHandle(pub usize);

/// Opaque handle to a text element owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextHandle(pub usize);

/// A segment in a connector path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Cubic Bézier curve to `end`
    CurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// An ordered point sequence ready for a surface to draw
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSpec {
    pub segments: Vec<PathSegment>,
}

impl PathSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) {
        self.segments.push(PathSegment::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.segments.push(PathSegment::LineTo(point));
    }

    pub fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.segments.push(PathSegment::CurveTo {
            control1,
            control2,
            end,
        });
    }
}

/// Stroke attributes for a path
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Attributes for a text element
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: String,
    pub font_size: f64,
    /// Extra attribute pairs forwarded verbatim
    pub attrs: Vec<(String, String)>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: "#000".to_string(),
            font_size: 12.0,
            attrs: vec![],
        }
    }
}

/// Visual treatment for a node shape, resolved from the engine's theme
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    /// Border (and tinted fill) color
    pub color: String,
    /// Optional icon resource drawn inside the shape
    pub icon: Option<String>,
}

/// Capabilities the layout engine needs from a drawing stack.
///
/// Handles stay valid for the surface's lifetime. The engine re-creates
/// node shapes on every `draw` pass; creating a shape for a node id the
/// surface already knows must update that shape in place and return its
/// existing handle, so connectors can keep referring to their endpoints
/// across passes. Paths and texts are updated in place through the
/// `upsert_*` methods.
pub trait Surface {
    /// (Re-)initialize the drawing area to the given dimensions
    fn resize(&mut self, width: f64, height: f64);

    /// Create the visual shape for a positioned node
    fn create_node_shape(&mut self, node: &Node, visual: &NodeVisual) -> ShapeHandle;

    /// Current extent of a shape; never cached by callers
    fn bounding_box(&self, shape: ShapeHandle) -> BoundingBox;

    /// Draw a new path or update an existing one in place
    fn upsert_path(
        &mut self,
        existing: Option<PathHandle>,
        path: &PathSpec,
        stroke: &StrokeStyle,
    ) -> PathHandle;

    /// Draw a new text element or update an existing one in place
    fn upsert_text(
        &mut self,
        existing: Option<TextHandle>,
        position: Point,
        text: &str,
        style: &TextStyle,
    ) -> TextHandle;

    /// Resolve a shape back to its node id, for pointer-event dispatch
    fn node_id_at(&self, shape: ShapeHandle) -> Option<&str>;
}
