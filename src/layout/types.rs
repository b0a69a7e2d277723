//! Core types for the layout engine

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Manhattan distance to another point
    pub fn manhattan(&self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A bounding box representing the spatial extent of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A diagram node. `level` is caller-assigned and selects the column;
/// `x`/`y` are computed by the layout engine during `draw`.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub level: usize,
    pub display_name: String,
    pub model_type: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        level: usize,
        display_name: impl Into<String>,
        model_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            display_name: display_name.into(),
            model_type: model_type.into(),
            x: 0.0,
            y: 0.0,
        }
    }
}

/// A buffered edge between two node ids. Endpoints are not validated at
/// registration time; an edge whose endpoints never get drawn is skipped.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

/// Style options for a connector. Every field is optional; absent fields
/// fall back to the documented defaults via the accessor methods.
#[derive(Debug, Clone, Default)]
pub struct EdgeStyle {
    /// Foreground line color. Default `#000`.
    pub stroke: Option<String>,
    /// Foreground line width. Default 1.
    pub stroke_width: Option<f64>,
    /// Secondary background stroke, encoded as `"color|width"`.
    pub fill: Option<String>,
    /// Append an arrowhead at the target end.
    pub directed: bool,
    /// Text label anchored at the connector midpoint.
    pub label: Option<String>,
    /// Label font size. Default 12.
    pub font_size: Option<f64>,
    /// Extra attributes forwarded to the label text element.
    pub label_style: Vec<(String, String)>,
}

impl EdgeStyle {
    pub fn stroke(&self) -> &str {
        self.stroke.as_deref().unwrap_or("#000")
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(1.0)
    }

    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(12.0)
    }

    /// Parse the `"color|width"` background stroke, width defaulting to 3.
    pub fn background(&self) -> Option<(&str, f64)> {
        let fill = self.fill.as_deref()?;
        let (color, width) = match fill.split_once('|') {
            Some((color, width)) => (color, width.parse().unwrap_or(3.0)),
            None => (fill, 3.0),
        };
        Some((color, width))
    }
}

/// The routed geometry for one connector: a single cubic Bézier segment,
/// an optional arrowhead barb pair, and an optional label anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorGeometry {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Two barb points, each at arrow-length distance from `end`.
    pub arrow: Option<[Point; 2]>,
    /// Midpoint of the chosen anchor pair, when the style carries a label.
    pub label_anchor: Option<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_point_distances() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.manhattan(b), 7.0);
    }

    #[test]
    fn test_edge_style_defaults() {
        let style = EdgeStyle::default();
        assert_eq!(style.stroke(), "#000");
        assert_eq!(style.stroke_width(), 1.0);
        assert_eq!(style.font_size(), 12.0);
        assert!(style.background().is_none());
        assert!(!style.directed);
    }

    #[test]
    fn test_edge_style_background_parsing() {
        let style = EdgeStyle {
            fill: Some("#fff|5".to_string()),
            ..Default::default()
        };
        assert_eq!(style.background(), Some(("#fff", 5.0)));

        let bare = EdgeStyle {
            fill: Some("#eee".to_string()),
            ..Default::default()
        };
        assert_eq!(bare.background(), Some(("#eee", 3.0)));

        let junk_width = EdgeStyle {
            fill: Some("red|wide".to_string()),
            ..Default::default()
        };
        assert_eq!(junk_width.background(), Some(("red", 3.0)));
    }

    #[test]
    fn test_node_starts_unpositioned() {
        let node = Node::new("a", 1, "A", "service");
        assert_eq!(node.x, 0.0);
        assert_eq!(node.y, 0.0);
    }
}
