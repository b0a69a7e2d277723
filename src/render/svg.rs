//! SVG generation surface
//!
//! Retains every primitive the engine hands it and serializes the set as
//! an SVG document. Node shapes are keyed by node id, so re-creating a
//! node's shape on a later layout pass updates the record in place and
//! keeps previously issued handles valid.

use crate::layout::{BoundingBox, Node, Point};
use crate::surface::{
    NodeVisual, PathHandle, PathSegment, PathSpec, ShapeHandle, StrokeStyle, Surface, TextHandle,
    TextStyle,
};

use super::config::SvgConfig;
use super::measure::TextMetrics;

const CORNER_RADIUS: f64 = 5.0;
const FILL_OPACITY: f64 = 0.1;
const NODE_STROKE_WIDTH: f64 = 2.0;
const LABEL_FONT_SIZE: f64 = 13.0;
const ICON_SIZE: f64 = 16.0;

struct ShapeRecord {
    node_id: String,
    label: String,
    bounds: BoundingBox,
    color: String,
    icon: Option<String>,
}

struct PathRecord {
    path: PathSpec,
    stroke: StrokeStyle,
}

struct TextRecord {
    position: Point,
    text: String,
    style: TextStyle,
}

/// A retained-mode surface that renders to an SVG string
pub struct SvgSurface {
    config: SvgConfig,
    metrics: TextMetrics,
    width: f64,
    height: f64,
    shapes: Vec<ShapeRecord>,
    paths: Vec<PathRecord>,
    texts: Vec<TextRecord>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self {
            config: SvgConfig::default(),
            metrics: TextMetrics::default(),
            width: 0.0,
            height: 0.0,
            shapes: vec![],
            paths: vec![],
            texts: vec![],
        }
    }

    /// Set the SVG output configuration
    pub fn with_config(mut self, config: SvgConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the text metrics used for node sizing
    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    fn prefix(&self) -> &str {
        self.config.class_prefix.as_deref().unwrap_or_default()
    }

    /// Serialize the retained primitives as an SVG document
    pub fn to_svg(&self) -> String {
        let nl = if self.config.pretty_print { "\n" } else { "" };
        let indent = if self.config.pretty_print { "  " } else { "" };
        let prefix = self.prefix();

        let mut svg = String::new();
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        ));
        svg.push_str(nl);

        // connectors first so node boxes sit on top of the lines
        for record in &self.paths {
            svg.push_str(&format!(
                r#"{}<path class="{}connector" d="{}" stroke="{}" stroke-width="{}" fill="none"/>"#,
                indent,
                prefix,
                path_d(&record.path),
                record.stroke.color,
                record.stroke.width
            ));
            svg.push_str(nl);
        }

        for shape in &self.shapes {
            svg.push_str(&self.shape_markup(shape, indent, nl));
        }

        for record in &self.texts {
            let mut attrs = String::new();
            for (key, value) in &record.style.attrs {
                attrs.push_str(&format!(r#" {}="{}""#, key, escape_xml(value)));
            }
            svg.push_str(&format!(
                r#"{}<text class="{}label" x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle"{}>{}</text>"#,
                indent,
                prefix,
                record.position.x,
                record.position.y,
                record.style.font_size,
                record.style.fill,
                attrs,
                escape_xml(&record.text)
            ));
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }

    fn shape_markup(&self, shape: &ShapeRecord, indent: &str, nl: &str) -> String {
        let prefix = self.prefix();
        let bb = &shape.bounds;
        let mut markup = format!(
            r#"{}<g class="{}node" data-node-id="{}">"#,
            indent,
            prefix,
            escape_xml(&shape.node_id)
        );
        markup.push_str(nl);
        markup.push_str(&format!(
            r#"{}{}<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            indent,
            indent,
            bb.x,
            bb.y,
            bb.width,
            bb.height,
            CORNER_RADIUS,
            shape.color,
            FILL_OPACITY,
            shape.color,
            NODE_STROKE_WIDTH
        ));
        markup.push_str(nl);
        let text_x = match &shape.icon {
            Some(icon) => {
                markup.push_str(&format!(
                    r#"{}{}<image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                    indent,
                    indent,
                    escape_xml(icon),
                    bb.x + 2.0,
                    bb.y + 4.0,
                    ICON_SIZE,
                    ICON_SIZE
                ));
                markup.push_str(nl);
                bb.x + self.metrics.icon_extra + self.metrics.text_width(&shape.label) / 2.0
            }
            None => bb.x + bb.width / 2.0,
        };
        markup.push_str(&format!(
            r#"{}{}<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            indent,
            indent,
            text_x,
            bb.y + bb.height / 2.0,
            LABEL_FONT_SIZE,
            escape_xml(&shape.label)
        ));
        markup.push_str(nl);
        markup.push_str(&format!("{}</g>", indent));
        markup.push_str(nl);
        markup
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SvgSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn create_node_shape(&mut self, node: &Node, visual: &NodeVisual) -> ShapeHandle {
        let (width, height) = self
            .metrics
            .node_box(&node.display_name, visual.icon.is_some());
        let record = ShapeRecord {
            node_id: node.id.clone(),
            label: node.display_name.clone(),
            bounds: BoundingBox::new(node.x, node.y, width, height),
            color: visual.color.clone(),
            icon: visual.icon.clone(),
        };
        match self.shapes.iter().position(|s| s.node_id == node.id) {
            Some(index) => {
                self.shapes[index] = record;
                ShapeHandle(index)
            }
            None => {
                self.shapes.push(record);
                ShapeHandle(self.shapes.len() - 1)
            }
        }
    }

    fn bounding_box(&self, shape: ShapeHandle) -> BoundingBox {
        self.shapes[shape.0].bounds
    }

    fn upsert_path(
        &mut self,
        existing: Option<PathHandle>,
        path: &PathSpec,
        stroke: &StrokeStyle,
    ) -> PathHandle {
        let record = PathRecord {
            path: path.clone(),
            stroke: stroke.clone(),
        };
        match existing {
            Some(handle) => {
                self.paths[handle.0] = record;
                handle
            }
            None => {
                self.paths.push(record);
                PathHandle(self.paths.len() - 1)
            }
        }
    }

    fn upsert_text(
        &mut self,
        existing: Option<TextHandle>,
        position: Point,
        text: &str,
        style: &TextStyle,
    ) -> TextHandle {
        let record = TextRecord {
            position,
            text: text.to_string(),
            style: style.clone(),
        };
        match existing {
            Some(handle) => {
                self.texts[handle.0] = record;
                handle
            }
            None => {
                self.texts.push(record);
                TextHandle(self.texts.len() - 1)
            }
        }
    }

    fn node_id_at(&self, shape: ShapeHandle) -> Option<&str> {
        self.shapes.get(shape.0).map(|s| s.node_id.as_str())
    }
}

/// Convert a path's segments to an SVG path d attribute
fn path_d(path: &PathSpec) -> String {
    let mut d = String::new();
    for segment in &path.segments {
        if !d.is_empty() {
            d.push(' ');
        }
        match segment {
            PathSegment::MoveTo(p) => {
                d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                d.push_str(&format!("L{:.2} {:.2}", p.x, p.y));
            }
            PathSegment::CurveTo {
                control1,
                control2,
                end,
            } => {
                d.push_str(&format!(
                    "C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                    control1.x, control1.y, control2.x, control2.y, end.x, end.y
                ));
            }
        }
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
