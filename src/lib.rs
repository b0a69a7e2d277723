//! Columnar node-link diagram layout
//!
//! This library lays a directed node-link diagram out into vertical
//! columns by a caller-assigned level and routes every edge as the
//! shortest visually-sane connector between its two node shapes: a cubic
//! curve with an optional arrowhead and label.
//!
//! Drawing is delegated to a pluggable [`Surface`]; the crate ships an SVG
//! implementation in [`render`], and interactive hosts can implement the
//! trait over their own drawing stack.
//!
//! # Example
//!
//! ```rust
//! use colgraph::{ColumnLayoutEngine, EdgeStyle, Node, SvgSurface};
//!
//! let mut graph = ColumnLayoutEngine::new(SvgSurface::new(), 400.0, 300.0);
//! graph.add_node(Node::new("api", 1, "API Gateway", "application"));
//! graph.add_node(Node::new("orders", 2, "Orders", "model"));
//! graph.add_edge(
//!     "api",
//!     "orders",
//!     EdgeStyle {
//!         directed: true,
//!         ..Default::default()
//!     },
//! );
//! graph.draw();
//!
//! let svg = graph.surface().to_svg();
//! assert!(svg.contains("<svg"));
//! ```

pub mod layout;
pub mod render;
pub mod surface;
pub mod theme;

pub use layout::{
    route, BoundingBox, ColumnLayoutEngine, Connector, ConnectorGeometry, Edge, EdgeStyle,
    LayoutConfig, Node, Point,
};
pub use render::{SvgConfig, SvgSurface, TextMetrics};
pub use surface::{NodeVisual, PathSpec, Surface};
pub use theme::{Theme, ThemeError};
