//! Columnar layout and connector routing
//!
//! Nodes are grouped by caller-assigned level into vertical columns; edges
//! are routed as cubic connectors between the columns' node shapes.

pub mod config;
pub mod engine;
pub mod routing;
pub mod types;

pub use config::LayoutConfig;
pub use engine::ColumnLayoutEngine;
pub use routing::{route, route_with_arrow_length, Anchor, Connector, ARROW_LENGTH, CURVATURE_FLOOR};
pub use types::*;
