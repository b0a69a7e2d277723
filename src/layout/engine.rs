//! Columnar layout engine
//!
//! Owns the buffered node and edge sets, computes column and row sizing
//! from the canvas dimensions and per-level population, places every node,
//! and routes a connector for every edge whose endpoints are drawn.
//!
//! Registration is buffered: `add_node`/`add_edge` only record; `draw`
//! performs the full sizing, placement, and routing pass and may be called
//! repeatedly. Buffers are additive across passes; `reset` clears them.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::surface::{ShapeHandle, Surface};
use crate::theme::Theme;

use super::config::LayoutConfig;
use super::routing::Connector;
use super::types::{Edge, EdgeStyle, Node};

/// One buffered edge and, after its first successful draw, its connector
#[derive(Debug)]
struct EdgeSlot {
    edge: Edge,
    connector: Option<Connector>,
}

/// The layout engine for one diagram.
///
/// Generic over the [`Surface`] it draws through; the engine owns the
/// surface for the diagram's lifetime.
pub struct ColumnLayoutEngine<S: Surface> {
    surface: S,
    config: LayoutConfig,
    theme: Theme,
    width: f64,
    height: f64,
    nodes_by_level: BTreeMap<usize, Vec<Node>>,
    edges: Vec<EdgeSlot>,
    shape_by_node: HashMap<String, ShapeHandle>,
    /// Source node id -> indices into `edges` whose connector exists
    connectors_by_source: HashMap<String, Vec<usize>>,
    column_width: f64,
    max_height: f64,
}

impl<S: Surface> ColumnLayoutEngine<S> {
    /// Create an engine over a surface and the caller's canvas dimensions
    pub fn new(surface: S, width: f64, height: f64) -> Self {
        Self {
            surface,
            config: LayoutConfig::default(),
            theme: Theme::default(),
            width,
            height,
            nodes_by_level: BTreeMap::new(),
            edges: Vec::new(),
            shape_by_node: HashMap::new(),
            connectors_by_source: HashMap::new(),
            column_width: 0.0,
            max_height: 0.0,
        }
    }

    /// Set the layout configuration
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme used for node visuals
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Buffer a node into its level's column list. Insertion order is
    /// preserved; duplicate ids are accepted and the last-drawn shape wins
    /// in the id lookup.
    pub fn add_node(&mut self, node: Node) {
        self.nodes_by_level.entry(node.level).or_default().push(node);
    }

    /// Buffer an edge. Endpoints need not exist yet; an edge whose
    /// endpoints are never drawn is skipped silently.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        style: EdgeStyle,
    ) {
        self.edges.push(EdgeSlot {
            edge: Edge {
                source: source.into(),
                target: target.into(),
                style,
            },
            connector: None,
        });
    }

    /// Shape handle for a drawn node id
    pub fn get_shape(&self, node_id: &str) -> Option<ShapeHandle> {
        self.shape_by_node.get(node_id).copied()
    }

    /// A drawn node by id, with its computed position
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes_by_level
            .values()
            .flatten()
            .find(|n| n.id == node_id)
    }

    /// Connectors whose source is the given node
    pub fn connectors_for(&self, node_id: &str) -> Vec<&Connector> {
        self.connectors_by_source
            .get(node_id)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.edges[idx].connector.as_ref())
            .collect()
    }

    /// Column width from the last sizing pass
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Canvas height from the last sizing pass
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// The surface the engine draws through
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Full layout pass: size, place columns, route edges.
    ///
    /// Idempotent in effect: re-running recomputes every position and
    /// redraws every connector in place from the same buffered input.
    pub fn draw(&mut self) {
        self.compute_size();
        // reseeded per pass so repeated draws land identically
        let mut rng = StdRng::seed_from_u64(self.config.jitter_seed);
        let levels: Vec<usize> = (1..self.config.max_level)
            .filter(|level| {
                self.nodes_by_level
                    .get(level)
                    .is_some_and(|nodes| !nodes.is_empty())
            })
            .collect();
        for (index, level) in levels.iter().enumerate() {
            self.draw_column(*level, index + 1, &mut rng);
        }
        self.draw_edges();
    }

    /// Recompute column width and canvas height from the current level
    /// population and (re-)initialize the surface to those dimensions
    pub fn compute_size(&mut self) {
        let mut columns = 0usize;
        let mut max_count = 0usize;
        for level in 1..self.config.max_level {
            if let Some(nodes) = self.nodes_by_level.get(&level) {
                if !nodes.is_empty() {
                    columns += 1;
                    max_count = max_count.max(nodes.len());
                }
            }
        }
        if columns > 0 && max_count > 0 {
            self.max_height =
                max_count as f64 * (self.config.node_height + self.config.node_space);
            if self.height > self.max_height {
                self.max_height = self.height;
            }
            self.column_width = (self.width - self.config.column_margin) / columns as f64;
        }
        debug!(
            columns,
            max_count,
            column_width = self.column_width,
            max_height = self.max_height,
            "computed layout size"
        );
        self.surface
            .resize(self.width, self.max_height + self.config.canvas_allowance);
    }

    fn draw_column(&mut self, level: usize, index: usize, rng: &mut StdRng) {
        let Some(nodes) = self.nodes_by_level.get_mut(&level) else {
            return;
        };
        let count = nodes.len();
        if count == 0 {
            return;
        }
        let mut row_height = (self.max_height / (count as f64 + 1.0))
            .max(self.config.node_height + self.config.node_space);
        if count == 1 && index > 1 && self.config.jitter_amplitude > 0.0 {
            // nudge lone nodes off the shared centerline so consecutive
            // single-node columns do not line up in a perfectly straight row
            row_height +=
                rng.gen_range(-self.config.jitter_amplitude..=self.config.jitter_amplitude);
        }
        let x = self.column_width * (index as f64 - 1.0) + self.config.column_margin;
        for (row, node) in nodes.iter_mut().enumerate() {
            node.x = x;
            node.y = row_height * (row as f64 + 1.0);
            let visual = self.theme.visual(&node.model_type);
            let shape = self.surface.create_node_shape(node, &visual);
            self.shape_by_node.insert(node.id.clone(), shape);
        }
    }

    fn draw_edges(&mut self) {
        for idx in 0..self.edges.len() {
            let edge = &self.edges[idx].edge;
            let Some(&source_shape) = self.shape_by_node.get(&edge.source) else {
                debug!(source = %edge.source, target = %edge.target, "skipping edge, source not drawn");
                continue;
            };
            let Some(&target_shape) = self.shape_by_node.get(&edge.target) else {
                debug!(source = %edge.source, target = %edge.target, "skipping edge, target not drawn");
                continue;
            };
            let slot = &mut self.edges[idx];
            match &mut slot.connector {
                Some(connector) => connector.redraw(&mut self.surface),
                None => {
                    let connector = Connector::draw(
                        &mut self.surface,
                        source_shape,
                        target_shape,
                        slot.edge.style.clone(),
                        self.config.arrow_length,
                    );
                    slot.connector = Some(connector);
                    self.connectors_by_source
                        .entry(slot.edge.source.clone())
                        .or_default()
                        .push(idx);
                }
            }
        }
    }

    /// Thicken and recolor every connector leaving the given node. Called
    /// by the host on pointer-enter; touches only connector strokes.
    pub fn highlight(&mut self, node_id: &str) {
        self.set_highlight(node_id, true);
    }

    /// Restore the styles of every connector leaving the given node.
    /// Called by the host on pointer-leave.
    pub fn unhighlight(&mut self, node_id: &str) {
        self.set_highlight(node_id, false);
    }

    fn set_highlight(&mut self, node_id: &str, on: bool) {
        let Some(indices) = self.connectors_by_source.get(node_id).cloned() else {
            return;
        };
        for idx in indices {
            if let Some(connector) = &mut self.edges[idx].connector {
                connector.set_highlighted(&mut self.surface, on);
            }
        }
    }

    /// Drop every buffered node, edge, shape, and connector.
    ///
    /// The surface keeps whatever it has already drawn; hosts that reuse
    /// a surface across resets should recreate it alongside.
    pub fn reset(&mut self) {
        self.nodes_by_level.clear();
        self.edges.clear();
        self.shape_by_node.clear();
        self.connectors_by_source.clear();
        self.column_width = 0.0;
        self.max_height = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SvgSurface;

    fn engine(width: f64, height: f64) -> ColumnLayoutEngine<SvgSurface> {
        ColumnLayoutEngine::new(SvgSurface::new(), width, height)
    }

    #[test]
    fn test_column_width_is_exact() {
        let mut engine = engine(320.0, 100.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("b", 2, "B", "model"));
        engine.add_node(Node::new("c", 4, "C", "model"));
        engine.draw();
        // three populated levels share (320 - 20) evenly
        assert_eq!(engine.column_width(), 100.0);
    }

    #[test]
    fn test_empty_levels_do_not_consume_columns() {
        let mut engine = engine(400.0, 100.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("c", 5, "C", "model"));
        engine.draw();
        let a = engine.node("a").unwrap();
        let c = engine.node("c").unwrap();
        assert_eq!(a.x, 20.0);
        // level 5 lands in the second column, not the fifth
        assert_eq!(c.x, engine.column_width() + 20.0);
    }

    #[test]
    fn test_canvas_height_follows_population() {
        let mut engine = engine(400.0, 50.0);
        for i in 0..4 {
            engine.add_node(Node::new(format!("n{i}"), 1, "N", "model"));
        }
        engine.draw();
        // 4 nodes * (20 + 10) outgrows the 50-unit canvas
        assert_eq!(engine.max_height(), 120.0);
    }

    #[test]
    fn test_tall_canvas_wins_over_population() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.draw();
        assert_eq!(engine.max_height(), 300.0);
    }

    #[test]
    fn test_edge_with_unknown_endpoint_is_skipped() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_edge("a", "ghost", EdgeStyle::default());
        engine.add_edge("ghost", "a", EdgeStyle::default());
        engine.draw();
        assert!(engine.connectors_for("a").is_empty());
        assert!(engine.connectors_for("ghost").is_empty());
    }

    #[test]
    fn test_edge_registration_order_is_free() {
        let mut engine = engine(400.0, 300.0);
        engine.add_edge("a", "b", EdgeStyle::default());
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("b", 2, "B", "model"));
        engine.draw();
        assert_eq!(engine.connectors_for("a").len(), 1);
    }

    #[test]
    fn test_duplicate_ids_last_drawn_wins() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("dup", 1, "First", "model"));
        engine.add_node(Node::new("dup", 2, "Second", "model"));
        engine.draw();
        let shape = engine.get_shape("dup").unwrap();
        // the level-2 copy is drawn later and owns the id
        let bb = engine.surface().bounding_box(shape);
        assert_eq!(bb.x, engine.column_width() + 20.0);
    }

    #[test]
    fn test_layout_is_deterministic_for_fixed_seed() {
        let build = || {
            let mut engine = engine(500.0, 200.0);
            engine.add_node(Node::new("a", 1, "A", "model"));
            engine.add_node(Node::new("b", 2, "B", "model"));
            engine.add_node(Node::new("c", 3, "C", "model"));
            engine.draw();
            (
                engine.node("a").unwrap().y,
                engine.node("b").unwrap().y,
                engine.node("c").unwrap().y,
            )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_repeated_draw_is_idempotent() {
        let mut engine = engine(500.0, 200.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("b", 2, "B", "model"));
        engine.add_edge("a", "b", EdgeStyle::default());
        engine.draw();
        let first = (engine.node("b").unwrap().x, engine.node("b").unwrap().y);
        engine.draw();
        let second = (engine.node("b").unwrap().x, engine.node("b").unwrap().y);
        assert_eq!(first, second);
        // redraw updates the connector in place instead of stacking a copy
        assert_eq!(engine.connectors_for("a").len(), 1);
    }

    #[test]
    fn test_single_node_column_jitter_stays_bounded() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("b", 2, "B", "model"));
        engine.draw();
        // both columns have one node; the un-jittered row height is 150
        let unjittered = 150.0;
        let a = engine.node("a").unwrap();
        let b = engine.node("b").unwrap();
        // first column never jitters
        assert_eq!(a.y, unjittered);
        assert!((b.y - unjittered).abs() <= 50.0);
    }

    #[test]
    fn test_jitter_can_be_disabled() {
        let mut engine = ColumnLayoutEngine::new(SvgSurface::new(), 400.0, 300.0)
            .with_config(LayoutConfig::default().without_jitter());
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("b", 2, "B", "model"));
        engine.draw();
        assert_eq!(engine.node("b").unwrap().y, 150.0);
    }

    #[test]
    fn test_draw_without_nodes_keeps_minimum_size() {
        let mut engine = engine(400.0, 300.0);
        engine.draw();
        assert_eq!(engine.column_width(), 0.0);
        assert_eq!(engine.max_height(), 0.0);
    }

    #[test]
    fn test_levels_past_cap_are_ignored() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_node(Node::new("z", 99, "Z", "model"));
        engine.draw();
        assert!(engine.get_shape("a").is_some());
        assert!(engine.get_shape("z").is_none());
    }

    #[test]
    fn test_reset_clears_buffers() {
        let mut engine = engine(400.0, 300.0);
        engine.add_node(Node::new("a", 1, "A", "model"));
        engine.add_edge("a", "a", EdgeStyle::default());
        engine.draw();
        engine.reset();
        assert!(engine.get_shape("a").is_none());
        assert!(engine.connectors_for("a").is_empty());
        assert_eq!(engine.max_height(), 0.0);
    }
}
