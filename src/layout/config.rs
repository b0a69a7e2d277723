//! Configuration for the layout engine

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Exclusive upper bound on node levels; levels 1..max_level are laid out
    pub max_level: usize,

    /// Nominal node box height used for row sizing
    pub node_height: f64,

    /// Vertical spacing reserved between node boxes
    pub node_space: f64,

    /// Left margin consumed before the first column
    pub column_margin: f64,

    /// Extra canvas height below the last row
    pub canvas_allowance: f64,

    /// Length of each arrowhead barb
    pub arrow_length: f64,

    /// Jitter amplitude applied to single-node columns past the first
    pub jitter_amplitude: f64,

    /// Seed for the jitter source; a fixed seed makes layout reproducible
    pub jitter_seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_level: 10,
            node_height: 20.0,
            node_space: 10.0,
            column_margin: 20.0,
            canvas_allowance: 50.0,
            arrow_length: 5.0,
            jitter_amplitude: 50.0,
            jitter_seed: 0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusive level cap
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the nominal node height
    pub fn with_node_height(mut self, height: f64) -> Self {
        self.node_height = height;
        self
    }

    /// Set the inter-node spacing
    pub fn with_node_space(mut self, space: f64) -> Self {
        self.node_space = space;
        self
    }

    /// Set the arrowhead barb length
    pub fn with_arrow_length(mut self, length: f64) -> Self {
        self.arrow_length = length;
        self
    }

    /// Set the jitter seed
    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = seed;
        self
    }

    /// Disable the single-node-column jitter entirely
    pub fn without_jitter(mut self) -> Self {
        self.jitter_amplitude = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_level, 10);
        assert_eq!(config.node_height, 20.0);
        assert_eq!(config.node_space, 10.0);
        assert_eq!(config.column_margin, 20.0);
        assert_eq!(config.arrow_length, 5.0);
        assert_eq!(config.jitter_amplitude, 50.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_max_level(6)
            .with_node_height(32.0)
            .with_jitter_seed(7)
            .without_jitter();

        assert_eq!(config.max_level, 6);
        assert_eq!(config.node_height, 32.0);
        assert_eq!(config.jitter_seed, 7);
        assert_eq!(config.jitter_amplitude, 0.0);
    }
}
