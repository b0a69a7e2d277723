//! SVG rendering surface
//!
//! A concrete [`crate::surface::Surface`] that retains shapes, paths, and
//! texts and serializes them to an SVG document string. Useful in tests
//! and for host-less rendering; interactive hosts supply their own surface.

pub mod config;
pub mod measure;
pub mod svg;

pub use config::SvgConfig;
pub use measure::TextMetrics;
pub use svg::SvgSurface;
