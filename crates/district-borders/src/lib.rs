//! Shared district borders as a clean planar graph.
//!
//! Input is a list of closed, clockwise lattice polygons (districts). The
//! pipeline turns them into an undirected graph of border segments:
//!
//! 1. `graph`: polygons → adjacency graph, corners shared by districts weld.
//! 2. `lattice`: exact reduced slopes and interior lattice points (no floats).
//! 3. `merge`: corners lying on another district's border split that border.
//! 4. `straighten`: vertices a line passes straight through are bypassed.
//!
//! `pipeline::normalize` chains the stages; `rand` packs random rectangular
//! districts for demos, benches and tests. Rendering is left to callers, who
//! read the result through [`graph_edges`].

pub mod error;
pub mod graph;
pub mod lattice;
pub mod merge;
pub mod pipeline;
pub mod rand;
pub mod straighten;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::BorderError;
pub use graph::{build_graph, graph_edges, Edge, Graph, Point};
pub use lattice::{gcd, interior_lattice_points, reduced_slope, Slope};
pub use merge::{merge_corners, MergeStats};
pub use pipeline::{normalize, Normalized, PipelineCfg, PipelineReport};
pub use straighten::{continue_straight_lines, ContinueStats};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::graph::{build_graph, graph_edges, Edge, Graph, Point};
    pub use crate::merge::merge_corners;
    pub use crate::pipeline::{normalize, PipelineCfg};
    pub use crate::rand::{draw_districts, DistrictCfg};
    pub use crate::straighten::continue_straight_lines;
    pub use crate::BorderError;
}

#[cfg(test)]
mod tests;
