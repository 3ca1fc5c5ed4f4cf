//! Border graph: lattice points, canonical edges, and the polygon → graph builder.
//!
//! The graph is a single owned structure; later stages (`merge`, `straighten`)
//! take it by `&mut` and only add or remove edges, never nodes.

mod build;
mod types;

pub use build::{build_graph, graph_edges};
pub use types::{Edge, Graph, Point};

#[cfg(test)]
mod tests;
