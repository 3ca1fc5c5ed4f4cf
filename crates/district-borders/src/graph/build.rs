//! Graph construction from closed polygon loops and canonical edge extraction.

use std::collections::BTreeSet;

use super::types::{Edge, Graph, Point};
use crate::error::BorderError;

/// Build the border graph of a set of clockwise polygons.
///
/// Nodes are the union of all vertices (shared corners weld automatically);
/// edges are the consecutive vertex pairs of each loop, wraparound included.
pub fn build_graph<P>(polygons: &[P]) -> Result<Graph, BorderError>
where
    P: AsRef<[Point]>,
{
    for (index, poly) in polygons.iter().enumerate() {
        validate_loop(index, poly.as_ref())?;
    }
    let mut graph = Graph::new();
    for poly in polygons {
        for &p in poly.as_ref() {
            graph.add_node(p);
        }
    }
    for poly in polygons {
        let pts = poly.as_ref();
        let n = pts.len();
        for i in 0..n {
            graph.add_edge(pts[i], pts[(i + 1) % n])?;
        }
    }
    tracing::debug!(
        polygons = polygons.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built border graph"
    );
    Ok(graph)
}

/// Unique canonical edges of `graph`, in edge order.
pub fn graph_edges(graph: &Graph) -> BTreeSet<Edge> {
    let mut edges = BTreeSet::new();
    for (node, neighbors) in graph.adjacency() {
        for &nb in neighbors {
            // Self-loops have no canonical form; `check_symmetry` reports them.
            if let Ok(e) = Edge::new(*node, nb) {
                edges.insert(e);
            }
        }
    }
    edges
}

fn validate_loop(index: usize, pts: &[Point]) -> Result<(), BorderError> {
    if pts.len() < 3 {
        return Err(BorderError::invalid_polygon(
            index,
            format!("needs at least 3 vertices, got {}", pts.len()),
        ));
    }
    let n = pts.len();
    for i in 0..n {
        let (a, b) = (pts[i], pts[(i + 1) % n]);
        if a == b {
            return Err(BorderError::invalid_polygon(
                index,
                format!("zero-length edge at vertex {i} {a}"),
            ));
        }
    }
    Ok(())
}
