//! Corner merging: resolve T-junctions by splitting edges at embedded nodes.
//!
//! A pending set of canonical edges is drained to a fixed point. Each popped
//! edge is split at most once, at the interior node closest to its first
//! endpoint; both halves go back into the pending set so further nodes on them
//! are picked up later. The node set never changes.

use std::collections::BTreeSet;

use crate::error::BorderError;
use crate::graph::{graph_edges, Edge, Graph, Point};
use crate::lattice::{interior_lattice_count, lattice_offset, lattice_walk};

/// Counters reported by [`merge_corners`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Pending-set pops, including re-examined halves.
    pub examined: usize,
    /// Edges split at an embedded node.
    pub splits: usize,
}

/// Split every edge that passes through another node of `graph`, in place.
pub fn merge_corners(graph: &mut Graph) -> Result<MergeStats, BorderError> {
    let mut stats = MergeStats::default();
    let mut pending: BTreeSet<Edge> = graph_edges(graph);
    while let Some(edge) = pending.pop_first() {
        stats.examined += 1;
        let (a, b) = edge.endpoints();
        let Some(corner) = first_interior_node(graph, a, b)? else {
            continue;
        };
        tracing::trace!(%edge, %corner, "split edge at corner");
        graph.remove_edge(a, b);
        graph.add_edge(a, corner)?;
        graph.add_edge(corner, b)?;
        pending.insert(Edge::new(a, corner)?);
        pending.insert(Edge::new(corner, b)?);
        stats.splits += 1;
    }
    tracing::debug!(
        examined = stats.examined,
        splits = stats.splits,
        edges = graph.edge_count(),
        "merged corners onto borders"
    );
    Ok(stats)
}

/// Interior node of `a`–`b` closest to `a`, if any.
///
/// Walks the lattice points when there are no more of them than nodes,
/// otherwise tests every node against the segment.
fn first_interior_node(graph: &Graph, a: Point, b: Point) -> Result<Option<Point>, BorderError> {
    let interior = interior_lattice_count(a, b)?;
    if interior == 0 {
        return Ok(None);
    }
    if interior <= graph.node_count() as u128 {
        walk_for_node(graph, a, b)
    } else {
        Ok(scan_for_node(graph, a, b))
    }
}

fn walk_for_node(graph: &Graph, a: Point, b: Point) -> Result<Option<Point>, BorderError> {
    Ok(lattice_walk(a, b)?.find(|q| graph.contains_node(q)))
}

fn scan_for_node(graph: &Graph, a: Point, b: Point) -> Option<Point> {
    graph
        .nodes()
        .filter_map(|q| lattice_offset(a, b, q).map(|k| (k, q)))
        .min()
        .map(|(_, q)| q)
}
