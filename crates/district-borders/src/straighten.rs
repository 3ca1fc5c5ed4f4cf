//! Straight-line continuation: drop pass-through vertices from border lines.
//!
//! A vertex passes a line straight through when one neighbor lies exactly
//! opposite another, i.e. the reduced slope toward the first is the negation of
//! the reduced slope toward the second. Both edges are replaced by one edge
//! joining the two far endpoints; the middle vertex stays a node.
//!
//! Nodes are visited in point order. At each node the neighbor list is re-read
//! after every bypass, and neighbor pairs `(i, j)`, `i < j`, are tried in point
//! order, so the first opposite pair wins. This keeps collinear fans of three
//! or more edges well-defined: each bypass consumes two live edges and the scan
//! restarts on what is left.

use crate::error::BorderError;
use crate::graph::{Graph, Point};
use crate::lattice::{reduced_slope, Slope};

/// Counters reported by [`continue_straight_lines`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContinueStats {
    pub bypasses: usize,
    /// Nodes left without any edge after their lines were bypassed.
    pub isolated: usize,
}

/// Collapse every straight pass-through in `graph`, in place.
pub fn continue_straight_lines(graph: &mut Graph) -> Result<ContinueStats, BorderError> {
    let mut stats = ContinueStats::default();
    let nodes: Vec<Point> = graph.nodes().collect();
    for node in nodes {
        let mut touched = false;
        while let Some((p, q)) = opposite_pair(graph, node)? {
            tracing::trace!(%node, from = %p, to = %q, "continue line through vertex");
            graph.remove_edge(p, node);
            graph.remove_edge(node, q);
            graph.add_edge(p, q)?;
            stats.bypasses += 1;
            touched = true;
        }
        if touched && graph.degree(&node) == 0 {
            stats.isolated += 1;
        }
    }
    tracing::debug!(
        bypasses = stats.bypasses,
        isolated = stats.isolated,
        edges = graph.edge_count(),
        "continued straight lines"
    );
    Ok(stats)
}

/// First neighbor pair of `node` lying on opposite sides of one straight line.
fn opposite_pair(graph: &Graph, node: Point) -> Result<Option<(Point, Point)>, BorderError> {
    let arms = graph
        .neighbors(&node)
        .map(|n| Ok((n, reduced_slope(node, n)?)))
        .collect::<Result<Vec<(Point, Slope)>, BorderError>>()?;
    for (i, &(p, sp)) in arms.iter().enumerate() {
        if let Some(&(q, _)) = arms[i + 1..].iter().find(|(_, sq)| *sq == -sp) {
            return Ok(Some((p, q)));
        }
    }
    Ok(None)
}
