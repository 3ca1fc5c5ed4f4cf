//! Lattice points, canonical edges and the undirected adjacency graph.
//!
//! - `Point`: integer lattice coordinate; its derived `Ord` (x, then y) is the
//!   single total order used for canonical edges and deterministic iteration.
//! - `Edge`: unordered point pair stored sorted.
//! - `Graph`: `Point → {Point}` adjacency kept symmetric by its mutators.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use nalgebra::Vector2;

use crate::error::BorderError;

/// Integer lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Float copy for renderers. The pipeline itself never leaves the lattice.
    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

impl From<(i64, i64)> for Point {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Canonical undirected edge: `self.0 < self.1` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(Point, Point);

impl Edge {
    pub fn new(a: Point, b: Point) -> Result<Self, BorderError> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self(a, b)),
            std::cmp::Ordering::Greater => Ok(Self(b, a)),
            std::cmp::Ordering::Equal => Err(BorderError::DegenerateSegment { point: a }),
        }
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.0
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.1
    }

    #[inline]
    pub fn endpoints(&self) -> (Point, Point) {
        (self.0, self.1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Undirected simple graph over lattice points.
///
/// All mutators touch both endpoints, so a graph built through them is
/// symmetric between calls. `from_adjacency` accepts arbitrary maps and is the
/// only way asymmetry can get in; see [`Graph::check_symmetry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adj: BTreeMap<Point, BTreeSet<Point>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw adjacency map as-is (no symmetry repair).
    pub fn from_adjacency(adj: BTreeMap<Point, BTreeSet<Point>>) -> Self {
        Self { adj }
    }

    /// Build a graph holding exactly the given edges and their endpoints.
    pub fn from_edges<I>(edges: I) -> Result<Self, BorderError>
    where
        I: IntoIterator<Item = (Point, Point)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b)?;
        }
        Ok(g)
    }

    #[inline]
    pub fn adjacency(&self) -> &BTreeMap<Point, BTreeSet<Point>> {
        &self.adj
    }

    pub fn into_adjacency(self) -> BTreeMap<Point, BTreeSet<Point>> {
        self.adj
    }

    /// Insert an isolated node; no-op if present.
    pub fn add_node(&mut self, p: Point) {
        self.adj.entry(p).or_default();
    }

    #[inline]
    pub fn contains_node(&self, p: &Point) -> bool {
        self.adj.contains_key(p)
    }

    /// Insert `a—b` on both sides. Returns `false` if it was already present.
    pub fn add_edge(&mut self, a: Point, b: Point) -> Result<bool, BorderError> {
        if a == b {
            return Err(BorderError::DegenerateSegment { point: a });
        }
        let fresh = self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
        Ok(fresh)
    }

    /// Remove `a—b` on both sides; endpoints stay as nodes. Returns whether it existed.
    pub fn remove_edge(&mut self, a: Point, b: Point) -> bool {
        let had_ab = self.adj.get_mut(&a).is_some_and(|n| n.remove(&b));
        let had_ba = self.adj.get_mut(&b).is_some_and(|n| n.remove(&a));
        had_ab || had_ba
    }

    #[inline]
    pub fn contains_edge(&self, a: Point, b: Point) -> bool {
        self.adj.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Neighbors of `p` in point order; empty if `p` is not a node.
    pub fn neighbors(&self, p: &Point) -> impl Iterator<Item = Point> + '_ {
        self.adj.get(p).into_iter().flatten().copied()
    }

    pub fn degree(&self, p: &Point) -> usize {
        self.adj.get(p).map_or(0, BTreeSet::len)
    }

    /// Nodes in point order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.adj.keys().copied()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of distinct undirected edges (assumes symmetry).
    pub fn edge_count(&self) -> usize {
        self.adj
            .iter()
            .map(|(p, ns)| ns.iter().filter(|q| p < *q).count())
            .sum()
    }

    /// Verify `b ∈ graph[a] ⇔ a ∈ graph[b]` and the absence of self-loops.
    ///
    /// Reports the first offending pair in point order.
    pub fn check_symmetry(&self) -> Result<(), BorderError> {
        for (a, ns) in &self.adj {
            for b in ns {
                if a == b {
                    return Err(BorderError::DegenerateSegment { point: *a });
                }
                if !self.contains_edge(*b, *a) {
                    return Err(BorderError::InvariantViolation { a: *a, b: *b });
                }
            }
        }
        Ok(())
    }
}
