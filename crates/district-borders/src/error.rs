//! Errors surfaced by the border pipeline.
//!
//! Every variant signals a broken precondition or an internal bug; nothing here
//! is meant to be retried.

use std::fmt;

use crate::graph::Point;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BorderError {
    /// Polygon `index` of the input cannot form a closed loop.
    InvalidPolygon { index: usize, reason: String },
    /// Slope or lattice query on a zero-length segment.
    DegenerateSegment { point: Point },
    /// `b ∈ graph[a]` without `a ∈ graph[b]`.
    InvariantViolation { a: Point, b: Point },
}

impl BorderError {
    pub(crate) fn invalid_polygon(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPolygon { index, reason } => {
                write!(f, "polygon {index} is invalid: {reason}")
            }
            Self::DegenerateSegment { point } => {
                write!(f, "zero-length segment at {point} has no slope")
            }
            Self::InvariantViolation { a, b } => write!(
                f,
                "graph is not symmetric: {b} is a neighbor of {a} but not the reverse"
            ),
        }
    }
}

impl std::error::Error for BorderError {}
