//! Exact lattice geometry on integer segments.
//!
//! Purpose
//! - Reduced-fraction slopes and enumeration of the lattice points strictly
//!   inside a segment, with no floating point anywhere.
//!
//! Arithmetic
//! - Deltas are taken in `i128`, so any difference of two `i64` coordinates is
//!   exact. Interior points lie inside the segment's bounding box and therefore
//!   fit back into `i64`.

use crate::error::BorderError;
use crate::graph::Point;

/// Euclid's algorithm. Always non-negative; `gcd(0, n) = |n|`.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Direction vector reduced to lowest terms, sign kept on both components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slope {
    pub dx: i128,
    pub dy: i128,
}

impl Slope {
    /// The same line walked the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl std::ops::Neg for Slope {
    type Output = Slope;
    #[inline]
    fn neg(self) -> Self::Output {
        self.reversed()
    }
}

#[inline]
fn delta(a: Point, b: Point) -> (i128, i128) {
    (
        i128::from(b.x) - i128::from(a.x),
        i128::from(b.y) - i128::from(a.y),
    )
}

/// Reduced direction from `a` to `b`. Fails on `a == b`.
pub fn reduced_slope(a: Point, b: Point) -> Result<Slope, BorderError> {
    let (dx, dy) = delta(a, b);
    let g = gcd(dx, dy);
    if g == 0 {
        return Err(BorderError::DegenerateSegment { point: a });
    }
    Ok(Slope {
        dx: dx / g,
        dy: dy / g,
    })
}

/// Number of lattice points strictly between `a` and `b` (`gcd - 1`).
pub fn interior_lattice_count(a: Point, b: Point) -> Result<u128, BorderError> {
    let (dx, dy) = delta(a, b);
    let g = gcd(dx, dy);
    if g == 0 {
        return Err(BorderError::DegenerateSegment { point: a });
    }
    Ok(g.unsigned_abs() - 1)
}

/// Lazy walk over the interior lattice points of a segment, in order from `a` to `b`.
#[derive(Clone, Debug)]
pub struct LatticeWalk {
    x: i128,
    y: i128,
    step: Slope,
    remaining: u128,
}

impl Iterator for LatticeWalk {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.x += self.step.dx;
        self.y += self.step.dy;
        // Strictly between two i64 endpoints.
        Some(Point::new(self.x as i64, self.y as i64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Start a [`LatticeWalk`] over the open segment `(a, b)`.
pub fn lattice_walk(a: Point, b: Point) -> Result<LatticeWalk, BorderError> {
    let step = reduced_slope(a, b)?;
    let remaining = interior_lattice_count(a, b)?;
    Ok(LatticeWalk {
        x: i128::from(a.x),
        y: i128::from(a.y),
        step,
        remaining,
    })
}

/// Every integer point strictly inside segment `a`–`b`, ordered from `a` to `b`.
///
/// Empty when the deltas are coprime.
pub fn interior_lattice_points(a: Point, b: Point) -> Result<Vec<Point>, BorderError> {
    Ok(lattice_walk(a, b)?.collect())
}

/// Position of `p` on the open segment `(a, b)` counted in reduced steps from `a`.
///
/// `Some(k)` means `p == a + k * reduced_slope(a, b)` with `0 < k < gcd`; `None`
/// if `p` is off the segment, an endpoint, or the segment is degenerate.
pub fn lattice_offset(a: Point, b: Point, p: Point) -> Option<u128> {
    if p == a || p == b {
        return None;
    }
    let step = reduced_slope(a, b).ok()?;
    let interior = interior_lattice_count(a, b).ok()?;
    let (px, py) = delta(a, p);
    let k = if step.dx != 0 {
        if px % step.dx != 0 {
            return None;
        }
        px / step.dx
    } else {
        if px != 0 || py % step.dy != 0 {
            return None;
        }
        py / step.dy
    };
    // Off-line points can overflow here; on-line ones never do.
    if step.dx.checked_mul(k)? != px || step.dy.checked_mul(k)? != py {
        return None;
    }
    let k = u128::try_from(k).ok()?;
    (1..=interior).contains(&k).then_some(k)
}

/// Exact test for `p` lying strictly inside segment `a`–`b`.
#[inline]
pub fn strictly_inside(a: Point, b: Point, p: Point) -> bool {
    lattice_offset(a, b, p).is_some()
}
