//! Random rectangular districts on the lattice (rectangle packing).
//!
//! Model
//! - The first rectangle sits at the origin. Each further rectangle is glued to
//!   a randomly chosen existing one: to its left or right (aligned on the top
//!   or bottom side) or above or below it (aligned on the left or right side).
//! - Candidates covering an already occupied unit cell are rejected and redrawn.
//! - Sides: `w ∈ [min_size, max_size]`, `h = round(w · r)` with
//!   `r ∈ [1, max_ratio]`, randomly transposed.
//!
//! Output polygons are `[(x, y), (x+w, y), (x+w, y+h), (x, y+h)]`, clockwise in
//! y-down screen coordinates. Same seed, same districts.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::Point;

/// Generator errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    DegenerateSample { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid district params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "district packing failed: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Rectangle-packing configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistrictCfg {
    pub num_districts: usize,
    pub min_size: i64,
    pub max_size: i64,
    /// Upper bound of the long/short side ratio; at least 1.
    pub max_ratio: f64,
    /// Total candidate draws (accepted or rejected) before giving up.
    pub max_attempts: usize,
}

impl Default for DistrictCfg {
    fn default() -> Self {
        Self {
            num_districts: 1000,
            min_size: 3,
            max_size: 10,
            max_ratio: 2.0,
            max_attempts: 1_000_000,
        }
    }
}

impl DistrictCfg {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.min_size < 1 {
            return Err(GeneratorError::invalid("min_size must be >= 1"));
        }
        if self.min_size > self.max_size {
            return Err(GeneratorError::invalid("min_size <= max_size required"));
        }
        if !(self.max_ratio.is_finite() && self.max_ratio >= 1.0) {
            return Err(GeneratorError::invalid("max_ratio must be finite and >= 1"));
        }
        // Keeps every side and cell count comfortably inside i64.
        if (self.max_size as f64) * self.max_ratio > 1e6 {
            return Err(GeneratorError::invalid("max_size * max_ratio must be <= 1e6"));
        }
        Ok(())
    }
}

/// Axis-aligned lattice rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    /// Closed clockwise loop of the four corners.
    pub fn corners(&self) -> Vec<Point> {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ]
    }

    fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (self.x..self.x + self.width)
            .flat_map(move |cx| (self.y..self.y + self.height).map(move |cy| (cx, cy)))
    }
}

/// Draw the non-overlapping rectangles (in acceptance order).
pub fn draw_rects(cfg: &DistrictCfg, seed: u64) -> Result<Vec<Rect>, GeneratorError> {
    cfg.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rects: Vec<Rect> = Vec::with_capacity(cfg.num_districts);
    let mut occupied: HashSet<(i64, i64)> = HashSet::new();
    let mut attempts = 0usize;
    while rects.len() < cfg.num_districts {
        if attempts >= cfg.max_attempts {
            return Err(GeneratorError::DegenerateSample {
                reason: format!(
                    "placed {} of {} districts in {attempts} attempts",
                    rects.len(),
                    cfg.num_districts
                ),
            });
        }
        attempts += 1;
        let (width, height) = sample_sides(cfg, &mut rng);
        let rect = match rects.len() {
            0 => Rect {
                x: 0,
                y: 0,
                width,
                height,
            },
            n => attach(&rects[rng.gen_range(0..n)], width, height, &mut rng),
        };
        if rect.cells().any(|c| occupied.contains(&c)) {
            continue;
        }
        occupied.extend(rect.cells());
        rects.push(rect);
    }
    tracing::debug!(districts = rects.len(), attempts, seed, "packed districts");
    Ok(rects)
}

/// Draw districts as polygons ready for [`crate::graph::build_graph`].
pub fn draw_districts(cfg: &DistrictCfg, seed: u64) -> Result<Vec<Vec<Point>>, GeneratorError> {
    Ok(draw_rects(cfg, seed)?.iter().map(Rect::corners).collect())
}

fn sample_sides<R: Rng>(cfg: &DistrictCfg, rng: &mut R) -> (i64, i64) {
    let w = rng.gen_range(cfg.min_size..=cfg.max_size);
    let ratio = rng.gen_range(1.0..=cfg.max_ratio);
    let h = (w as f64 * ratio).round() as i64;
    if rng.gen::<bool>() {
        (w, h)
    } else {
        (h, w)
    }
}

fn attach<R: Rng>(base: &Rect, width: i64, height: i64, rng: &mut R) -> Rect {
    let (mut x, mut y) = (base.x, base.y);
    if rng.gen::<bool>() {
        // Left or right of base.
        x = if rng.gen::<bool>() {
            x + base.width
        } else {
            x - width
        };
        if rng.gen::<bool>() {
            y += base.height - height;
        }
    } else {
        // Above or below base.
        y = if rng.gen::<bool>() {
            y + base.height
        } else {
            y - height
        };
        if rng.gen::<bool>() {
            x += base.width - width;
        }
    }
    Rect {
        x,
        y,
        width,
        height,
    }
}
