//! Markup-space geometry primitives
//!
//! All coordinates are in markup space. Conversion from client or model
//! space happens in the host before values reach this crate.

use serde::{Deserialize, Serialize};

/// Tolerance used for every floating-point equality check on markup state.
///
/// Sub-pixel rounding during drags routinely produces values that differ in
/// the last few bits; anything closer than this is treated as unchanged.
pub const GEOMETRY_EPSILON: f64 = 1e-4;

/// Compare two scalars within [`GEOMETRY_EPSILON`]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= GEOMETRY_EPSILON
}

/// A point in markup space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Translate by a delta
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Width and height of a markup's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn approx_eq(&self, other: &Size) -> bool {
        approx_eq(self.width, other.width) && approx_eq(self.height, other.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Compute the center position and size of the box enclosing `points`.
///
/// Returns `None` for an empty slice.
pub fn bounds_of(points: &[Point]) -> Option<(Point, Size)> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    Some((center, Size::new(max_x - min_x, max_y - min_y)))
}

/// Compare two point lists element-wise within [`GEOMETRY_EPSILON`]
pub fn points_approx_eq(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(q))
}
