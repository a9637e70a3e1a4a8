//! 2-D geometry helpers used for hit testing and rope rendering.
//!
//! Layout space is y-up: a point with a smaller `y` is lower on the bench.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Squared lengths at or below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// A point (or displacement) in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors.
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length of the vector.
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    /// Length of the vector.
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        (self + other) * 0.5
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for f32 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Distance from `p` to the closest point on segment `a`-`b`.
///
/// A zero-length segment degenerates to the distance from `p` to `a`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= EPSILON {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Smallest distance from `p` to any segment of `points`.
///
/// Returns `None` for an empty polyline.
pub fn distance_point_to_polyline(p: Point, points: &[Point]) -> Option<f32> {
    match points {
        [] => None,
        [only] => Some(p.distance(*only)),
        _ => points
            .windows(2)
            .map(|seg| distance_point_to_segment(p, seg[0], seg[1]))
            .reduce(f32::min),
    }
}

/// Evaluate a quadratic Bézier curve at `t` in `[0, 1]`.
pub fn bezier_point(t: f32, p0: Point, p1: Point, p2: Point) -> Point {
    let u = 1.0 - t;
    (u * u) * p0 + (2.0 * u * t) * p1 + (t * t) * p2
}
