//! Sagging rope curves.
//!
//! A rope is a quadratic Bézier between its two ends whose control point
//! hangs below the midpoint. Longer ropes hang lower:
//!
//! ```text
//!   control = midpoint - (0, |sag + distance * SAG_DISTANCE_FACTOR|)
//! ```

use crate::config::{RopeConfig, MAX_RESOLUTION};
use crate::geometry::{bezier_point, Point};

/// Extra sag per unit of rope length.
pub const SAG_DISTANCE_FACTOR: f32 = 0.1;

/// Render a rope from `start` to `end` as `resolution` ordered points.
///
/// The output depends only on the arguments. When `start == end` every
/// point coincides with `start`. `resolution` is clamped to
/// `[2, MAX_RESOLUTION]`.
pub fn render_rope(start: Point, end: Point, resolution: usize, sag: f32) -> Vec<Point> {
    let resolution = resolution.clamp(2, MAX_RESOLUTION);
    if start == end {
        return vec![start; resolution];
    }

    let droop = (sag + start.distance(end) * SAG_DISTANCE_FACTOR).abs();
    let control = start.midpoint(end) - Point::new(0.0, droop);

    let last = (resolution - 1) as f32;
    (0..resolution)
        .map(|i| bezier_point(i as f32 / last, start, control, end))
        .collect()
}

/// Rope renderer bound to one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rope {
    pub resolution: usize,
    pub sag: f32,
}

impl Rope {
    /// Create a renderer from configuration.
    pub fn new(config: &RopeConfig) -> Self {
        Self {
            resolution: config.resolution,
            sag: config.sag,
        }
    }

    /// Render a rope between two points.
    pub fn render(&self, start: Point, end: Point) -> Vec<Point> {
        render_rope(start, end, self.resolution, self.sag)
    }
}
