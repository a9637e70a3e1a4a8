//! Committed wires.

use std::fmt;

use crate::board::{ConnectorId, WireId};
use crate::geometry::{distance_point_to_polyline, Point};

/// Validity of a committed wire, fixed when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireStatus {
    /// Endpoints match their declarations
    Normal,
    /// Endpoints do not match; the circuit shows an error
    Fault,
}

impl WireStatus {
    /// Check whether this is a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, WireStatus::Fault)
    }
}

impl fmt::Display for WireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireStatus::Normal => write!(f, "normal"),
            WireStatus::Fault => write!(f, "fault"),
        }
    }
}

/// A wire committed between two distinct holes.
#[derive(Debug, Clone)]
pub struct WireInstance {
    pub id: WireId,
    /// [start, end] holes, never equal
    pub endpoints: [ConnectorId; 2],
    /// Rendered rope between the two holes
    pub points: Vec<Point>,
    pub status: WireStatus,
}

impl WireInstance {
    /// Check whether `point` lies within `radius` of the rope.
    pub fn is_hit(&self, point: Point, radius: f32) -> bool {
        distance_point_to_polyline(point, &self.points).is_some_and(|d| d <= radius)
    }
}
