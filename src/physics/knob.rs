//! Control knobs.

use crate::config::KnobConfig;

/// Max angles at or below this are treated as zero.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Which knob a drag applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnobSelector {
    Coarse,
    Fine,
}

impl KnobSelector {
    /// Parse a knob name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "coarse" => Some(Self::Coarse),
            "fine" => Some(Self::Fine),
            _ => None,
        }
    }
}

/// A rotary knob acting as a voltage source.
///
/// The angle is clamped to `[0, max_angle]` and maps linearly to
/// `[0, max_voltage]`.
#[derive(Debug, Clone)]
pub struct Knob {
    /// Current angle in degrees
    angle: f64,
    pub max_angle: f64,
    pub max_voltage: f64,
    /// Degrees per unit of horizontal drag
    pub sensitivity: f64,
    /// Sprite rotation at angle zero
    pub starting_offset: f64,
}

impl Knob {
    /// Create a knob turned fully down.
    pub fn new(config: &KnobConfig) -> Self {
        Self {
            angle: 0.0,
            max_angle: config.max_angle.max(0.0),
            max_voltage: config.max_voltage,
            sensitivity: config.sensitivity,
            starting_offset: config.starting_offset,
        }
    }

    /// Current angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the angle, clamped to the knob's range. NaN is ignored.
    pub fn set_angle(&mut self, angle: f64) {
        if !angle.is_nan() {
            self.angle = angle.clamp(0.0, self.max_angle);
        }
    }

    /// Turn the knob by a horizontal pointer drag.
    pub fn drag(&mut self, delta_x: f64) {
        self.set_angle(self.angle + delta_x * self.sensitivity);
    }

    /// Position from 0.0 to 1.0. A knob with no range reads 0.
    pub fn fraction(&self) -> f64 {
        if self.max_angle <= ANGLE_EPSILON {
            0.0
        } else {
            self.angle / self.max_angle
        }
    }

    /// Voltage contributed at the current position.
    pub fn voltage(&self) -> f64 {
        self.fraction() * self.max_voltage
    }

    /// Z rotation for the knob sprite, in degrees (clockwise is negative).
    pub fn visual_rotation(&self) -> f64 {
        -self.angle + self.starting_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drag_accumulates_and_clamps() {
        let mut knob = Knob::new(&KnobConfig::coarse());
        knob.drag(10.0);
        assert_relative_eq!(knob.angle(), 20.0);

        knob.drag(1000.0);
        assert_relative_eq!(knob.angle(), 360.0);

        knob.drag(-5000.0);
        assert_relative_eq!(knob.angle(), 0.0);
    }

    #[test]
    fn test_voltage_is_linear() {
        let mut knob = Knob::new(&KnobConfig::fine());
        knob.set_angle(90.0);
        assert_relative_eq!(knob.fraction(), 0.5);
        assert_relative_eq!(knob.voltage(), 0.5);
    }

    #[test]
    fn test_zero_range_knob_reads_zero() {
        let mut knob = Knob::new(&KnobConfig {
            max_angle: 0.0,
            ..KnobConfig::coarse()
        });
        knob.drag(50.0);
        assert_eq!(knob.angle(), 0.0);
        assert_eq!(knob.voltage(), 0.0);
    }

    #[test]
    fn test_visual_rotation() {
        let mut knob = Knob::new(&KnobConfig {
            starting_offset: 45.0,
            ..KnobConfig::fine()
        });
        knob.set_angle(30.0);
        assert_relative_eq!(knob.visual_rotation(), 15.0);
    }

    #[test]
    fn test_overflowing_drag_clamps() {
        let mut knob = Knob::new(&KnobConfig::coarse());
        knob.drag(f64::MAX);
        assert_eq!(knob.angle(), 360.0);

        knob.drag(f64::MIN);
        assert_eq!(knob.angle(), 0.0);

        knob.set_angle(f64::INFINITY);
        assert_eq!(knob.angle(), 360.0);
    }

    #[test]
    fn test_nan_angle_ignored() {
        let mut knob = Knob::new(&KnobConfig::coarse());
        knob.set_angle(100.0);
        knob.set_angle(f64::NAN);
        assert_relative_eq!(knob.angle(), 100.0);
    }
}
