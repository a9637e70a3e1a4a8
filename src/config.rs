//! Bench configuration.
//!
//! All options are supplied when the bench is built and never change
//! afterwards. [`BenchConfig::validate`] rejects values that would break an
//! invariant (a rope with fewer than two points, negative radii, ...).

use crate::board::MatchPolicy;
use crate::error::{BenchError, Result};

/// Largest accepted rope point count.
pub const MAX_RESOLUTION: usize = 1024;

/// Rope rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeConfig {
    /// Number of points in every rendered rope (at least 2)
    pub resolution: usize,
    /// Base droop of the rope's control point, in layout units
    pub sag: f32,
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            resolution: 20,
            sag: 40.0,
        }
    }
}

/// Wire drawing and erasing options.
#[derive(Debug, Clone, PartialEq)]
pub struct WiringConfig {
    /// Maximum distance at which a released wire end attaches to a hole
    pub snap_radius: f32,
    /// Maximum distance from a wire at which an eraser click removes it
    pub delete_radius: f32,
    /// How empty declaration ids are matched
    pub match_policy: MatchPolicy,
}

impl Default for WiringConfig {
    fn default() -> Self {
        Self {
            snap_radius: 30.0,
            delete_radius: 25.0,
            match_policy: MatchPolicy::Strict,
        }
    }
}

/// Options for a single knob.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobConfig {
    /// Largest angle the knob can be turned to, in degrees
    pub max_angle: f64,
    /// Voltage contributed at `max_angle`
    pub max_voltage: f64,
    /// Degrees of rotation per unit of horizontal pointer drag
    pub sensitivity: f64,
    /// Resting rotation of the knob sprite, in degrees
    pub starting_offset: f64,
}

impl KnobConfig {
    /// Coarse knob defaults: one full turn for 10 V.
    pub fn coarse() -> Self {
        Self {
            max_angle: 360.0,
            max_voltage: 10.0,
            sensitivity: 2.0,
            starting_offset: 0.0,
        }
    }

    /// Fine knob defaults: half a turn for 1 V.
    pub fn fine() -> Self {
        Self {
            max_angle: 180.0,
            max_voltage: 1.0,
            sensitivity: 2.0,
            starting_offset: 0.0,
        }
    }
}

/// Circuit physics options.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub coarse: KnobConfig,
    pub fine: KnobConfig,
    /// Series resistor in ohms
    pub series_resistance: f64,
    /// Diode knee voltage
    pub diode_threshold: f64,
    /// Diode on-resistance in ohms
    pub diode_resistance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            coarse: KnobConfig::coarse(),
            fine: KnobConfig::fine(),
            series_resistance: 100.0,
            diode_threshold: 0.7,
            diode_resistance: 0.0,
        }
    }
}

/// Notice banner animation options.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerConfig {
    /// Distance the banner rises over its lifetime
    pub rise: f32,
    /// Lifetime in seconds
    pub duration: f32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            rise: 100.0,
            duration: 1.0,
        }
    }
}

/// Complete configuration for a bench.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchConfig {
    pub rope: RopeConfig,
    pub wiring: WiringConfig,
    pub physics: PhysicsConfig,
    pub banner: BannerConfig,
}

impl BenchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rope point count.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.rope.resolution = resolution;
        self
    }

    /// Set the base rope sag.
    pub fn with_sag(mut self, sag: f32) -> Self {
        self.rope.sag = sag;
        self
    }

    /// Set the snap radius for releasing a wire onto a hole.
    pub fn with_snap_radius(mut self, radius: f32) -> Self {
        self.wiring.snap_radius = radius;
        self
    }

    /// Set the eraser hit radius.
    pub fn with_delete_radius(mut self, radius: f32) -> Self {
        self.wiring.delete_radius = radius;
        self
    }

    /// Set the declaration matching policy.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.wiring.match_policy = policy;
        self
    }

    /// Set the coarse knob options.
    pub fn with_coarse_knob(mut self, knob: KnobConfig) -> Self {
        self.physics.coarse = knob;
        self
    }

    /// Set the fine knob options.
    pub fn with_fine_knob(mut self, knob: KnobConfig) -> Self {
        self.physics.fine = knob;
        self
    }

    /// Set the series resistance (ohms).
    pub fn with_series_resistance(mut self, ohms: f64) -> Self {
        self.physics.series_resistance = ohms;
        self
    }

    /// Set the diode knee voltage and on-resistance.
    pub fn with_diode(mut self, threshold: f64, resistance: f64) -> Self {
        self.physics.diode_threshold = threshold;
        self.physics.diode_resistance = resistance;
        self
    }

    /// Check every construction-time invariant.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_RESOLUTION).contains(&self.rope.resolution) {
            return Err(BenchError::invalid_config(format!(
                "rope resolution must be between 2 and {}, got {}",
                MAX_RESOLUTION, self.rope.resolution
            )));
        }

        non_negative("rope sag", self.rope.sag as f64)?;
        non_negative("snap radius", self.wiring.snap_radius as f64)?;
        non_negative("delete radius", self.wiring.delete_radius as f64)?;

        for (name, knob) in [("coarse", &self.physics.coarse), ("fine", &self.physics.fine)] {
            non_negative(&format!("{name} knob max angle"), knob.max_angle)?;
            non_negative(&format!("{name} knob sensitivity"), knob.sensitivity)?;
            finite(&format!("{name} knob max voltage"), knob.max_voltage)?;
            finite(&format!("{name} knob offset"), knob.starting_offset)?;
        }

        non_negative("series resistance", self.physics.series_resistance)?;
        non_negative("diode resistance", self.physics.diode_resistance)?;
        finite("diode threshold", self.physics.diode_threshold)?;

        finite("banner rise", self.banner.rise as f64)?;
        if self.banner.duration.is_nan() || self.banner.duration <= 0.0 {
            return Err(BenchError::invalid_config(format!(
                "banner duration must be positive, got {}",
                self.banner.duration
            )));
        }

        Ok(())
    }
}

fn finite(what: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BenchError::invalid_config(format!(
            "{what} must be finite, got {value}"
        )))
    }
}

fn non_negative(what: &str, value: f64) -> Result<()> {
    finite(what, value)?;
    if value < 0.0 {
        return Err(BenchError::invalid_config(format!(
            "{what} must not be negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_values() {
        let config = BenchConfig::new()
            .with_resolution(8)
            .with_sag(0.0)
            .with_snap_radius(12.0)
            .with_series_resistance(10.0)
            .with_diode(0.6, 0.5);
        assert_eq!(config.rope.resolution, 8);
        assert_eq!(config.wiring.snap_radius, 12.0);
        assert_eq!(config.physics.series_resistance, 10.0);
        assert_eq!(config.physics.diode_threshold, 0.6);
        assert_eq!(config.physics.diode_resistance, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_rope() {
        let err = BenchConfig::new().with_resolution(1).validate();
        assert!(matches!(err, Err(BenchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_rejects_oversized_rope() {
        assert!(BenchConfig::new().with_resolution(MAX_RESOLUTION).validate().is_ok());
        let err = BenchConfig::new().with_resolution(MAX_RESOLUTION + 1).validate();
        assert!(matches!(err, Err(BenchError::InvalidConfig { .. })));
        assert!(BenchConfig::new().with_resolution(usize::MAX).validate().is_err());
    }

    #[test]
    fn test_rejects_negative_radius() {
        assert!(BenchConfig::new().with_delete_radius(-1.0).validate().is_err());
        assert!(BenchConfig::new().with_snap_radius(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_zero_max_angle_is_allowed() {
        let knob = KnobConfig {
            max_angle: 0.0,
            ..KnobConfig::fine()
        };
        assert!(BenchConfig::new().with_fine_knob(knob).validate().is_ok());
    }
}
