//! Piecewise-linear diode model.
//!
//! The diode blocks below its knee voltage and behaves as a voltage source
//! in series with a small on-resistance above it:
//!
//! ```text
//!   V <= Vth :  I = 0
//!   V >  Vth :  I = (V - Vth) / (Rs + Rd),   Vd = Vth + I * Rd
//! ```
//!
//! Both branches agree at `V = Vth`, so readings are continuous as the
//! source voltage crosses the knee.

use crate::config::PhysicsConfig;

/// Total resistances at or below this are treated as a short.
pub const RESISTANCE_EPSILON: f64 = 1e-12;

/// Operating region of the diode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiodeRegion {
    /// Source at or below the knee; no current flows
    Open,
    /// Forward biased and conducting
    Forward,
}

/// Solved operating point of the diode + series resistor loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Voltage across the diode
    pub voltage: f64,
    /// Loop current in amps
    pub current: f64,
    pub region: DiodeRegion,
}

/// Diode in series with a resistor, driven by an ideal source.
#[derive(Debug, Clone)]
pub struct DiodeCircuit {
    /// Knee voltage
    pub threshold: f64,
    /// Diode on-resistance
    pub diode_resistance: f64,
    /// Series resistor
    pub series_resistance: f64,
}

impl DiodeCircuit {
    /// Create the circuit from configuration.
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            threshold: config.diode_threshold,
            diode_resistance: config.diode_resistance,
            series_resistance: config.series_resistance,
        }
    }

    /// Solve for the given source voltage.
    ///
    /// With a source at or below the knee the voltmeter (across the open
    /// diode) reads the full source voltage.
    pub fn solve(&self, source: f64) -> OperatingPoint {
        if source <= self.threshold {
            return OperatingPoint {
                voltage: source,
                current: 0.0,
                region: DiodeRegion::Open,
            };
        }

        let total = self.series_resistance + self.diode_resistance;
        let current = if total <= RESISTANCE_EPSILON {
            0.0
        } else {
            (source - self.threshold) / total
        };

        OperatingPoint {
            voltage: self.threshold + current * self.diode_resistance,
            current,
            region: DiodeRegion::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circuit(series: f64, diode: f64, threshold: f64) -> DiodeCircuit {
        DiodeCircuit {
            threshold,
            diode_resistance: diode,
            series_resistance: series,
        }
    }

    #[test]
    fn test_forward_bias() {
        let op = circuit(10.0, 0.5, 0.6).solve(2.6);
        assert_eq!(op.region, DiodeRegion::Forward);
        assert_relative_eq!(op.current, 2.0 / 10.5, epsilon = 1e-12);
        assert_relative_eq!(op.voltage, 0.6 + (2.0 / 10.5) * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_below_knee() {
        let op = circuit(10.0, 0.5, 0.6).solve(0.4);
        assert_eq!(op.region, DiodeRegion::Open);
        assert_eq!(op.voltage, 0.4);
        assert_eq!(op.current, 0.0);
    }

    #[test]
    fn test_knee_is_continuous() {
        let c = circuit(100.0, 2.0, 0.7);
        let at = c.solve(0.7);
        let above = c.solve(0.7 + 1e-9);
        assert_eq!(at.region, DiodeRegion::Open);
        assert_eq!(above.region, DiodeRegion::Forward);
        assert!((above.voltage - at.voltage).abs() < 1e-9);
        assert!(above.current < 1e-9);
    }

    #[test]
    fn test_zero_resistance_does_not_divide() {
        let op = circuit(0.0, 0.0, 0.7).solve(5.0);
        assert!(op.current.is_finite());
        assert!(op.voltage.is_finite());
    }
}
