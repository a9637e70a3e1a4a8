//! Per-tick circuit evaluation.

use log::trace;

use crate::config::PhysicsConfig;

use super::diode::DiodeCircuit;
use super::knob::{Knob, KnobSelector};
use super::reading::Reading;

/// The bench circuit: two knobs summed into a source driving a series
/// resistor and a diode.
///
/// Only the knob angles persist between ticks; every reading is computed
/// from scratch.
#[derive(Debug, Clone)]
pub struct CircuitSolver {
    coarse: Knob,
    fine: Knob,
    circuit: DiodeCircuit,
}

impl CircuitSolver {
    /// Create a solver with both knobs turned fully down.
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            coarse: Knob::new(&config.coarse),
            fine: Knob::new(&config.fine),
            circuit: DiodeCircuit::new(config),
        }
    }

    /// Get a knob.
    pub fn knob(&self, selector: KnobSelector) -> &Knob {
        match selector {
            KnobSelector::Coarse => &self.coarse,
            KnobSelector::Fine => &self.fine,
        }
    }

    /// Get a knob for modification.
    pub fn knob_mut(&mut self, selector: KnobSelector) -> &mut Knob {
        match selector {
            KnobSelector::Coarse => &mut self.coarse,
            KnobSelector::Fine => &mut self.fine,
        }
    }

    /// Turn a knob by a horizontal pointer drag.
    pub fn drag(&mut self, selector: KnobSelector, delta_x: f64) {
        self.knob_mut(selector).drag(delta_x);
    }

    /// Source voltage set by the two knobs.
    pub fn source_voltage(&self) -> f64 {
        self.coarse.voltage() + self.fine.voltage()
    }

    /// Evaluate the circuit for one tick.
    ///
    /// A fault short-circuits evaluation: no physics runs while a miswired
    /// connection is present.
    pub fn solve(&self, powered: bool, has_fault: bool) -> Reading {
        if !powered {
            return Reading::Blank;
        }
        if has_fault {
            return Reading::Fault;
        }

        let source = self.source_voltage();
        let op = self.circuit.solve(source);
        trace!(
            "source={:.4} V diode={:.4} V current={:.6} A ({:?})",
            source,
            op.voltage,
            op.current,
            op.region
        );
        Reading::Measured(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnobConfig;
    use crate::physics::DiodeRegion;
    use approx::assert_relative_eq;

    /// 10 V per turn on the coarse knob, so each degree is 1/36 V.
    fn solver(series: f64, diode: f64, threshold: f64) -> CircuitSolver {
        CircuitSolver::new(&PhysicsConfig {
            coarse: KnobConfig::coarse(),
            fine: KnobConfig::fine(),
            series_resistance: series,
            diode_threshold: threshold,
            diode_resistance: diode,
        })
    }

    #[test]
    fn test_unpowered_is_blank() {
        let mut s = solver(100.0, 0.0, 0.7);
        s.knob_mut(KnobSelector::Coarse).set_angle(180.0);
        assert_eq!(s.solve(false, false), Reading::Blank);
        assert_eq!(s.solve(false, true), Reading::Blank);
    }

    #[test]
    fn test_fault_overrides_knobs() {
        let mut s = solver(100.0, 0.0, 0.7);
        for angle in [0.0, 90.0, 360.0] {
            s.knob_mut(KnobSelector::Coarse).set_angle(angle);
            assert_eq!(s.solve(true, true), Reading::Fault);
        }
    }

    #[test]
    fn test_knobs_sum_linearly() {
        let mut s = solver(100.0, 0.0, 0.7);
        s.knob_mut(KnobSelector::Coarse).set_angle(36.0);
        s.knob_mut(KnobSelector::Fine).set_angle(90.0);
        assert_relative_eq!(s.source_voltage(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_biased_scenario() {
        let mut s = solver(10.0, 0.5, 0.6);
        // 2.6 V on the coarse knob
        s.knob_mut(KnobSelector::Coarse).set_angle(2.6 * 36.0);

        let reading = s.solve(true, false);
        let Reading::Measured(op) = reading else {
            panic!("expected a measurement, got {:?}", reading);
        };
        assert_eq!(op.region, DiodeRegion::Forward);
        assert_relative_eq!(op.current, 0.190476, epsilon = 1e-5);
        assert_relative_eq!(op.voltage, 0.695238, epsilon = 1e-5);
        assert_relative_eq!(reading.current_milliamps().unwrap(), 190.476, epsilon = 1e-2);
        assert_eq!(reading.current_text(), "190.48");
    }

    #[test]
    fn test_below_knee_scenario() {
        let mut s = solver(10.0, 0.5, 0.6);
        s.knob_mut(KnobSelector::Coarse).set_angle(0.4 * 36.0);

        let reading = s.solve(true, false);
        assert_relative_eq!(reading.voltage().unwrap(), 0.4, epsilon = 1e-12);
        assert_eq!(reading.current_milliamps(), Some(0.0));
        assert_eq!(reading.voltage_text(), "0.40");
        assert_eq!(reading.current_text(), "0.00");
    }

    #[test]
    fn test_monotonic_in_coarse_angle() {
        let mut s = solver(10.0, 0.5, 0.6);
        let mut last_voltage = f64::NEG_INFINITY;
        let mut last_current = f64::NEG_INFINITY;

        for step in 0..=360 {
            s.knob_mut(KnobSelector::Coarse).set_angle(step as f64);
            let source = s.source_voltage();
            let Reading::Measured(op) = s.solve(true, false) else {
                panic!("expected a measurement");
            };

            if source <= 0.6 {
                assert!(op.voltage > last_voltage || step == 0);
                assert_eq!(op.current, 0.0);
            } else {
                assert!(op.current > last_current);
                assert!(op.voltage >= last_voltage);
            }
            last_voltage = op.voltage;
            last_current = op.current;
        }
    }

    #[test]
    fn test_drag_turns_selected_knob_only() {
        let mut s = solver(100.0, 0.0, 0.7);
        s.drag(KnobSelector::Fine, 15.0);
        assert_relative_eq!(s.knob(KnobSelector::Fine).angle(), 30.0);
        assert_eq!(s.knob(KnobSelector::Coarse).angle(), 0.0);
    }
}
