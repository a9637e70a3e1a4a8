//! Circuit physics for the bench.
//!
//! The bench circuit is fixed: a source set by a coarse and a fine knob
//! drives a series resistor and a diode. Each tick is evaluated in closed
//! form:
//!
//! 1. power off: meters blank
//! 2. any miswired connection: meters show an error
//! 3. otherwise the piecewise-linear diode model gives the diode voltage
//!    and the loop current
//!
//! Display rounding happens only when producing text, never in the
//! computation.

mod diode;
mod knob;
mod reading;
mod solver;

pub use diode::{DiodeCircuit, DiodeRegion, OperatingPoint, RESISTANCE_EPSILON};
pub use knob::{Knob, KnobSelector, ANGLE_EPSILON};
pub use reading::{Reading, FAULT_TEXT};
pub use solver::CircuitSolver;
