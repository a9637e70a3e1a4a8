//! Meter readings and their display text.

use super::diode::OperatingPoint;

/// Text shown on both meters while a miswired connection is present.
pub const FAULT_TEXT: &str = "Err";

/// What the voltmeter and ammeter show for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Power is off; meters are blank
    Blank,
    /// A wire is miswired; meters show an error
    Fault,
    /// A solved operating point
    Measured(OperatingPoint),
}

impl Reading {
    /// Diode voltage, if measured.
    pub fn voltage(&self) -> Option<f64> {
        match self {
            Reading::Measured(op) => Some(op.voltage),
            _ => None,
        }
    }

    /// Loop current in milliamps, if measured.
    pub fn current_milliamps(&self) -> Option<f64> {
        match self {
            Reading::Measured(op) => Some(op.current * 1000.0),
            _ => None,
        }
    }

    /// Voltmeter text, two decimals.
    pub fn voltage_text(&self) -> String {
        self.text(self.voltage())
    }

    /// Ammeter text in milliamps, two decimals.
    pub fn current_text(&self) -> String {
        self.text(self.current_milliamps())
    }

    fn text(&self, value: Option<f64>) -> String {
        match (self, value) {
            (Reading::Fault, _) => FAULT_TEXT.to_string(),
            (_, Some(v)) => format!("{:.2}", v),
            (_, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DiodeRegion;

    #[test]
    fn test_measured_text() {
        let reading = Reading::Measured(OperatingPoint {
            voltage: 0.6952,
            current: 0.190476,
            region: DiodeRegion::Forward,
        });
        assert_eq!(reading.voltage_text(), "0.70");
        assert_eq!(reading.current_text(), "190.48");
    }

    #[test]
    fn test_blank_and_fault_text() {
        assert_eq!(Reading::Blank.voltage_text(), "");
        assert_eq!(Reading::Blank.current_text(), "");
        assert_eq!(Reading::Fault.voltage_text(), "Err");
        assert_eq!(Reading::Fault.current_text(), "Err");
        assert!(Reading::Fault.voltage().is_none());
    }
}
