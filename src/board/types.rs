//! Identifier types for the bench.

use std::fmt;

/// A unique identifier for a connector hole on the bench.
///
/// Connector ids are indices into the [`super::ConnectorRegistry`], assigned
/// in the order the holes were declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorId(pub usize);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// A unique identifier for a committed wire.
///
/// Wire ids are never reused within a session, even after erasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}
