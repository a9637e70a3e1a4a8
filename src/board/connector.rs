//! Connector holes and their connection declarations.

use crate::geometry::Point;

use super::ConnectorId;

/// One `(own_id, target_id)` declaration on a connector.
///
/// An empty string means that half of the declaration is absent. A
/// declaration with both halves empty is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// Identity this hole presents to the other end of a wire
    pub own_id: String,
    /// Identity this hole expects on the other end of a wire
    pub target_id: String,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(own_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            own_id: own_id.into(),
            target_id: target_id.into(),
        }
    }

    /// Check whether either half of the declaration is set.
    pub fn is_active(&self) -> bool {
        !self.own_id.is_empty() || !self.target_id.is_empty()
    }
}

/// A hole on the bench where a wire may terminate.
#[derive(Debug, Clone)]
pub struct Connector {
    pub id: ConnectorId,
    pub name: String,
    pub position: Point,
    /// Primary and optional secondary declaration
    pub declarations: [Declaration; 2],
}

impl Connector {
    /// Create a connector with no declarations.
    pub fn new(id: ConnectorId, name: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            declarations: Default::default(),
        }
    }

    /// Set the primary declaration.
    pub fn with_primary(mut self, declaration: Declaration) -> Self {
        self.declarations[0] = declaration;
        self
    }

    /// Set the secondary declaration.
    pub fn with_secondary(mut self, declaration: Declaration) -> Self {
        self.declarations[1] = declaration;
        self
    }

    /// Iterate over the declarations that carry any id.
    pub fn active_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| d.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_activity() {
        assert!(!Declaration::default().is_active());
        assert!(Declaration::new("A", "").is_active());
        assert!(Declaration::new("", "B").is_active());
    }

    #[test]
    fn test_active_declarations() {
        let hole = Connector::new(ConnectorId(0), "h0", Point::ZERO)
            .with_primary(Declaration::new("A", "B"));
        assert_eq!(hole.active_declarations().count(), 1);

        let hole = hole.with_secondary(Declaration::new("C", "D"));
        assert_eq!(hole.active_declarations().count(), 2);
    }
}
