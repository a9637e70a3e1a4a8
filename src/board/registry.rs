//! The fixed set of connector holes on a bench.

use std::collections::HashMap;

use crate::error::{BenchError, Result};
use crate::geometry::Point;

use super::{Connector, ConnectorId, Declaration};

/// Registry of every connector hole, in declaration order.
///
/// The registry has no mutators once built; it is a snapshot taken when
/// the bench starts.
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    connectors: Vec<Connector>,
    name_map: HashMap<String, ConnectorId>,
}

impl ConnectorRegistry {
    /// Start building a registry.
    pub fn builder() -> ConnectorRegistryBuilder {
        ConnectorRegistryBuilder::default()
    }

    /// Number of holes.
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Whether the bench has no holes.
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Look up a hole by id.
    pub fn get(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(id.0)
    }

    /// Look up a hole by its authored name.
    pub fn find(&self, name: &str) -> Option<&Connector> {
        self.name_map.get(name).and_then(|&id| self.get(id))
    }

    /// Look up a hole id by name, failing if it does not exist.
    pub fn require(&self, name: &str) -> Result<ConnectorId> {
        self.name_map
            .get(name)
            .copied()
            .ok_or_else(|| BenchError::ConnectorNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate over all holes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    /// Find the hole closest to `point` within `radius`.
    ///
    /// `exclude` is skipped (the hole a wire started from). Only a strictly
    /// closer candidate replaces the current best, so on exact ties the hole
    /// declared first wins.
    pub fn find_closest(
        &self,
        point: Point,
        radius: f32,
        exclude: Option<ConnectorId>,
    ) -> Option<ConnectorId> {
        let mut best: Option<(ConnectorId, f32)> = None;

        for connector in self.iter() {
            if Some(connector.id) == exclude {
                continue;
            }

            let distance = connector.position.distance(point);
            if distance > radius {
                continue;
            }

            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((connector.id, distance)),
            }
        }

        best.map(|(id, _)| id)
    }
}

/// Builder for a [`ConnectorRegistry`].
#[derive(Debug, Default)]
pub struct ConnectorRegistryBuilder {
    registry: ConnectorRegistry,
}

impl ConnectorRegistryBuilder {
    /// Add a hole, returning its id. Names must be unique.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        position: Point,
        declarations: [Declaration; 2],
    ) -> Result<ConnectorId> {
        let name = name.into();
        if self.registry.name_map.contains_key(&name) {
            return Err(BenchError::DuplicateConnector { name });
        }

        let id = ConnectorId(self.registry.connectors.len());
        let mut connector = Connector::new(id, name.clone(), position);
        connector.declarations = declarations;

        self.registry.connectors.push(connector);
        self.registry.name_map.insert(name, id);
        Ok(id)
    }

    /// Finish building.
    pub fn build(self) -> ConnectorRegistry {
        self.registry
    }
}
