//! Connector holes, their registry, and connection validation.
//!
//! The [`ConnectorRegistry`] is the fixed set of holes on the bench. It is
//! built once when the bench is constructed and shared read-only with the
//! wiring session. [`is_valid_connection`] decides whether a wire between
//! two holes matches their authored declarations.

mod connector;
mod registry;
mod types;
mod validate;

pub use connector::{Connector, Declaration};
pub use registry::{ConnectorRegistry, ConnectorRegistryBuilder};
pub use types::*;
pub use validate::{is_valid_connection, MatchPolicy};
