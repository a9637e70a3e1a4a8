//! Wires: rope rendering, committed wires, and the drawing session.

mod rope;
mod session;
mod wire;

pub use rope::{render_rope, Rope, SAG_DISTANCE_FACTOR};
pub use session::{DiscardReason, PendingWire, SessionEvent, WireSession};
pub use wire::{WireInstance, WireStatus};
