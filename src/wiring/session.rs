//! Wire drawing and erasing state machine.
//!
//! ```text
//!            start(hole)                 resolve(pointer) / commit(hole)
//!   Idle ----------------> Drawing ------------------------------------> Idle
//!                          |  ^   \                                      ^
//!                 track(p) +--+    `-- cancel / no snap / self loop -----'
//! ```
//!
//! Only one wire can be drawn at a time. While the eraser is on, pointer
//! presses remove the first wire under the pointer instead of starting a
//! new one.

use std::sync::Arc;

use log::{debug, warn};

use crate::board::{is_valid_connection, ConnectorId, ConnectorRegistry, WireId};
use crate::config::{BenchConfig, WiringConfig};
use crate::geometry::Point;

use super::rope::Rope;
use super::wire::{WireInstance, WireStatus};

/// The wire currently being drawn.
#[derive(Debug, Clone)]
pub struct PendingWire {
    /// Hole the wire started from
    pub start: ConnectorId,
    /// Latest pointer position
    pub live_end: Point,
    /// Rope from the start hole to `live_end`
    pub points: Vec<Point>,
}

/// Why a pending wire was dropped without being committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Released with no hole within the snap radius
    NoSnapTarget,
    /// Released on the hole it started from
    SelfConnection,
    /// Explicit cancel (secondary button)
    Cancelled,
    /// Eraser turned on mid-draw
    EraserEnabled,
}

/// Outcome of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new wire is being drawn from this hole
    Started(ConnectorId),
    /// The pending wire became a committed wire
    Committed { wire: WireId, status: WireStatus },
    /// The pending wire was dropped
    Discarded(DiscardReason),
    /// An eraser click removed this wire
    Erased(WireId),
    /// All wires were removed
    Cleared(usize),
    /// The operation did not apply in the current state
    Ignored,
}

/// Owner of the committed wires and the single pending wire.
#[derive(Debug)]
pub struct WireSession {
    registry: Arc<ConnectorRegistry>,
    rope: Rope,
    config: WiringConfig,
    pending: Option<PendingWire>,
    wires: Vec<WireInstance>,
    eraser_on: bool,
    next_wire_id: u64,
}

impl WireSession {
    /// Create an empty session over the given holes.
    pub fn new(registry: Arc<ConnectorRegistry>, config: &BenchConfig) -> Self {
        Self {
            registry,
            rope: Rope::new(&config.rope),
            config: config.wiring.clone(),
            pending: None,
            wires: Vec::new(),
            eraser_on: false,
            next_wire_id: 0,
        }
    }

    /// The holes this session wires between.
    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    /// Committed wires, oldest first.
    pub fn wires(&self) -> &[WireInstance] {
        &self.wires
    }

    /// The wire being drawn, if any.
    pub fn pending(&self) -> Option<&PendingWire> {
        self.pending.as_ref()
    }

    /// Rope of the wire being drawn, if any.
    pub fn pending_rope(&self) -> Option<&[Point]> {
        self.pending.as_ref().map(|p| p.points.as_slice())
    }

    /// Check whether a wire is being drawn.
    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }

    /// Check whether eraser mode is on.
    pub fn is_eraser_on(&self) -> bool {
        self.eraser_on
    }

    /// Check whether any committed wire is miswired.
    pub fn has_any_fault_wire(&self) -> bool {
        self.wires.iter().any(|w| w.status.is_fault())
    }

    /// Number of miswired wires.
    pub fn fault_count(&self) -> usize {
        self.wires.iter().filter(|w| w.status.is_fault()).count()
    }

    /// Route a primary pointer press.
    ///
    /// With the eraser on this erases at `position`; otherwise a press on a
    /// hole starts a wire.
    pub fn pointer_down(&mut self, position: Point, connector: Option<ConnectorId>) -> SessionEvent {
        if self.eraser_on {
            return self.erase_at(position);
        }
        match connector {
            Some(id) => self.start(id),
            None => SessionEvent::Ignored,
        }
    }

    /// Begin drawing a wire from `start`.
    ///
    /// Ignored while the eraser is on or another wire is being drawn.
    pub fn start(&mut self, start: ConnectorId) -> SessionEvent {
        if self.eraser_on || self.pending.is_some() {
            return SessionEvent::Ignored;
        }

        let Some(hole) = self.registry.get(start) else {
            warn!("Ignoring wire start from unknown hole {}", start);
            return SessionEvent::Ignored;
        };

        let position = hole.position;
        debug!("Wire started at '{}'", hole.name);
        self.pending = Some(PendingWire {
            start,
            live_end: position,
            points: self.rope.render(position, position),
        });
        SessionEvent::Started(start)
    }

    /// Follow the pointer with the pending wire.
    pub fn track(&mut self, pointer: Point) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(hole) = self.registry.get(pending.start) else {
            return;
        };

        pending.live_end = pointer;
        pending.points = self.rope.render(hole.position, pointer);
    }

    /// Release the pending wire at `pointer`, snapping to the nearest hole.
    pub fn resolve(&mut self, pointer: Point) -> SessionEvent {
        let Some(start) = self.pending.as_ref().map(|p| p.start) else {
            return SessionEvent::Ignored;
        };

        match self
            .registry
            .find_closest(pointer, self.config.snap_radius, Some(start))
        {
            Some(end) => self.commit(end),
            None => self.discard(DiscardReason::NoSnapTarget),
        }
    }

    /// Attach the pending wire to `end` and commit it.
    pub fn commit(&mut self, end: ConnectorId) -> SessionEvent {
        let Some(start) = self.pending.as_ref().map(|p| p.start) else {
            return SessionEvent::Ignored;
        };
        if end == start {
            return self.discard(DiscardReason::SelfConnection);
        }

        let (Some(a), Some(b)) = (self.registry.get(start), self.registry.get(end)) else {
            warn!("Discarding wire to unknown hole {}", end);
            return self.discard(DiscardReason::NoSnapTarget);
        };

        let status = if is_valid_connection(a, b, self.config.match_policy) {
            WireStatus::Normal
        } else {
            WireStatus::Fault
        };

        let id = WireId(self.next_wire_id);
        self.next_wire_id += 1;

        debug!("Wire {} committed '{}' -> '{}' ({})", id, a.name, b.name, status);
        let points = self.rope.render(a.position, b.position);
        self.wires.push(WireInstance {
            id,
            endpoints: [start, end],
            points,
            status,
        });
        self.pending = None;

        SessionEvent::Committed { wire: id, status }
    }

    /// Drop the pending wire on explicit request.
    pub fn cancel(&mut self) -> SessionEvent {
        self.discard(DiscardReason::Cancelled)
    }

    fn discard(&mut self, reason: DiscardReason) -> SessionEvent {
        if self.pending.take().is_none() {
            return SessionEvent::Ignored;
        }
        debug!("Wire discarded: {:?}", reason);
        SessionEvent::Discarded(reason)
    }

    /// Flip eraser mode, returning the new state.
    ///
    /// Turning the eraser on drops any wire being drawn.
    pub fn toggle_eraser(&mut self) -> bool {
        self.set_eraser(!self.eraser_on);
        self.eraser_on
    }

    /// Set eraser mode.
    pub fn set_eraser(&mut self, on: bool) {
        if on {
            self.discard(DiscardReason::EraserEnabled);
        }
        if self.eraser_on != on {
            debug!("Eraser {}", if on { "on" } else { "off" });
        }
        self.eraser_on = on;
    }

    /// Remove the first wire (oldest first) within the delete radius of
    /// `pointer`.
    pub fn erase_at(&mut self, pointer: Point) -> SessionEvent {
        let radius = self.config.delete_radius;
        let Some(index) = self.wires.iter().position(|w| w.is_hit(pointer, radius)) else {
            return SessionEvent::Ignored;
        };

        let wire = self.wires.remove(index);
        debug!("Wire {} erased", wire.id);
        SessionEvent::Erased(wire.id)
    }

    /// Remove every wire, including the one being drawn.
    pub fn clear_all(&mut self) -> SessionEvent {
        self.pending = None;
        let count = self.wires.len();
        self.wires.clear();
        debug!("Cleared {} wires", count);
        SessionEvent::Cleared(count)
    }
}
