//! The lab bench: holes, wiring, knobs, power and meters behind one
//! event-driven surface.
//!
//! A front end feeds [`BenchEvent`]s into [`LabBench::handle`], calls
//! [`LabBench::tick`] once per frame and draws whatever
//! [`LabBench::frame`] returns.

mod build;

pub use build::{config_from_directives, registry_from_holes};

use std::sync::Arc;

use log::{debug, info};

use crate::banner::{Banner, BannerFrame};
use crate::board::{ConnectorId, ConnectorRegistry, WireId};
use crate::config::BenchConfig;
use crate::dsl::BenchAst;
use crate::error::Result;
use crate::geometry::Point;
use crate::physics::{CircuitSolver, KnobSelector, Reading};
use crate::wiring::{DiscardReason, SessionEvent, WireSession, WireStatus};

/// Input to the bench.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BenchEvent {
    /// Primary press, on a hole or in empty space
    PointerDown {
        position: Point,
        connector: Option<ConnectorId>,
    },
    PointerMove(Point),
    PointerUp(Point),
    /// Secondary press: drop the wire being drawn
    Cancel,
    ToggleEraser,
    ClearWires,
    TogglePower,
    KnobDrag {
        knob: KnobSelector,
        delta_x: f64,
    },
    /// Restart the notice banner
    ShowNotice,
}

/// A committed wire as the front end draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct WireView {
    pub id: WireId,
    pub endpoints: [ConnectorId; 2],
    pub points: Vec<Point>,
    pub status: WireStatus,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub pending_rope: Option<Vec<Point>>,
    pub wires: Vec<WireView>,
    pub voltage_text: String,
    pub current_text: String,
    /// Fault state at the last tick, matching the meter text
    pub has_fault: bool,
    pub eraser_on: bool,
    pub powered: bool,
    /// Sprite rotation of the coarse knob, in degrees
    pub coarse_rotation: f64,
    /// Sprite rotation of the fine knob, in degrees
    pub fine_rotation: f64,
    pub banner: Option<BannerFrame>,
}

/// An interactive lab bench.
#[derive(Debug)]
pub struct LabBench {
    config: BenchConfig,
    registry: Arc<ConnectorRegistry>,
    session: WireSession,
    solver: CircuitSolver,
    banner: Banner,
    banner_elapsed: Option<f32>,
    powered: bool,
    reading: Reading,
    fault_at_tick: bool,
}

impl LabBench {
    /// Create a bench over the given holes. Power starts off.
    pub fn new(config: BenchConfig, registry: ConnectorRegistry) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(registry);
        info!(
            "Bench ready: {} holes, snap radius {}, {:?} matching",
            registry.len(),
            config.wiring.snap_radius,
            config.wiring.match_policy
        );

        Ok(Self {
            session: WireSession::new(Arc::clone(&registry), &config),
            solver: CircuitSolver::new(&config.physics),
            banner: Banner::new(&config.banner),
            banner_elapsed: None,
            powered: false,
            reading: Reading::Blank,
            fault_at_tick: false,
            registry,
            config,
        })
    }

    /// Build a bench from a parsed description.
    pub fn from_ast(ast: &BenchAst) -> Result<Self> {
        let config = config_from_directives(&ast.directives)?;
        let registry = registry_from_holes(&ast.holes)?;
        Self::new(config, registry)
    }

    /// Parse a bench description and build it.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_ast(&crate::dsl::parse(source)?)
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    pub fn session(&self) -> &WireSession {
        &self.session
    }

    pub fn solver(&self) -> &CircuitSolver {
        &self.solver
    }

    /// Reading from the most recent tick.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Look up a hole id by name.
    pub fn connector_by_name(&self, name: &str) -> Result<ConnectorId> {
        self.registry.require(name)
    }

    /// Hole within the snap radius of `position`, closest first.
    pub fn connector_at(&self, position: Point) -> Option<ConnectorId> {
        self.registry
            .find_closest(position, self.config.wiring.snap_radius, None)
    }

    /// Apply one input event.
    ///
    /// Events that do not touch the wiring return [`SessionEvent::Ignored`].
    pub fn handle(&mut self, event: BenchEvent) -> SessionEvent {
        match event {
            BenchEvent::PointerDown {
                position,
                connector,
            } => self.session.pointer_down(position, connector),
            BenchEvent::PointerMove(position) => {
                self.session.track(position);
                SessionEvent::Ignored
            }
            BenchEvent::PointerUp(position) => self.session.resolve(position),
            BenchEvent::Cancel => self.session.cancel(),
            BenchEvent::ToggleEraser => {
                let was_drawing = self.session.is_drawing();
                if self.session.toggle_eraser() && was_drawing {
                    SessionEvent::Discarded(DiscardReason::EraserEnabled)
                } else {
                    SessionEvent::Ignored
                }
            }
            BenchEvent::ClearWires => self.session.clear_all(),
            BenchEvent::TogglePower => {
                self.toggle_power();
                SessionEvent::Ignored
            }
            BenchEvent::KnobDrag { knob, delta_x } => {
                self.solver.drag(knob, delta_x);
                SessionEvent::Ignored
            }
            BenchEvent::ShowNotice => {
                self.show_notice();
                SessionEvent::Ignored
            }
        }
    }

    /// Flip the power switch, returning the new state.
    pub fn toggle_power(&mut self) -> bool {
        self.powered = !self.powered;
        debug!("Power {}", if self.powered { "on" } else { "off" });
        self.powered
    }

    /// Show the notice banner from the start of its animation.
    pub fn show_notice(&mut self) {
        self.banner_elapsed = Some(0.0);
    }

    /// Advance the bench by `dt` seconds and re-evaluate the circuit.
    ///
    /// Negative or non-finite steps only re-evaluate.
    pub fn tick(&mut self, dt: f32) -> Reading {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let Some(elapsed) = self.banner_elapsed {
            let elapsed = elapsed + dt;
            self.banner_elapsed = self.banner.sample(elapsed).map(|_| elapsed);
        }

        self.fault_at_tick = self.session.has_any_fault_wire();
        self.reading = self.solver.solve(self.powered, self.fault_at_tick);
        self.reading
    }

    /// Snapshot of everything drawable.
    pub fn frame(&self) -> Frame {
        Frame {
            pending_rope: self.session.pending_rope().map(<[Point]>::to_vec),
            wires: self
                .session
                .wires()
                .iter()
                .map(|w| WireView {
                    id: w.id,
                    endpoints: w.endpoints,
                    points: w.points.clone(),
                    status: w.status,
                })
                .collect(),
            voltage_text: self.reading.voltage_text(),
            current_text: self.reading.current_text(),
            has_fault: self.fault_at_tick,
            eraser_on: self.session.is_eraser_on(),
            powered: self.powered,
            coarse_rotation: self.solver.knob(KnobSelector::Coarse).visual_rotation(),
            fine_rotation: self.solver.knob(KnobSelector::Fine).visual_rotation(),
            banner: self
                .banner_elapsed
                .and_then(|elapsed| self.banner.sample(elapsed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::physics::FAULT_TEXT;
    use approx::assert_relative_eq;

    const BENCH: &str = "\
.rope sag=0
.series 10
.diode threshold=0.6 r=0.5

HOLE psu    0   0 (own=PSU target=R_IN)
HOLE r_in   100 0 (own=R_IN target=PSU)
HOLE r_out  300 0 (own=R_OUT target=D_IN)
HOLE d_in   400 0 (own=D_IN target=R_OUT)
";

    fn bench() -> LabBench {
        LabBench::from_source(BENCH).unwrap()
    }

    fn wire(bench: &mut LabBench, from: &str, to: &str) -> SessionEvent {
        let start = bench.connector_by_name(from).unwrap();
        let end = bench.registry().get(bench.connector_by_name(to).unwrap()).unwrap().position;
        let position = bench.registry().get(start).unwrap().position;
        bench.handle(BenchEvent::PointerDown {
            position,
            connector: Some(start),
        });
        bench.handle(BenchEvent::PointerMove(end));
        bench.handle(BenchEvent::PointerUp(end))
    }

    #[test]
    fn test_starts_unpowered_and_blank() {
        let mut bench = bench();
        assert_eq!(bench.tick(0.016), Reading::Blank);
        let frame = bench.frame();
        assert!(!frame.powered);
        assert_eq!(frame.voltage_text, "");
        assert_eq!(frame.current_text, "");
        assert!(frame.wires.is_empty());
        assert!(frame.pending_rope.is_none());
    }

    #[test]
    fn test_valid_wiring_and_forward_bias() {
        let mut bench = bench();
        assert!(matches!(
            wire(&mut bench, "psu", "r_in"),
            SessionEvent::Committed {
                status: WireStatus::Normal,
                ..
            }
        ));
        assert!(matches!(
            wire(&mut bench, "r_out", "d_in"),
            SessionEvent::Committed {
                status: WireStatus::Normal,
                ..
            }
        ));

        // 2.6 V from the coarse knob: 93.6 degrees at 2 degrees per unit.
        bench.handle(BenchEvent::KnobDrag {
            knob: KnobSelector::Coarse,
            delta_x: 46.8,
        });
        bench.handle(BenchEvent::TogglePower);
        let reading = bench.tick(0.016);

        assert_relative_eq!(reading.current_milliamps().unwrap(), 190.476, epsilon = 1e-2);
        let frame = bench.frame();
        assert_eq!(frame.voltage_text, "0.70");
        assert_eq!(frame.current_text, "190.48");
        assert_relative_eq!(frame.coarse_rotation, -93.6, epsilon = 1e-9);
        assert_eq!(frame.wires.len(), 2);
    }

    #[test]
    fn test_fault_wire_shows_error_until_erased() {
        let mut bench = bench();
        assert!(matches!(
            wire(&mut bench, "psu", "d_in"),
            SessionEvent::Committed {
                status: WireStatus::Fault,
                ..
            }
        ));

        bench.handle(BenchEvent::TogglePower);
        assert_eq!(bench.tick(0.016), Reading::Fault);
        let frame = bench.frame();
        assert!(frame.has_fault);
        assert_eq!(frame.voltage_text, FAULT_TEXT);
        assert_eq!(frame.current_text, FAULT_TEXT);

        assert_eq!(bench.handle(BenchEvent::ClearWires), SessionEvent::Cleared(1));
        assert!(matches!(bench.tick(0.016), Reading::Measured(_)));
    }

    #[test]
    fn test_eraser_removes_wire_under_pointer() {
        let mut bench = bench();
        wire(&mut bench, "psu", "r_in");
        wire(&mut bench, "r_out", "d_in");

        // The psu-r_in rope bottoms out about 5 units below its holes at
        // x = 50; this press is 10 units below that.
        bench.handle(BenchEvent::ToggleEraser);
        let event = bench.handle(BenchEvent::PointerDown {
            position: Point::new(50.0, -15.0),
            connector: None,
        });

        assert_eq!(event, SessionEvent::Erased(WireId(0)));
        let frame = bench.frame();
        assert!(frame.eraser_on);
        assert_eq!(frame.wires.len(), 1);
        assert_eq!(frame.wires[0].id, WireId(1));
    }

    #[test]
    fn test_eraser_toggle_drops_pending_wire() {
        let mut bench = bench();
        let psu = bench.connector_by_name("psu").unwrap();
        bench.handle(BenchEvent::PointerDown {
            position: Point::ZERO,
            connector: Some(psu),
        });
        assert!(bench.frame().pending_rope.is_some());

        assert_eq!(
            bench.handle(BenchEvent::ToggleEraser),
            SessionEvent::Discarded(DiscardReason::EraserEnabled)
        );
        assert!(bench.frame().pending_rope.is_none());
        assert_eq!(bench.handle(BenchEvent::ToggleEraser), SessionEvent::Ignored);
    }

    #[test]
    fn test_cancel_and_release_in_empty_space() {
        let mut bench = bench();
        let psu = bench.connector_by_name("psu").unwrap();
        let down = BenchEvent::PointerDown {
            position: Point::ZERO,
            connector: Some(psu),
        };

        bench.handle(down);
        assert_eq!(
            bench.handle(BenchEvent::Cancel),
            SessionEvent::Discarded(DiscardReason::Cancelled)
        );

        bench.handle(down);
        assert_eq!(
            bench.handle(BenchEvent::PointerUp(Point::new(200.0, 200.0))),
            SessionEvent::Discarded(DiscardReason::NoSnapTarget)
        );
        assert!(bench.frame().wires.is_empty());
    }

    #[test]
    fn test_notice_banner_runs_once() {
        let mut bench = bench();
        assert!(bench.frame().banner.is_none());

        bench.handle(BenchEvent::ShowNotice);
        let frame = bench.frame().banner.unwrap();
        assert_eq!(frame.opacity, 1.0);

        bench.tick(0.5);
        let frame = bench.frame().banner.unwrap();
        assert_relative_eq!(frame.offset_y, 50.0);
        assert_relative_eq!(frame.opacity, 0.5);

        bench.tick(0.6);
        assert!(bench.frame().banner.is_none());
    }

    #[test]
    fn test_fault_flag_follows_tick() {
        let mut bench = bench();
        wire(&mut bench, "psu", "d_in");
        bench.handle(BenchEvent::TogglePower);
        assert!(!bench.frame().has_fault);

        bench.tick(0.016);
        assert!(bench.frame().has_fault);

        bench.handle(BenchEvent::ClearWires);
        let frame = bench.frame();
        assert!(frame.has_fault);
        assert_eq!(frame.voltage_text, FAULT_TEXT);

        bench.tick(0.016);
        let frame = bench.frame();
        assert!(!frame.has_fault);
        assert_eq!(frame.voltage_text, "0.00");
    }

    #[test]
    fn test_connector_at_uses_snap_radius() {
        let bench = bench();
        let r_in = bench.connector_by_name("r_in").unwrap();
        assert_eq!(bench.connector_at(Point::new(110.0, 12.0)), Some(r_in));
        assert_eq!(bench.connector_at(Point::new(160.0, 0.0)), None);
    }

    #[test]
    fn test_unknown_connector_name() {
        let bench = bench();
        assert!(matches!(
            bench.connector_by_name("ground"),
            Err(BenchError::ConnectorNotFound { .. })
        ));
    }

    #[test]
    fn test_oversized_rope_rejected_before_drawing() {
        let err = LabBench::from_source(".rope resolution=1e19\nHOLE a 0 0\nHOLE b 10 0\n").unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = LabBench::from_source(".rope resolution=1\nHOLE a 0 0\n").unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));
    }
}
