//! WASM bindings for the lab bench.
//!
//! Exposes [`LabBench`] to JavaScript with plain numbers and strings;
//! polylines cross the boundary as flat `[x0, y0, x1, y1, ...]` arrays.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLabBench } from 'labbench_core';
//!
//! await init();
//!
//! const bench = new WasmLabBench(`
//!   HOLE psu  100 300 (own=PSU target=R_IN)
//!   HOLE r_in 250 300 (own=R_IN target=PSU)
//! `);
//!
//! // Presses within the snap radius of a hole start a wire there.
//! canvas.onpointerdown = (e) => bench.pointer_down(e.offsetX, -e.offsetY);
//! canvas.onpointermove = (e) => bench.pointer_move(e.offsetX, -e.offsetY);
//! canvas.onpointerup = (e) => bench.pointer_up(e.offsetX, -e.offsetY);
//!
//! function frame(dt) {
//!   bench.tick(dt);
//!   voltmeter.textContent = bench.voltage_text();
//!   drawRope(bench.pending_rope());
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::error::BenchError;
use crate::geometry::Point;
use crate::lab::{BenchEvent, LabBench};
use crate::physics::KnobSelector;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: BenchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten(points: &[Point]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// WASM-compatible lab bench.
#[wasm_bindgen]
pub struct WasmLabBench {
    bench: LabBench,
}

#[wasm_bindgen]
impl WasmLabBench {
    /// Create a bench from a bench description string.
    ///
    /// # Example
    /// ```javascript
    /// const bench = new WasmLabBench(benchDsl);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(bench_dsl: &str) -> Result<WasmLabBench, JsValue> {
        let bench = LabBench::from_source(bench_dsl).map_err(to_js)?;
        Ok(WasmLabBench { bench })
    }

    /// Primary press; lands on the closest hole within the snap radius.
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let position = Point::new(x, y);
        let connector = self.bench.connector_at(position);
        self.bench.handle(BenchEvent::PointerDown {
            position,
            connector,
        });
    }

    /// Primary press on a named hole.
    #[wasm_bindgen]
    pub fn pointer_down_on(&mut self, hole: &str) -> Result<(), JsValue> {
        let id = self.bench.connector_by_name(hole).map_err(to_js)?;
        let position = self
            .bench
            .registry()
            .get(id)
            .map(|c| c.position)
            .unwrap_or_default();
        self.bench.handle(BenchEvent::PointerDown {
            position,
            connector: Some(id),
        });
        Ok(())
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.bench.handle(BenchEvent::PointerMove(Point::new(x, y)));
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.bench.handle(BenchEvent::PointerUp(Point::new(x, y)));
    }

    /// Secondary press: drop the wire being drawn.
    #[wasm_bindgen]
    pub fn cancel(&mut self) {
        self.bench.handle(BenchEvent::Cancel);
    }

    #[wasm_bindgen]
    pub fn toggle_eraser(&mut self) {
        self.bench.handle(BenchEvent::ToggleEraser);
    }

    #[wasm_bindgen]
    pub fn clear_wires(&mut self) {
        self.bench.handle(BenchEvent::ClearWires);
    }

    #[wasm_bindgen]
    pub fn toggle_power(&mut self) {
        self.bench.handle(BenchEvent::TogglePower);
    }

    #[wasm_bindgen]
    pub fn show_notice(&mut self) {
        self.bench.handle(BenchEvent::ShowNotice);
    }

    /// Turn a knob ("coarse" or "fine") by a horizontal drag.
    #[wasm_bindgen]
    pub fn drag_knob(&mut self, knob: &str, delta_x: f64) -> Result<(), JsValue> {
        let knob = KnobSelector::from_str(knob).ok_or_else(|| {
            to_js(BenchError::WasmError {
                message: format!("unknown knob '{}'", knob),
            })
        })?;
        self.bench.handle(BenchEvent::KnobDrag { knob, delta_x });
        Ok(())
    }

    /// Advance by `dt` seconds and re-evaluate the circuit.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) {
        self.bench.tick(dt);
    }

    #[wasm_bindgen]
    pub fn voltage_text(&self) -> String {
        self.bench.reading().voltage_text()
    }

    #[wasm_bindgen]
    pub fn current_text(&self) -> String {
        self.bench.reading().current_text()
    }

    #[wasm_bindgen(getter)]
    pub fn powered(&self) -> bool {
        self.bench.is_powered()
    }

    #[wasm_bindgen(getter)]
    pub fn eraser_on(&self) -> bool {
        self.bench.session().is_eraser_on()
    }

    /// Rope of the wire being drawn, empty when idle.
    #[wasm_bindgen]
    pub fn pending_rope(&self) -> Vec<f32> {
        self.bench
            .session()
            .pending_rope()
            .map(flatten)
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn wire_count(&self) -> usize {
        self.bench.session().wires().len()
    }

    /// Rope of the committed wire at `index`, empty if out of range.
    #[wasm_bindgen]
    pub fn wire_points(&self, index: usize) -> Vec<f32> {
        self.bench
            .session()
            .wires()
            .get(index)
            .map(|w| flatten(&w.points))
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn wire_is_fault(&self, index: usize) -> bool {
        self.bench
            .session()
            .wires()
            .get(index)
            .is_some_and(|w| w.status.is_fault())
    }

    #[wasm_bindgen]
    pub fn has_fault_wire(&self) -> bool {
        self.bench.session().has_any_fault_wire()
    }

    /// Sprite rotation in degrees of a knob ("coarse" or "fine").
    #[wasm_bindgen]
    pub fn knob_rotation(&self, knob: &str) -> Option<f64> {
        KnobSelector::from_str(knob).map(|k| self.bench.solver().knob(k).visual_rotation())
    }

    /// Banner as `[offset_y, opacity]`, empty when hidden.
    #[wasm_bindgen]
    pub fn banner(&self) -> Vec<f32> {
        self.bench
            .frame()
            .banner
            .map(|b| vec![b.offset_y, b.opacity])
            .unwrap_or_default()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
