//! # Labbench Core
//!
//! The core of an interactive virtual lab bench for a diode experiment.
//!
//! This library provides:
//! - Connector holes with authored connection declarations
//! - Drawing, snapping and erasing of sagging rope wires
//! - Per-wire topology checking (a miswired connection is a fault)
//! - A closed-form diode circuit driven by a coarse and a fine knob
//! - A small description language for authoring benches
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`geometry`] - Points, distances and Bézier evaluation
//! - [`board`] - Connector holes, the hole registry and connection validation
//! - [`wiring`] - Rope rendering, committed wires and the drawing session
//! - [`physics`] - Knobs, the diode model and meter readings
//! - [`lab`] - The bench itself: event dispatch, ticking and frame output
//! - [`dsl`] - Parser for the bench description language
//! - [`script`] - Event script replay (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! labbench diode.bench --script session.txt
//! ```
//!
//! ### Library
//!
//! ```
//! use labbench_core::{lab::BenchEvent, LabBench};
//!
//! let mut bench = LabBench::from_source(
//!     "HOLE psu 0 0 (own=PSU target=R_IN)\nHOLE r_in 100 0 (own=R_IN target=PSU)\n",
//! )?;
//! let psu = bench.connector_by_name("psu")?;
//! bench.handle(BenchEvent::PointerDown { position: Default::default(), connector: Some(psu) });
//! bench.handle(BenchEvent::PointerUp(labbench_core::geometry::Point::new(100.0, 0.0)));
//! bench.handle(BenchEvent::TogglePower);
//! bench.tick(1.0 / 60.0);
//! assert_eq!(bench.frame().voltage_text, "0.00");
//! # Ok::<(), labbench_core::BenchError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmLabBench } from 'labbench_core';
//!
//! const bench = new WasmLabBench(benchDsl);
//! bench.pointer_down_on('psu');
//! bench.pointer_up(250, 300);
//! bench.tick(dt);
//! ```
//!
//! ## Circuit Evaluation
//!
//! Each tick the bench checks power and whether any committed wire is a
//! fault. Only with power on and no fault is the circuit solved:
//!
//! 1. Source voltage is the sum of both knobs' linear contributions
//! 2. At or below the diode threshold no current flows and the diode sees
//!    the full source voltage
//! 3. Above it, `I = (Vs - Vth) / (Rs + Rd)` and `Vd = Vth + I * Rd`

pub mod banner;
pub mod board;
pub mod config;
pub mod dsl;
pub mod error;
pub mod geometry;
pub mod lab;
pub mod physics;
pub mod wiring;

#[cfg(feature = "cli")]
pub mod script;

// Re-export main types for convenience
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use lab::LabBench;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLabBench;
