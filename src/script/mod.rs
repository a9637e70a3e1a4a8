//! Event scripts for the CLI frontend.
//!
//! A script is plain text with one command per line. Commands feed events
//! into a [`LabBench`]; every `tick` advances the bench and writes one
//! status line.
//!
//! ```text
//! down psu          # press on a hole by name
//! move 60 -10
//! up 100 0
//! knob coarse 46.8
//! power
//! tick
//! ```

use std::io::{BufRead, Write};

use log::trace;

use crate::error::{BenchError, Result};
use crate::geometry::Point;
use crate::lab::{BenchEvent, LabBench};
use crate::physics::KnobSelector;

/// Default tick length in seconds (60 frames per second).
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// `down <hole>`
    DownOn(String),
    /// `down <x> <y>`
    DownAt(Point),
    /// `move <x> <y>`
    Move(Point),
    /// `up <x> <y>`
    Up(Point),
    Cancel,
    Eraser,
    Clear,
    Power,
    /// `knob coarse|fine <dx>`
    Knob(KnobSelector, f64),
    Notice,
    /// `tick [secs]`
    Tick(Option<f32>),
}

impl ScriptCommand {
    /// Parse one line. Blank lines and `#` comments give `None`.
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or("").trim();
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (command.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("down", [name]) => Self::DownOn(name.to_string()),
            ("down", [x, y]) => Self::DownAt(point(line_no, x, y)?),
            ("move", [x, y]) => Self::Move(point(line_no, x, y)?),
            ("up", [x, y]) => Self::Up(point(line_no, x, y)?),
            ("cancel", []) => Self::Cancel,
            ("eraser", []) => Self::Eraser,
            ("clear", []) => Self::Clear,
            ("power", []) => Self::Power,
            ("knob", [which, dx]) => {
                let selector = KnobSelector::from_str(which).ok_or_else(|| {
                    BenchError::script(line_no, format!("unknown knob '{}'", which))
                })?;
                Self::Knob(selector, number(line_no, dx)?)
            }
            ("notice", []) => Self::Notice,
            ("tick", []) => Self::Tick(None),
            ("tick", [dt]) => Self::Tick(Some(number(line_no, dt)? as f32)),
            (name, _) => {
                return Err(BenchError::script(
                    line_no,
                    format!("cannot parse '{}' ({} arguments)", name, args.len()),
                ));
            }
        };

        Ok(Some(cmd))
    }
}

fn number(line_no: usize, text: &str) -> Result<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| BenchError::script(line_no, format!("invalid number '{}'", text)))
}

fn point(line_no: usize, x: &str, y: &str) -> Result<Point> {
    Ok(Point::new(number(line_no, x)? as f32, number(line_no, y)? as f32))
}

/// Status line printed after each tick.
pub fn status_line(bench: &LabBench) -> String {
    let frame = bench.frame();
    let on_off = |on: bool| if on { "on" } else { "off" };
    format!(
        "V={} I={} wires={} faults={} power={} eraser={}",
        frame.voltage_text,
        frame.current_text,
        frame.wires.len(),
        bench.session().fault_count(),
        on_off(frame.powered),
        on_off(frame.eraser_on),
    )
}

/// Replay a script against a bench, writing status lines to `output`.
pub fn replay<R: BufRead, W: Write>(
    bench: &mut LabBench,
    input: R,
    mut output: W,
    dt: f32,
) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| BenchError::script(line_no, e.to_string()))?;

        let Some(command) = ScriptCommand::parse(line_no, &line)? else {
            continue;
        };

        let event = match command {
            ScriptCommand::DownOn(name) => {
                let id = bench
                    .connector_by_name(&name)
                    .map_err(|e| BenchError::script(line_no, e.to_string()))?;
                let position = bench
                    .registry()
                    .get(id)
                    .map(|c| c.position)
                    .unwrap_or_default();
                BenchEvent::PointerDown {
                    position,
                    connector: Some(id),
                }
            }
            ScriptCommand::DownAt(position) => {
                let connector = bench.connector_at(position);
                BenchEvent::PointerDown {
                    position,
                    connector,
                }
            }
            ScriptCommand::Move(p) => BenchEvent::PointerMove(p),
            ScriptCommand::Up(p) => BenchEvent::PointerUp(p),
            ScriptCommand::Cancel => BenchEvent::Cancel,
            ScriptCommand::Eraser => BenchEvent::ToggleEraser,
            ScriptCommand::Clear => BenchEvent::ClearWires,
            ScriptCommand::Power => BenchEvent::TogglePower,
            ScriptCommand::Knob(knob, delta_x) => BenchEvent::KnobDrag { knob, delta_x },
            ScriptCommand::Notice => BenchEvent::ShowNotice,
            ScriptCommand::Tick(step) => {
                bench.tick(step.unwrap_or(dt));
                writeln!(output, "{}", status_line(bench)).map_err(|e| BenchError::OutputError {
                    message: e.to_string(),
                })?;
                continue;
            }
        };

        let outcome = bench.handle(event);
        trace!("line {}: {:?} -> {:?}", line_no, event, outcome);
    }

    output.flush().map_err(|e| BenchError::OutputError {
        message: e.to_string(),
    })
}
