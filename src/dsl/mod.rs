//! Bench description language.
//!
//! A small line-oriented, SPICE-flavoured language for authoring a bench:
//! where the connector holes are, which counterparts each hole accepts, and
//! the configuration of ropes, snapping and the circuit.
//!
//! # Grammar Overview
//!
//! ```text
//! bench       = { line }
//! line        = comment | directive | hole | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' name { word | number | key '=' number }
//! hole        = ("HOLE" | "H" | "CONNECTOR") name x y [ decl [ decl ] ]
//! decl        = '(' { ("own" | "id" | "target") '=' id } ')'
//!
//! number      = ['-'|'+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Directives
//!
//! | Directive | Syntax |
//! |-----------|--------|
//! | `.rope` | `.rope resolution=<n> sag=<units>` |
//! | `.snap` | `.snap <radius>` |
//! | `.erase` | `.erase <radius>` |
//! | `.knob` | `.knob coarse\|fine max_angle=<deg> max_voltage=<V> offset=<deg> sensitivity=<deg/px>` |
//! | `.series` | `.series <ohms>` |
//! | `.diode` | `.diode threshold=<V> r=<ohms>` |
//! | `.policy` | `.policy strict\|permissive` |
//! | `.banner` | `.banner rise=<units> duration=<s>` |
//!
//! # Example
//!
//! ```text
//! # Diode forward characteristic
//! .snap 30
//! .diode threshold=0.7 r=0
//!
//! HOLE psu_pos   100 300 (own=PSU_POS target=R_IN)
//! HOLE r_in      250 300 (own=R_IN target=PSU_POS)
//! HOLE r_out     400 300 (own=R_OUT target=D_ANODE)
//! HOLE d_anode   550 300 (own=D_ANODE target=R_OUT)
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::{Parser, MAX_DECLARATIONS};

use crate::error::Result;

/// Parse a bench description string into an AST.
pub fn parse(input: &str) -> Result<BenchAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a bench description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<BenchAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::BenchError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
