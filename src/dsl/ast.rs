//! Abstract Syntax Tree types for the bench description language.

use std::collections::HashMap;

/// Complete AST of a parsed bench description.
#[derive(Debug, Clone, Default)]
pub struct BenchAst {
    /// Connector holes in declaration order
    pub holes: Vec<HoleDef>,
    /// Configuration directives in source order
    pub directives: Vec<DirectiveDef>,
}

impl BenchAst {
    /// Create a new empty bench AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A connector hole definition.
#[derive(Debug, Clone)]
pub struct HoleDef {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// At most two declarations
    pub declarations: Vec<DeclarationDef>,
    /// Source line number for error reporting
    pub line: usize,
}

/// One `(own=... target=...)` group on a hole line. Missing halves are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationDef {
    pub own: String,
    pub target: String,
}

/// A configuration directive.
#[derive(Debug, Clone)]
pub struct DirectiveDef {
    pub kind: DirectiveKind,
    /// Bare words after the directive name (`.knob coarse`)
    pub args: Vec<String>,
    /// Bare number after the directive name (`.snap 30`)
    pub value: Option<f64>,
    /// `key=value` parameters, keys lower-cased
    pub params: HashMap<String, f64>,
    pub line: usize,
}

/// Directives supported by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `.rope resolution=<n> sag=<units>`
    Rope,
    /// `.snap <radius>`
    Snap,
    /// `.erase <radius>`
    Erase,
    /// `.knob coarse|fine max_angle= max_voltage= offset= sensitivity=`
    Knob,
    /// `.series <ohms>`
    Series,
    /// `.diode threshold=<volts> r=<ohms>`
    Diode,
    /// `.policy strict|permissive`
    Policy,
    /// `.banner rise=<units> duration=<seconds>`
    Banner,
}

impl DirectiveKind {
    /// Parse a directive name, with or without the leading '.'.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "rope" => Some(Self::Rope),
            "snap" => Some(Self::Snap),
            "erase" | "eraser" => Some(Self::Erase),
            "knob" => Some(Self::Knob),
            "series" => Some(Self::Series),
            "diode" => Some(Self::Diode),
            "policy" => Some(Self::Policy),
            "banner" => Some(Self::Banner),
            _ => None,
        }
    }

    /// Directive name as written in the source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rope => ".rope",
            Self::Snap => ".snap",
            Self::Erase => ".erase",
            Self::Knob => ".knob",
            Self::Series => ".series",
            Self::Diode => ".diode",
            Self::Policy => ".policy",
            Self::Banner => ".banner",
        }
    }
}
