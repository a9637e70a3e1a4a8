//! Error types for the lab bench core.
//!
//! This module provides a unified error type [`BenchError`] that covers
//! every failure that can occur while reading a bench description,
//! validating configuration, and replaying event scripts.
//!
//! Domain outcomes of the wiring itself (a miswired connection, a wire
//! dropped in empty space, a wire looped back onto its own hole) are *not*
//! errors: they show up as [`crate::wiring::WireStatus::Fault`] or as a
//! discarded pending wire.

use thiserror::Error;

/// Result type alias using [`BenchError`].
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for all lab bench operations.
#[derive(Error, Debug)]
pub enum BenchError {
    // ============ Bench Description Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Directive name not recognised
    #[error("Unknown directive '{directive}' at line {line}")]
    UnknownDirective { directive: String, line: usize },

    /// Invalid directive parameter
    #[error("Invalid parameter '{param}' for '{directive}': {message}")]
    InvalidParameter {
        directive: String,
        param: String,
        message: String,
    },

    /// Malformed connector definition
    #[error("Invalid connector '{name}' at line {line}: {message}")]
    InvalidConnector {
        name: String,
        line: usize,
        message: String,
    },

    /// Two connectors share a name
    #[error("Duplicate connector name '{name}'")]
    DuplicateConnector { name: String },

    /// Connector referenced by name does not exist
    #[error("Connector '{name}' not found on the bench")]
    ConnectorNotFound { name: String },

    // ============ Configuration Errors ============
    /// Configuration invariant violated at construction time
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ I/O Errors ============
    /// Error reading a bench or script file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed event script line
    #[error("Script error at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    /// Error writing status output
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BenchError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid connector error
    pub fn invalid_connector(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidConnector {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        directive: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            directive: directive.into(),
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a script error
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::ScriptError {
            line,
            message: message.into(),
        }
    }
}
