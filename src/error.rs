//! Error types for the Zspec impedance simulator.
//!
//! This module provides a unified error type [`ZspecError`] that covers
//! all error conditions that can occur during circuit parsing and
//! impedance evaluation.

use thiserror::Error;

/// Result type alias using [`ZspecError`].
pub type Result<T> = std::result::Result<T, ZspecError>;

/// Unified error type for all Zspec operations.
#[derive(Error, Debug)]
pub enum ZspecError {
    // ============ Lexing / Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// The description (or a parallel branch inside it) contains no elements
    #[error("Empty circuit: the description contains no circuit elements")]
    EmptyCircuit,

    /// Element parameter list is missing its opening or closing parenthesis
    #[error("Unterminated element '{element}' at line {line}: {message}")]
    UnterminatedElement {
        element: String,
        line: usize,
        message: String,
    },

    /// Element parameter is not a valid number
    #[error("Invalid parameter for element '{element}' at line {line}: '{text}' is not a number")]
    InvalidParameter {
        element: String,
        text: String,
        line: usize,
    },

    /// A `para(...)` combination is missing its comma or closing parenthesis
    #[error("Unbalanced parallel combination at line {line}: {message}")]
    UnbalancedParallel { line: usize, message: String },

    /// Unknown element name where an element was expected (strict mode)
    #[error("Unknown element '{name}' at line {line}")]
    UnknownElement { name: String, line: usize },

    /// Token sequence that fits no production of the grammar
    #[error("Syntax error at line {line}: {message}")]
    SyntaxError { line: usize, message: String },

    // ============ Evaluation Errors ============
    /// Angular frequency must be finite and strictly positive
    #[error("Non-positive angular frequency: {omega} rad/s (must be finite and > 0)")]
    NonPositiveFrequency { omega: f64 },

    /// Parallel branches whose admittances cancel exactly have no finite impedance
    #[error("Singular parallel combination: branch admittances sum to zero")]
    SingularParallelCombination,

    // ============ I/O Errors ============
    /// Error reading a circuit description file
    #[cfg(feature = "cli")]
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing sweep results
    #[cfg(feature = "cli")]
    #[error("Failed to write output file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ZspecError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an unterminated element error
    pub fn unterminated(element: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::UnterminatedElement {
            element: element.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(element: impl Into<String>, text: impl Into<String>, line: usize) -> Self {
        Self::InvalidParameter {
            element: element.into(),
            text: text.into(),
            line,
        }
    }

    /// Create an unbalanced parallel error
    pub fn unbalanced(line: usize, message: impl Into<String>) -> Self {
        Self::UnbalancedParallel {
            line,
            message: message.into(),
        }
    }

    /// Create a generic syntax error
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            line,
            message: message.into(),
        }
    }
}
