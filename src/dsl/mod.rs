//! DSL (Domain Specific Language) parser for equivalent-circuit
//! descriptions.
//!
//! A circuit is written as elements combined in series with `+` and in
//! parallel with `para(...)`. The whole description is one expression;
//! whitespace is insignificant between tokens.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit  = term { '+' term }
//! term     = element | parallel
//! element  = 'R' '(' number ')'
//!          | 'C' '(' number ')'
//!          | 'CPE' '(' number ',' number ')'
//!          | 'Zw' '(' number ')'
//! parallel = 'para' '(' circuit ',' circuit ')'
//!
//! number   = ['-' | '+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! ```
//!
//! # Elements
//!
//! | Symbol | Description | Parameters |
//! |--------|-------------|------------|
//! | R | Resistor | resistance in Ω |
//! | C | Capacitor | capacitance in µF |
//! | CPE | Constant phase element | Q, n |
//! | Zw | Warburg element | Warburg coefficient in Ω·s^(-1/2) |
//!
//! # Example
//!
//! `R(10) + para(R(100) + Zw(50), C(1))` is a Randles cell: a 10 Ω
//! electrolyte resistance in series with a 1 µF double-layer capacitance
//! in parallel with a 100 Ω charge-transfer resistance and a Warburg
//! element.
//!
//! # Unknown elements
//!
//! [`parse`] rejects unknown element names. [`parse_tolerant`] skips
//! them instead, recording a [`Diagnostic`] per skipped element; the
//! resulting spectrum omits their contribution, so prefer strict mode
//! unless compatibility with legacy inputs is required.

mod ast;
mod lexer;
mod parser;

pub use ast::{CircuitNode, ElementKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Diagnostic, ParseMode, Parser};

use crate::error::Result;

/// Parse a circuit description into a tree, rejecting unknown elements.
pub fn parse(input: &str) -> Result<CircuitNode> {
    let mut parser = Parser::new(Lexer::new(input), ParseMode::Strict);
    parser.parse()
}

/// Parse a circuit description, skipping unknown elements and returning
/// the diagnostics recorded for them.
pub fn parse_tolerant(input: &str) -> Result<(CircuitNode, Vec<Diagnostic>)> {
    let mut parser = Parser::new(Lexer::new(input), ParseMode::Tolerant);
    let node = parser.parse()?;
    Ok((node, parser.take_diagnostics()))
}

/// Parse a circuit description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitNode> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::ZspecError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(content.trim())
}
