//! Recursive-descent parser for the circuit DSL.

use std::fmt;

use log::warn;

use super::ast::{CircuitNode, ElementKind};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, ZspecError};

/// How the parser treats an unknown element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail with [`ZspecError::UnknownElement`] (the default)
    #[default]
    Strict,
    /// Skip the unknown element, record a [`Diagnostic`], and continue.
    /// This reproduces the legacy behavior of dropping the element from
    /// the impedance sum, which can yield a plausible-looking but
    /// physically wrong spectrum; opt in only for legacy inputs.
    Tolerant,
}

/// A recorded note about an element skipped in tolerant mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The unrecognized element name
    pub name: String,
    /// Line where it appeared
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: invalid element at line {}, skipped",
            self.name, self.line
        )
    }
}

/// Parser for circuit descriptions.
///
/// Parallel branches are handled by plain recursion on the `para`
/// production, so branch boundaries stay balanced under arbitrary
/// nesting and whitespace.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    mode: ParseMode,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer and mode.
    pub fn new(lexer: Lexer<'a>, mode: ParseMode) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line: 1,
                column: 1,
            },
            mode,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the entire circuit description into a tree.
    pub fn parse(&mut self) -> Result<CircuitNode> {
        self.advance()?;

        let node = self.parse_circuit()?;

        match self.current.kind {
            TokenKind::Eof => Ok(node),
            TokenKind::CloseParen | TokenKind::Comma => Err(ZspecError::syntax(
                self.current.line,
                format!(
                    "unexpected '{}' outside a parallel combination",
                    self.current.text
                ),
            )),
            _ => Err(ZspecError::syntax(
                self.current.line,
                format!("expected '+' before '{}'", self.current.text),
            )),
        }
    }

    /// Diagnostics recorded while parsing in tolerant mode.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the diagnostics recorded while parsing.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// circuit := term ('+' term)*
    ///
    /// A single term stays itself; two or more become a `Series` node.
    fn parse_circuit(&mut self) -> Result<CircuitNode> {
        let mut terms = Vec::new();

        loop {
            if let Some(term) = self.parse_term()? {
                terms.push(term);
            }
            if self.current.kind == TokenKind::Plus {
                self.advance()?;
            } else {
                break;
            }
        }

        CircuitNode::from_terms(terms).ok_or(ZspecError::EmptyCircuit)
    }

    /// term := element | parallel
    ///
    /// Returns `Ok(None)` when an unknown element was skipped in
    /// tolerant mode.
    fn parse_term(&mut self) -> Result<Option<CircuitNode>> {
        match self.current.kind {
            TokenKind::Identifier => {}
            // A missing term (empty input, dangling '+', empty branch)
            // is an empty sub-circuit
            TokenKind::Eof | TokenKind::CloseParen | TokenKind::Comma => {
                return Err(ZspecError::EmptyCircuit);
            }
            _ => {
                return Err(ZspecError::syntax(
                    self.current.line,
                    format!("expected an element name, found '{}'", self.current.text),
                ));
            }
        }

        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let kind = match name.as_str() {
            "R" => ElementKind::Resistor {
                resistance: self.parse_single_parameter(&name)?,
            },
            // Capacitance is written in microfarads
            "C" => ElementKind::capacitor_from_microfarads(self.parse_single_parameter(&name)?),
            "CPE" => {
                let (q, n) = self.parse_pair_parameters(&name)?;
                ElementKind::Cpe { q, n }
            }
            "Zw" => ElementKind::Warburg {
                coefficient: self.parse_single_parameter(&name)?,
            },
            "para" => return self.parse_parallel(line).map(Some),
            _ => {
                return match self.mode {
                    ParseMode::Strict => Err(ZspecError::UnknownElement { name, line }),
                    ParseMode::Tolerant => {
                        warn!("skipping unknown element '{}' at line {}", name, line);
                        self.skip_argument_list(&name)?;
                        self.diagnostics.push(Diagnostic { name, line });
                        Ok(None)
                    }
                };
            }
        };

        Ok(Some(CircuitNode::Element(kind)))
    }

    /// parallel := 'para' '(' circuit ',' circuit ')'
    fn parse_parallel(&mut self, line: usize) -> Result<CircuitNode> {
        if self.current.kind != TokenKind::OpenParen {
            return Err(ZspecError::unbalanced(line, "missing '(' after 'para'"));
        }
        self.advance()?;

        let branch_a = self.parse_circuit()?;

        if self.current.kind != TokenKind::Comma {
            return Err(ZspecError::unbalanced(
                self.current.line,
                "expected ',' separating the two parallel branches",
            ));
        }
        self.advance()?;

        let branch_b = self.parse_circuit()?;

        if self.current.kind != TokenKind::CloseParen {
            return Err(ZspecError::unbalanced(
                self.current.line,
                "missing ')' closing the parallel combination",
            ));
        }
        self.advance()?;

        Ok(CircuitNode::Parallel(Box::new(branch_a), Box::new(branch_b)))
    }

    fn parse_single_parameter(&mut self, element: &str) -> Result<f64> {
        self.expect_open_paren(element)?;
        let value = self.parse_number(element)?;
        self.expect_close_paren(element)?;
        Ok(value)
    }

    fn parse_pair_parameters(&mut self, element: &str) -> Result<(f64, f64)> {
        self.expect_open_paren(element)?;
        let first = self.parse_number(element)?;
        if self.current.kind != TokenKind::Comma {
            return Err(ZspecError::unterminated(
                element,
                self.current.line,
                "expected ',' between the two parameters",
            ));
        }
        self.advance()?;
        let second = self.parse_number(element)?;
        self.expect_close_paren(element)?;
        Ok((first, second))
    }

    fn expect_open_paren(&mut self, element: &str) -> Result<()> {
        if self.current.kind != TokenKind::OpenParen {
            return Err(ZspecError::unterminated(
                element,
                self.current.line,
                "missing '(' after element name",
            ));
        }
        self.advance()
    }

    fn expect_close_paren(&mut self, element: &str) -> Result<()> {
        if self.current.kind != TokenKind::CloseParen {
            return Err(ZspecError::unterminated(
                element,
                self.current.line,
                "missing ')' closing the parameter list",
            ));
        }
        self.advance()
    }

    fn parse_number(&mut self, element: &str) -> Result<f64> {
        // Allow an explicit '+' sign, which the lexer reads as the
        // series combinator
        if self.current.kind == TokenKind::Plus {
            self.advance()?;
        }

        match self.current.kind {
            TokenKind::Number => {
                let text = self.current.text.clone();
                let line = self.current.line;
                self.advance()?;
                text.parse::<f64>()
                    .map_err(|_| ZspecError::invalid_parameter(element, text, line))
            }
            TokenKind::Eof => Err(ZspecError::unterminated(
                element,
                self.current.line,
                "input ended inside the parameter list",
            )),
            _ => Err(ZspecError::invalid_parameter(
                element,
                self.current.text.clone(),
                self.current.line,
            )),
        }
    }

    /// Skip a balanced `( ... )` argument list after an unknown element
    /// name. An unknown name with no argument list just skips the name.
    fn skip_argument_list(&mut self, element: &str) -> Result<()> {
        if self.current.kind != TokenKind::OpenParen {
            return Ok(());
        }
        let open_line = self.current.line;
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance()?;
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(ZspecError::unterminated(
                        element,
                        open_line,
                        "input ended inside a skipped argument list",
                    ));
                }
                _ => {}
            }
            self.advance()?;
        }
    }
}
