//! Lexer (tokenizer) for the circuit DSL.

use crate::error::{Result, ZspecError};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An element or combinator name (`R`, `C`, `CPE`, `Zw`, `para`, ...)
    Identifier,
    /// A decimal number, optionally negative, fractional, or in exponent form
    Number,
    /// Series combinator '+'
    Plus,
    /// Branch separator ','
    Comma,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// End of input
    Eof,
}

/// Lexer for tokenizing circuit descriptions.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    column: self.column,
                });
            }
        };

        let start_line = self.line;
        let start_column = self.column;

        let token = match ch {
            '+' => {
                self.advance();
                Token {
                    kind: TokenKind::Plus,
                    text: "+".to_string(),
                    line: start_line,
                    column: start_column,
                }
            }
            ',' => {
                self.advance();
                Token {
                    kind: TokenKind::Comma,
                    text: ",".to_string(),
                    line: start_line,
                    column: start_column,
                }
            }
            '(' => {
                self.advance();
                Token {
                    kind: TokenKind::OpenParen,
                    text: "(".to_string(),
                    line: start_line,
                    column: start_column,
                }
            }
            ')' => {
                self.advance();
                Token {
                    kind: TokenKind::CloseParen,
                    text: ")".to_string(),
                    line: start_line,
                    column: start_column,
                }
            }
            '-' | '.' | '0'..='9' => {
                let text = self.read_number();
                Token {
                    kind: TokenKind::Number,
                    text,
                    line: start_line,
                    column: start_column,
                }
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Token {
                    kind: TokenKind::Identifier,
                    text,
                    line: start_line,
                    column: start_column,
                }
            }
            _ => {
                return Err(ZspecError::lexer(
                    start_line,
                    start_column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.chars.next() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign ('+' is lexed as the series combinator; the parser
        // accepts it before a number where a parameter is expected)
        if let Some(&'-') = self.chars.peek() {
            text.push('-');
            self.advance();
        }

        // Integer part
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Decimal part
        if let Some(&'.') = self.chars.peek() {
            text.push('.');
            self.advance();
            while let Some(&ch) = self.chars.peek() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Exponent part
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                while let Some(&ch) = self.chars.peek() {
                    if ch.is_ascii_digit() {
                        text.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_lexer_element() {
        let mut lexer = Lexer::new("R(10)");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "R");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::OpenParen);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "10");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::CloseParen);

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_lexer_whitespace_insignificant() {
        assert_eq!(
            kinds("  para ( R( 10 ) ,\n C(1) ) "),
            kinds("para(R(10),C(1))")
        );
    }

    #[test]
    fn test_lexer_number_forms() {
        for text in ["-1.5", "0.33", "2e3", "1.2E-4", "50"] {
            let mut lexer = Lexer::new(text);
            let tok = lexer.next_token().unwrap();
            assert_eq!(tok.kind, TokenKind::Number);
            assert_eq!(tok.text, text);
        }
    }

    #[test]
    fn test_lexer_tracks_position() {
        let mut lexer = Lexer::new("R(10) +\n  CPE(1, 0.5)");
        while lexer.next_token().unwrap().text != "CPE" {}
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::OpenParen);
        assert_eq!(tok.line, 2);
        assert_eq!(tok.column, 6);
    }

    #[test]
    fn test_lexer_rejects_unexpected_character() {
        let mut lexer = Lexer::new("R(10) & C(1)");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        assert!(matches!(
            lexer.next_token(),
            Err(ZspecError::LexerError { .. })
        ));
    }
}
