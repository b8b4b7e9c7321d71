//! Recursive-descent parser from tokens to the term and type ASTs.

mod grammar;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::ast::Expr;
use crate::lexer::{Token, TokenKind};
use crate::types::Ty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },
    UnexpectedEof {
        expected: String,
    },
    TrailingInput {
        found: String,
        offset: usize,
    },
}

impl ParseError {
    fn unexpected(expected: impl Into<String>, token: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: token.kind.describe().to_string(),
            offset: token.offset,
        }
    }

    fn eof(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                offset,
            } => write!(f, "expected {expected} but found {found} at offset {offset}"),
            ParseError::UnexpectedEof { expected } => {
                write!(f, "expected {expected} but reached the end of input")
            }
            ParseError::TrailingInput { found, offset } => {
                write!(f, "unexpected {found} after a complete term at offset {offset}")
            }
        }
    }
}

impl Error for ParseError {}

/// Token cursor threaded through the grammar rules.
struct ParseState {
    tokens: Vec<Token>,
    position: usize,
}

impl ParseState {
    fn new(tokens: Vec<Token>) -> Self {
        ParseState {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.position += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(ParseError::unexpected(kind.describe(), &token)),
            None => Err(ParseError::eof(kind.describe())),
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        self.expect(TokenKind::Ident).map(|t| t.text)
    }

    fn is_done(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Parse one complete top-level entry: either an expression or a
/// `let` declaration (with or without an `in` body). Trailing tokens
/// are an error.
pub fn parse_entry(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    let mut state = ParseState::new(tokens);
    let expr = grammar::entry(&mut state)?;
    match state.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::TrailingInput {
            found: token.kind.describe().to_string(),
            offset: token.offset,
        }),
    }
}

/// Parse a standalone type, used by tests and diagnostics.
pub fn parse_type(tokens: Vec<Token>) -> Result<Ty, ParseError> {
    let mut state = ParseState::new(tokens);
    let ty = grammar::type_expr(&mut state)?;
    match state.peek() {
        None => Ok(ty),
        Some(token) => Err(ParseError::TrailingInput {
            found: token.kind.describe().to_string(),
            offset: token.offset,
        }),
    }
}
