//! Hand-rolled scanner for the surface syntax.
//!
//! Lambdas are written `\x: T. e`, type abstraction `/\a. e`, type
//! application `e [T]`. The only multi-character operators are `/\`,
//! `->`, `==`, `&&` and `||`, so one character of lookahead suffices.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Let,
    In,
    If,
    Then,
    Else,
    Fix,
    True,
    False,
    Unit,
    Ident,
    Number,
    Backslash,
    BigLambda,
    Arrow,
    Dot,
    Colon,
    Equals,
    EqEq,
    AndAnd,
    OrOr,
    Gt,
    Lt,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

impl TokenKind {
    /// Human-readable name used in parse diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Let => "'let'",
            TokenKind::In => "'in'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Fix => "'fix'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Unit => "'unit'",
            TokenKind::Ident => "an identifier",
            TokenKind::Number => "a number",
            TokenKind::Backslash => "'\\'",
            TokenKind::BigLambda => "'/\\'",
            TokenKind::Arrow => "'->'",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Equals => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Bang => "'!'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnexpectedCharacter { ch: char, offset: usize },
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LexError::UnexpectedCharacter { ch, offset } => {
                write!(f, "unexpected character '{ch}' at offset {offset}")
            }
        }
    }
}

impl Error for LexError {}

fn keyword(word: &str) -> Option<TokenKind> {
    match word {
        "let" => Some(TokenKind::Let),
        "in" => Some(TokenKind::In),
        "if" => Some(TokenKind::If),
        "then" => Some(TokenKind::Then),
        "else" => Some(TokenKind::Else),
        "fix" => Some(TokenKind::Fix),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "unit" => Some(TokenKind::Unit),
        _ => None,
    }
}

pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some((offset, ch)) = self.chars.next() {
            match ch {
                c if c.is_whitespace() => {}
                '(' => self.push(TokenKind::LParen, offset, "("),
                ')' => self.push(TokenKind::RParen, offset, ")"),
                '[' => self.push(TokenKind::LBracket, offset, "["),
                ']' => self.push(TokenKind::RBracket, offset, "]"),
                '.' => self.push(TokenKind::Dot, offset, "."),
                ':' => self.push(TokenKind::Colon, offset, ":"),
                '+' => self.push(TokenKind::Plus, offset, "+"),
                '*' => self.push(TokenKind::Star, offset, "*"),
                '>' => self.push(TokenKind::Gt, offset, ">"),
                '<' => self.push(TokenKind::Lt, offset, "<"),
                '!' => self.push(TokenKind::Bang, offset, "!"),
                '\\' => self.push(TokenKind::Backslash, offset, "\\"),
                '/' => {
                    if self.eat('\\') {
                        self.push(TokenKind::BigLambda, offset, "/\\");
                    } else {
                        self.push(TokenKind::Slash, offset, "/");
                    }
                }
                '-' => {
                    if self.eat('>') {
                        self.push(TokenKind::Arrow, offset, "->");
                    } else {
                        self.push(TokenKind::Minus, offset, "-");
                    }
                }
                '=' => {
                    if self.eat('=') {
                        self.push(TokenKind::EqEq, offset, "==");
                    } else {
                        self.push(TokenKind::Equals, offset, "=");
                    }
                }
                '&' => {
                    if self.eat('&') {
                        self.push(TokenKind::AndAnd, offset, "&&");
                    } else {
                        return Err(LexError::UnexpectedCharacter { ch, offset });
                    }
                }
                '|' => {
                    if self.eat('|') {
                        self.push(TokenKind::OrOr, offset, "||");
                    } else {
                        return Err(LexError::UnexpectedCharacter { ch, offset });
                    }
                }
                c if c.is_ascii_digit() => self.number(offset),
                c if c.is_ascii_alphabetic() => self.word(offset),
                _ => return Err(LexError::UnexpectedCharacter { ch, offset }),
            }
        }
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, offset: usize, text: &str) {
        self.tokens.push(Token {
            kind,
            text: text.to_string(),
            offset,
        });
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek().is_some_and(|(_, c)| *c == expected) {
            self.chars.next();
            return true;
        }
        false
    }

    /// Integer digits, then a fractional part only if the dot is
    /// directly followed by a digit (so `f 1.` stays a lambda-body
    /// dot, not a malformed number).
    fn number(&mut self, start: usize) {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_ascii_digit() {
                self.chars.next();
                end = i + 1;
            } else if c == '.' && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                self.chars.next();
                while let Some((i, c)) = self.chars.peek().copied() {
                    if c.is_ascii_digit() {
                        self.chars.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }
                break;
            } else {
                break;
            }
        }
        let text = &self.source[start..end];
        self.push(TokenKind::Number, start, text);
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn word(&mut self, start: usize) {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '\'' {
                self.chars.next();
                end = i + 1;
            } else {
                break;
            }
        }
        let text = &self.source[start..end];
        match keyword(text) {
            Some(kind) => self.push(kind, start, text),
            None => self.push(TokenKind::Ident, start, text),
        }
    }
}
