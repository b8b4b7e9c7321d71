//! One interactive session: the ambient persistent environments of the
//! checker and the evaluator, kept consistent by committing a top-level
//! declaration to both only after the whole pipeline has succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::ast::Expr;
use crate::interpreter::{EvalEnv, Evaluator, RuntimeError, Strategy, Value};
use crate::lexer::{lex, LexError};
use crate::parser::{parse_entry, ParseError};
use crate::types::{Checker, TypeEnv, TypeError};

/// The printed outcome of one entry, rendered as `type: value`.
#[derive(Debug, PartialEq)]
pub struct Entry {
    pub ty: String,
    pub value: Value,
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.ty, self.value)
    }
}

#[derive(Debug, PartialEq)]
pub enum SessionError {
    Lex(LexError),
    Parse(ParseError),
    Type(TypeError),
    Runtime(RuntimeError),
}

impl From<LexError> for SessionError {
    fn from(err: LexError) -> Self {
        SessionError::Lex(err)
    }
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        SessionError::Parse(err)
    }
}

impl From<TypeError> for SessionError {
    fn from(err: TypeError) -> Self {
        SessionError::Type(err)
    }
}

impl From<RuntimeError> for SessionError {
    fn from(err: RuntimeError) -> Self {
        SessionError::Runtime(err)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SessionError::Lex(err) => write!(f, "{err}"),
            SessionError::Parse(err) => write!(f, "{err}"),
            SessionError::Type(err) => write!(f, "{err}"),
            SessionError::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {}

pub struct Session {
    checker: Checker,
    types: TypeEnv,
    values: EvalEnv,
    strategy: Strategy,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            checker: Checker::new(),
            types: TypeEnv::empty(),
            values: EvalEnv::root(),
            strategy: Strategy::default(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Takes effect for all subsequent entries. Bindings made under a
    /// previous strategy keep their old representation.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Lex, parse, check and evaluate one line of input.
    pub fn eval_line(&mut self, line: &str) -> Result<Entry, SessionError> {
        let tokens = lex(line)?;
        let expr = parse_entry(tokens)?;
        self.eval_expr(&expr)
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Entry, SessionError> {
        let ty = self.checker.check(expr, &self.types)?;
        let evaluator = Evaluator::new(self.strategy);

        let value = match expr {
            // A declaration persists in both ambient environments, and
            // in neither if checking or evaluation failed.
            Expr::Let {
                name,
                bound,
                body: None,
            } => {
                let value = evaluator.evaluate_declaration(name, bound, &self.values)?;
                self.types.define(name.clone(), ty.clone());
                value
            }
            _ => evaluator.evaluate(expr, &self.values)?,
        };

        Ok(Entry {
            ty: ty.pretty(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        session
            .eval_line(line)
            .unwrap_or_else(|e| panic!("'{line}' failed: {e}"))
            .to_string()
    }

    #[test]
    fn test_session_evaluates_expression() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "1 + 2 * 3"), "number: 7");
    }

    #[test]
    fn test_session_declaration_persists() {
        let mut session = Session::new();
        assert_eq!(
            run(&mut session, r"let id = \x: number. x"),
            "number -> number: <closure>"
        );
        assert_eq!(run(&mut session, "id 41 + 1"), "number: 42");
    }

    #[test]
    fn test_session_duplicate_declaration_is_rejected() {
        let mut session = Session::new();
        run(&mut session, "let x = 1");
        assert_eq!(
            session.eval_line("let x = 2"),
            Err(SessionError::Type(TypeError::duplicate_binding("x")))
        );
        // The original binding is untouched.
        assert_eq!(run(&mut session, "x"), "number: 1");
    }

    #[test]
    fn test_session_failed_declaration_commits_nothing() {
        let mut session = Session::new();
        assert!(session.eval_line("let y = z + 1").is_err());
        assert!(matches!(
            session.eval_line("y"),
            Err(SessionError::Type(TypeError::NotInScope { .. }))
        ));
    }

    #[test]
    fn test_session_type_error_does_not_kill_session() {
        let mut session = Session::new();
        assert!(session.eval_line("1 + true").is_err());
        assert_eq!(run(&mut session, "1 + 1"), "number: 2");
    }

    #[test]
    fn test_session_strategy_switch() {
        let mut session = Session::new();
        session.set_strategy("need".parse().unwrap());
        assert_eq!(session.strategy(), Strategy::Need);
        assert_eq!(run(&mut session, "let x = 2 + 2 in x * x"), "number: 16");
    }

    #[test]
    fn test_session_polymorphic_pipeline() {
        let mut session = Session::new();
        assert_eq!(
            run(&mut session, r"let id = /\a. \x: a. x"),
            "forall a. a -> a: <type closure>"
        );
        assert_eq!(run(&mut session, "id [number] 5"), "number: 5");
        assert_eq!(run(&mut session, "id [bool] true"), "bool: true");
    }

    #[test]
    fn test_session_reports_parse_errors() {
        let mut session = Session::new();
        assert!(matches!(
            session.eval_line(r"\x: number"),
            Err(SessionError::Parse(_))
        ));
        assert!(matches!(
            session.eval_line("1 @ 2"),
            Err(SessionError::Lex(_))
        ));
    }
}
