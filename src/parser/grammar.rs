//! The grammar rules, one function per precedence level.
//!
//! Precedence, loosest first: `||`, `&&`, comparisons (`==`, `>`,
//! `<`), additive, multiplicative, prefix (`!`, `-`), application
//! (juxtaposition and `[T]`), atoms (`fix` binds a single atom).
//! `if`, lambdas and `let ... in` sit above the operator levels and
//! extend as far right as possible.

use crate::ast::{BinOpKind, Expr, UnOpKind};
use crate::lexer::TokenKind;
use crate::types::Ty;

use super::{ParseError, ParseState};

pub(super) fn entry(state: &mut ParseState) -> Result<Expr, ParseError> {
    if state.peek_kind() == Some(TokenKind::Let) {
        state.next();
        let name = state.expect_ident()?;
        state.expect(TokenKind::Equals)?;
        let bound = expression(state)?;
        if state.eat(TokenKind::In) {
            let body = expression(state)?;
            return Ok(Expr::let_in(name, bound, body));
        }
        // Top-level declaration.
        return Ok(Expr::let_decl(name, bound));
    }
    expression(state)
}

pub(super) fn expression(state: &mut ParseState) -> Result<Expr, ParseError> {
    match state.peek_kind() {
        Some(TokenKind::If) => conditional(state),
        Some(TokenKind::Backslash) => lambda(state),
        Some(TokenKind::BigLambda) => type_lambda(state),
        Some(TokenKind::Let) => let_in(state),
        _ => or_expr(state),
    }
}

fn conditional(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.expect(TokenKind::If)?;
    let cond = expression(state)?;
    state.expect(TokenKind::Then)?;
    let then = expression(state)?;
    state.expect(TokenKind::Else)?;
    let otherwise = expression(state)?;
    Ok(Expr::cond(cond, then, otherwise))
}

fn lambda(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.expect(TokenKind::Backslash)?;
    let param = state.expect_ident()?;
    state.expect(TokenKind::Colon)?;
    let annotation = type_expr(state)?;
    state.expect(TokenKind::Dot)?;
    let body = expression(state)?;
    Ok(Expr::lam(param, annotation, body))
}

fn type_lambda(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.expect(TokenKind::BigLambda)?;
    let param = state.expect_ident()?;
    state.expect(TokenKind::Dot)?;
    let body = expression(state)?;
    Ok(Expr::tlam(param, body))
}

fn let_in(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.expect(TokenKind::Let)?;
    let name = state.expect_ident()?;
    state.expect(TokenKind::Equals)?;
    let bound = expression(state)?;
    state.expect(TokenKind::In)?;
    let body = expression(state)?;
    Ok(Expr::let_in(name, bound, body))
}

fn or_expr(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut left = and_expr(state)?;
    while state.eat(TokenKind::OrOr) {
        let right = and_expr(state)?;
        left = Expr::binop(BinOpKind::Or, left, right);
    }
    Ok(left)
}

fn and_expr(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut left = comparison(state)?;
    while state.eat(TokenKind::AndAnd) {
        let right = comparison(state)?;
        left = Expr::binop(BinOpKind::And, left, right);
    }
    Ok(left)
}

fn comparison(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut left = additive(state)?;
    loop {
        let op = match state.peek_kind() {
            Some(TokenKind::EqEq) => BinOpKind::Eq,
            Some(TokenKind::Gt) => BinOpKind::Gt,
            Some(TokenKind::Lt) => BinOpKind::Lt,
            _ => break,
        };
        state.next();
        let right = additive(state)?;
        left = Expr::binop(op, left, right);
    }
    Ok(left)
}

fn additive(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut left = multiplicative(state)?;
    loop {
        let op = match state.peek_kind() {
            Some(TokenKind::Plus) => BinOpKind::Add,
            Some(TokenKind::Minus) => BinOpKind::Sub,
            _ => break,
        };
        state.next();
        let right = multiplicative(state)?;
        left = Expr::binop(op, left, right);
    }
    Ok(left)
}

fn multiplicative(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut left = prefix(state)?;
    loop {
        let op = match state.peek_kind() {
            Some(TokenKind::Star) => BinOpKind::Mul,
            Some(TokenKind::Slash) => BinOpKind::Div,
            _ => break,
        };
        state.next();
        let right = prefix(state)?;
        left = Expr::binop(op, left, right);
    }
    Ok(left)
}

fn prefix(state: &mut ParseState) -> Result<Expr, ParseError> {
    match state.peek_kind() {
        Some(TokenKind::Bang) => {
            state.next();
            Ok(Expr::unop(UnOpKind::Not, prefix(state)?))
        }
        Some(TokenKind::Minus) => {
            state.next();
            Ok(Expr::unop(UnOpKind::Neg, prefix(state)?))
        }
        _ => application(state),
    }
}

/// Juxtaposition binds tightest: `f x y` is `App(App(f, x), y)` and
/// `f [T]` is a type application on the term built so far.
fn application(state: &mut ParseState) -> Result<Expr, ParseError> {
    let mut expr = atom(state)?;
    loop {
        match state.peek_kind() {
            Some(TokenKind::LBracket) => {
                state.next();
                let arg = type_expr(state)?;
                state.expect(TokenKind::RBracket)?;
                expr = Expr::tapp(expr, arg);
            }
            Some(kind) if starts_atom(kind) => {
                let arg = atom(state)?;
                expr = Expr::app(expr, arg);
            }
            _ => return Ok(expr),
        }
    }
}

fn starts_atom(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Unit
            | TokenKind::Ident
            | TokenKind::Fix
            | TokenKind::LParen
    )
}

fn atom(state: &mut ParseState) -> Result<Expr, ParseError> {
    let Some(token) = state.next() else {
        return Err(ParseError::eof("an expression"));
    };
    match token.kind {
        TokenKind::Number => {
            let value: f64 = token
                .text
                .parse()
                .unwrap_or_else(|_| unreachable!("lexer produced unparseable number"));
            Ok(Expr::num(value))
        }
        TokenKind::True => Ok(Expr::bool(true)),
        TokenKind::False => Ok(Expr::bool(false)),
        TokenKind::Unit => Ok(Expr::unit()),
        TokenKind::Ident => Ok(Expr::var(token.text)),
        // `fix` binds one atom, so `fix f x` is `(fix f) x`.
        TokenKind::Fix => Ok(Expr::fix(atom(state)?)),
        TokenKind::LParen => {
            let expr = expression(state)?;
            state.expect(TokenKind::RParen)?;
            Ok(expr)
        }
        _ => Err(ParseError::unexpected("an expression", &token)),
    }
}

/// Arrows are right-associative: `a -> b -> c` is `a -> (b -> c)`.
/// A leading `forall` quantifies the whole remainder.
pub(super) fn type_expr(state: &mut ParseState) -> Result<Ty, ParseError> {
    if let Some(token) = state.peek() {
        if token.kind == TokenKind::Ident && token.text == "forall" {
            state.next();
            let mut vars = vec![state.expect_ident()?];
            while state.peek_kind() == Some(TokenKind::Ident) {
                vars.push(state.expect_ident()?);
            }
            state.expect(TokenKind::Dot)?;
            let body = type_expr(state)?;
            return Ok(Ty::forall(vars, body));
        }
    }
    let domain = type_atom(state)?;
    if state.eat(TokenKind::Arrow) {
        let codomain = type_expr(state)?;
        return Ok(Ty::arrow(domain, codomain));
    }
    Ok(domain)
}

fn type_atom(state: &mut ParseState) -> Result<Ty, ParseError> {
    let Some(token) = state.next() else {
        return Err(ParseError::eof("a type"));
    };
    match token.kind {
        TokenKind::Unit => Ok(Ty::unit()),
        TokenKind::Ident => match Ty::primitive(&token.text) {
            Some(ty) => Ok(ty),
            // Anything that is not a primitive name is a type
            // variable; the checker decides whether it is in scope.
            None => Ok(Ty::var(token.text)),
        },
        TokenKind::LParen => {
            let ty = type_expr(state)?;
            state.expect(TokenKind::RParen)?;
            Ok(ty)
        }
        _ => Err(ParseError::unexpected("a type", &token)),
    }
}
