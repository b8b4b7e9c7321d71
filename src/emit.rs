//! Renders an already-checked term as JavaScript source text.
//!
//! Types are erased entirely, so type abstraction and application
//! vanish. Every application and operator is parenthesized, trading
//! readability for not having to reason about host precedence. The
//! output is pure text; no files are written here.

use crate::ast::{BinOpKind, Constant, Expr};
use crate::types::{Checker, TypeEnv, TypeError};

/// Type-check `expr` in `env`, then render it as JavaScript. Emitting
/// an ill-typed term is refused rather than producing text that the
/// host would reject or misinterpret.
pub fn transpile_in(expr: &Expr, env: &TypeEnv) -> Result<String, TypeError> {
    Checker::new().check(expr, env)?;
    Ok(emit(expr))
}

/// Check under an empty environment and render.
pub fn transpile(expr: &Expr) -> Result<String, TypeError> {
    transpile_in(expr, &TypeEnv::empty())
}

fn emit(expr: &Expr) -> String {
    match expr {
        Expr::Var(name) => name.clone(),

        Expr::Lit { value, .. } => match value {
            Constant::Num(n) => n.to_string(),
            Constant::Bool(b) => b.to_string(),
            Constant::Unit => "undefined".to_string(),
        },

        Expr::Lam { param, body, .. } => format!("({param}) => {}", emit(body)),

        Expr::App { func, arg } => format!("(({})({}))", emit(func), emit(arg)),

        // Type-level constructs leave no trace in the output.
        Expr::TLam { body, .. } => emit(body),
        Expr::TApp { term, .. } => emit(term),

        Expr::Cond {
            cond,
            then,
            otherwise,
        } => format!(
            "(({}) ? ({}) : ({}))",
            emit(cond),
            emit(then),
            emit(otherwise)
        ),

        Expr::Let { name, bound, body } => match body {
            // A scoped let is an immediately-applied arrow function.
            Some(body) => format!("((({name}) => {})({}))", emit(body), emit(bound)),
            None => format!("const {name} = {};", emit(bound)),
        },

        Expr::BinOp { op, left, right } => {
            let symbol = match op {
                BinOpKind::Eq => "===",
                other => other.symbol(),
            };
            format!("(({}) {symbol} ({}))", emit(left), emit(right))
        }

        Expr::UnOp { op, operand } => format!("({}({}))", op.symbol(), emit(operand)),

        Expr::Fix(operand) => format!(
            "((f => {{ const rec = x => ((f)(rec))(x); return rec; }})({}))",
            emit(operand)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ty;

    #[test]
    fn test_transpile_literal() {
        assert_eq!(transpile(&Expr::num(3.0)), Ok("3".to_string()));
        assert_eq!(transpile(&Expr::bool(true)), Ok("true".to_string()));
        assert_eq!(transpile(&Expr::unit()), Ok("undefined".to_string()));
    }

    #[test]
    fn test_transpile_lambda_and_application() {
        let expr = Expr::app(
            Expr::lam("x", Ty::number(), Expr::var("x")),
            Expr::num(5.0),
        );
        assert_eq!(transpile(&expr), Ok("(((x) => x)(5))".to_string()));
    }

    #[test]
    fn test_transpile_erases_types() {
        let expr = Expr::tapp(
            Expr::tlam("a", Expr::lam("x", Ty::var("a"), Expr::var("x"))),
            Ty::number(),
        );
        assert_eq!(transpile(&expr), Ok("(x) => x".to_string()));
    }

    #[test]
    fn test_transpile_conditional_and_operators() {
        let expr = Expr::cond(
            Expr::binop(BinOpKind::Eq, Expr::num(1.0), Expr::num(2.0)),
            Expr::num(1.0),
            Expr::unop(crate::ast::UnOpKind::Neg, Expr::num(1.0)),
        );
        assert_eq!(
            transpile(&expr),
            Ok("((((1) === (2))) ? (1) : ((-(1))))".to_string())
        );
    }

    #[test]
    fn test_transpile_let_in_as_iife() {
        let expr = Expr::let_in(
            "x",
            Expr::num(1.0),
            Expr::binop(BinOpKind::Add, Expr::var("x"), Expr::var("x")),
        );
        assert_eq!(
            transpile(&expr),
            Ok("(((x) => ((x) + (x)))(1))".to_string())
        );
    }

    #[test]
    fn test_transpile_declaration_as_const() {
        let expr = Expr::let_decl("one", Expr::num(1.0));
        assert_eq!(transpile(&expr), Ok("const one = 1;".to_string()));
    }

    #[test]
    fn test_transpile_refuses_ill_typed_term() {
        let expr = Expr::app(Expr::num(1.0), Expr::num(2.0));
        assert_eq!(
            transpile(&expr),
            Err(TypeError::non_function(Ty::number()))
        );
    }

    #[test]
    fn test_transpile_uses_ambient_bindings() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Ty::number())]);
        assert_eq!(transpile_in(&Expr::var("x"), &env), Ok("x".to_string()));
    }
}
