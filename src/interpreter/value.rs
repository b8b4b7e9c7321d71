use std::fmt::{Display, Formatter, Result};

use crate::ast::Expr;

use super::scope::EvalEnv;

/// A fully evaluated result.
///
/// Closures capture their defining environment; type closures are the
/// runtime residue of type abstraction and merely defer their body,
/// since types are erased before evaluation.
#[derive(Debug, Clone)]
pub enum Value {
    Num(f64),
    Bool(bool),
    Unit,
    Closure {
        param: String,
        body: Expr,
        env: EvalEnv,
    },
    TypeClosure {
        param: String,
        body: Expr,
        env: EvalEnv,
    },
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            // Closures compare by identity only, which we do not track,
            // so two closures are never equal.
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::Num(n) => {
                // The cast saturates outside i64 range, so integral
                // values that large keep the plain float rendering.
                // `i64::MAX as f64` rounds up to 2^63, hence the strict
                // upper bound.
                if n.fract() == 0.0
                    && n.is_finite()
                    && *n >= i64::MIN as f64
                    && *n < i64::MAX as f64
                {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Bool(b) => write!(f, "{b}"),
            Value::Unit => write!(f, "unit"),
            Value::Closure { .. } => write!(f, "<closure>"),
            Value::TypeClosure { .. } => write!(f, "<type closure>"),
        }
    }
}
