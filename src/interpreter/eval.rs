//! Term reduction under the three evaluation strategies.
//!
//! Terms reaching this module have already been type checked, so the
//! evaluator performs no type tests: encountering an ill-shaped value
//! (a number in function position, a non-bool condition) is a checker
//! bug and panics rather than returning an error.

use std::cell::{Cell, RefCell};
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;

use crate::ast::{BinOpKind, Constant, Expr, UnOpKind};

use super::error::RuntimeError;
use super::scope::{Binding, EvalEnv, ThunkState};
use super::value::Value;

/// How arguments and let-bound terms are represented when bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Evaluate fully before binding.
    #[default]
    Value,
    /// Store the term and re-evaluate on every use.
    Name,
    /// Store a thunk, evaluate on first use, memoize.
    Need,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(Strategy::Value),
            "name" => Ok(Strategy::Name),
            "need" => Ok(Strategy::Need),
            other => Err(format!(
                "unknown evaluation mode '{other}' (expected value, name or need)"
            )),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Value => "value",
            Strategy::Name => "name",
            Strategy::Need => "need",
        };
        write!(f, "{name}")
    }
}

/// Recursion limit for one top-level `evaluate` call. Counted
/// explicitly so runaway recursion surfaces as a reportable error
/// instead of blowing the host stack. Each depth unit costs several
/// native frames (`eval`, `eval_fix`, `resolve`, thunk forcing), so
/// the limit must leave the default 2 MiB thread stack enough
/// headroom for the deepest such chain.
const MAX_DEPTH: usize = 256;

pub struct Evaluator {
    strategy: Strategy,
    /// Number of operator applications performed, observable so the
    /// sharing behavior of the strategies can be measured.
    ops: Cell<u64>,
}

impl Evaluator {
    pub fn new(strategy: Strategy) -> Self {
        Evaluator {
            strategy,
            ops: Cell::new(0),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn op_count(&self) -> u64 {
        self.ops.get()
    }

    /// Reduce a checked term to a value under this evaluator's
    /// strategy.
    pub fn evaluate(&self, expr: &Expr, env: &EvalEnv) -> Result<Value, RuntimeError> {
        self.eval(expr, env, 0)
    }

    /// Evaluate a top-level declaration and commit it to `env`.
    ///
    /// The binding is resolved to a value for display before being
    /// committed, so a declaration whose bound term fails leaves the
    /// ambient environment untouched.
    pub fn evaluate_declaration(
        &self,
        name: &str,
        bound: &Expr,
        env: &EvalEnv,
    ) -> Result<Value, RuntimeError> {
        let binding = self.bind_argument(bound, env, 0)?;
        let value = self.resolve(name, binding.clone(), 0)?;
        env.bind(name, binding);
        Ok(value)
    }

    fn eval(&self, expr: &Expr, env: &EvalEnv, depth: usize) -> Result<Value, RuntimeError> {
        if depth > MAX_DEPTH {
            return Err(RuntimeError::StackExhausted);
        }
        match expr {
            Expr::Lit { value, .. } => Ok(match value {
                Constant::Num(n) => Value::Num(*n),
                Constant::Bool(b) => Value::Bool(*b),
                Constant::Unit => Value::Unit,
            }),

            Expr::Var(name) => {
                let binding = env
                    .lookup(name)
                    .ok_or_else(|| RuntimeError::not_in_scope(name.clone()))?;
                self.resolve(name, binding, depth)
            }

            Expr::Lam { param, body, .. } => Ok(Value::Closure {
                param: param.clone(),
                body: (**body).clone(),
                env: env.clone(),
            }),

            Expr::App { func, arg } => {
                let func = self.eval(func, env, depth + 1)?;
                match func {
                    Value::Closure {
                        param,
                        body,
                        env: captured,
                    } => {
                        let binding = self.bind_argument(arg, env, depth)?;
                        let scope = captured.child();
                        scope.bind(param, binding);
                        self.eval(&body, &scope, depth + 1)
                    }
                    other => panic!("applied non-closure value {other}"),
                }
            }

            Expr::TLam { param, body } => Ok(Value::TypeClosure {
                param: param.clone(),
                body: (**body).clone(),
                env: env.clone(),
            }),

            // Types are erased: applying a type closure just runs its
            // deferred body.
            Expr::TApp { term, .. } => match self.eval(term, env, depth + 1)? {
                Value::TypeClosure {
                    body, env: captured, ..
                } => self.eval(&body, &captured, depth + 1),
                other => Ok(other),
            },

            Expr::Cond {
                cond,
                then,
                otherwise,
            } => match self.eval(cond, env, depth + 1)? {
                // Exactly one branch is evaluated; the other is never
                // touched.
                Value::Bool(true) => self.eval(then, env, depth + 1),
                Value::Bool(false) => self.eval(otherwise, env, depth + 1),
                other => panic!("condition reduced to non-bool value {other}"),
            },

            Expr::Let { name, bound, body } => match body {
                Some(body) => {
                    let binding = self.bind_argument(bound, env, depth)?;
                    let scope = env.child();
                    scope.bind(name.clone(), binding);
                    self.eval(body, &scope, depth + 1)
                }
                None => self.evaluate_declaration(name, bound, env),
            },

            Expr::BinOp { op, left, right } => {
                let left = self.eval(left, env, depth + 1)?;
                let right = self.eval(right, env, depth + 1)?;
                self.ops.set(self.ops.get() + 1);
                Ok(apply_binop(*op, &left, &right))
            }

            Expr::UnOp { op, operand } => {
                let operand = self.eval(operand, env, depth + 1)?;
                self.ops.set(self.ops.get() + 1);
                Ok(apply_unop(*op, &operand))
            }

            Expr::Fix(operand) => self.eval_fix(expr, operand, env, depth),
        }
    }

    /// Represent an argument (or let-bound term) per the active
    /// strategy. Only the eager strategy evaluates here; the others
    /// suspend.
    fn bind_argument(
        &self,
        arg: &Expr,
        env: &EvalEnv,
        depth: usize,
    ) -> Result<Binding, RuntimeError> {
        match self.strategy {
            Strategy::Value => Ok(Binding::Strict(self.eval(arg, env, depth + 1)?)),
            Strategy::Name => Ok(Binding::ByName {
                expr: Rc::new(arg.clone()),
                env: env.clone(),
            }),
            Strategy::Need => Ok(Binding::Thunk(Rc::new(RefCell::new(ThunkState::Pending {
                expr: Rc::new(arg.clone()),
                env: env.clone(),
            })))),
        }
    }

    /// Turn a stored binding back into a value. `name` is only used
    /// for error reporting.
    fn resolve(
        &self,
        name: &str,
        binding: Binding,
        depth: usize,
    ) -> Result<Value, RuntimeError> {
        match binding {
            Binding::Strict(value) => Ok(value),
            Binding::ByName { expr, env } => self.eval(&expr, &env, depth + 1),
            Binding::Thunk(cell) => self.force(name, &cell, depth),
        }
    }

    fn force(
        &self,
        name: &str,
        cell: &Rc<RefCell<ThunkState>>,
        depth: usize,
    ) -> Result<Value, RuntimeError> {
        let pending = {
            let mut state = cell.borrow_mut();
            match &*state {
                ThunkState::Done(value) => return Ok(value.clone()),
                ThunkState::Forcing => {
                    return Err(RuntimeError::cyclic_force(name.to_string()))
                }
                ThunkState::Pending { expr, env } => {
                    let pending = (Rc::clone(expr), env.clone());
                    *state = ThunkState::Forcing;
                    pending
                }
            }
        };

        let (expr, env) = pending;
        match self.eval(&expr, &env, depth + 1) {
            Ok(value) => {
                *cell.borrow_mut() = ThunkState::Done(value.clone());
                Ok(value)
            }
            Err(err) => {
                // Leave the thunk retryable rather than poisoned.
                *cell.borrow_mut() = ThunkState::Pending { expr, env };
                Err(err)
            }
        }
    }

    /// `fix f` unrolls `f` at its own fixed point. The recursive
    /// binding respects the active strategy's sharing semantics.
    fn eval_fix(
        &self,
        fix_node: &Expr,
        operand: &Expr,
        env: &EvalEnv,
        depth: usize,
    ) -> Result<Value, RuntimeError> {
        let (param, body, captured) = match self.eval(operand, env, depth + 1)? {
            Value::Closure { param, body, env } => (param, body, env),
            other => panic!("fix applied to non-closure value {other}"),
        };

        let scope = captured.child();
        match self.strategy {
            // A strict fixed point cannot bind its own result before
            // computing it, so under both of these strategies the
            // self-reference stays suspended and re-enters the fixed
            // point on each use.
            Strategy::Value | Strategy::Name => {
                scope.bind(
                    param,
                    Binding::ByName {
                        expr: Rc::new(fix_node.clone()),
                        env: env.clone(),
                    },
                );
                self.eval(&body, &scope, depth + 1)
            }
            // Tie the knot: the thunk's suspended body is evaluated in
            // the scope that contains the thunk itself.
            Strategy::Need => {
                let cell = Rc::new(RefCell::new(ThunkState::Pending {
                    expr: Rc::new(body),
                    env: scope.clone(),
                }));
                scope.bind(param.clone(), Binding::Thunk(Rc::clone(&cell)));
                self.force(&param, &cell, depth)
            }
        }
    }
}

fn apply_binop(op: BinOpKind, left: &Value, right: &Value) -> Value {
    match (op, left, right) {
        (BinOpKind::Add, Value::Num(a), Value::Num(b)) => Value::Num(a + b),
        (BinOpKind::Sub, Value::Num(a), Value::Num(b)) => Value::Num(a - b),
        (BinOpKind::Mul, Value::Num(a), Value::Num(b)) => Value::Num(a * b),
        (BinOpKind::Div, Value::Num(a), Value::Num(b)) => Value::Num(a / b),
        (BinOpKind::And, Value::Bool(a), Value::Bool(b)) => Value::Bool(*a && *b),
        (BinOpKind::Or, Value::Bool(a), Value::Bool(b)) => Value::Bool(*a || *b),
        (BinOpKind::Gt, Value::Num(a), Value::Num(b)) => Value::Bool(a > b),
        (BinOpKind::Lt, Value::Num(a), Value::Num(b)) => Value::Bool(a < b),
        (BinOpKind::Eq, a, b) => Value::Bool(a == b),
        (op, a, b) => panic!("operator {} applied to {a} and {b}", op.symbol()),
    }
}

fn apply_unop(op: UnOpKind, operand: &Value) -> Value {
    match (op, operand) {
        (UnOpKind::Not, Value::Bool(b)) => Value::Bool(!b),
        (UnOpKind::Neg, Value::Num(n)) => Value::Num(-n),
        (op, v) => panic!("operator {} applied to {v}", op.symbol()),
    }
}
