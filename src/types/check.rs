//! Syntax-directed type checking for System F.
//!
//! Terms are explicitly annotated, so no unification is needed: every
//! construct has exactly one rule and checking is a single structural
//! pass. The checker threads two separate environments (term bindings
//! and in-scope type variables). It never mutates an environment it was
//! handed.

use crate::ast::{BinOpKind, Expr, UnOpKind};

use super::env::{TyVarScope, TypeEnv};
use super::error::TypeError;
use super::subst::substitute;
use super::ty::Ty;

/// Fixed signature of a binary operator, curried: `a -> b -> c`.
/// `EQ` is the one polymorphic entry, `forall o. o -> o -> bool`.
fn binop_signature(op: BinOpKind) -> Ty {
    let number = Ty::number;
    let boolean = Ty::bool;
    match op {
        BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div => {
            Ty::arrow(number(), Ty::arrow(number(), number()))
        }
        BinOpKind::And | BinOpKind::Or => Ty::arrow(boolean(), Ty::arrow(boolean(), boolean())),
        BinOpKind::Gt | BinOpKind::Lt => Ty::arrow(number(), Ty::arrow(number(), boolean())),
        BinOpKind::Eq => Ty::forall(
            vec!["o"],
            Ty::arrow(Ty::var("o"), Ty::arrow(Ty::var("o"), boolean())),
        ),
    }
}

/// Fixed (domain, codomain) of a unary operator.
fn unop_signature(op: UnOpKind) -> (Ty, Ty) {
    match op {
        UnOpKind::Not => (Ty::bool(), Ty::bool()),
        UnOpKind::Neg => (Ty::number(), Ty::number()),
    }
}

/// The type checker for one session. Checking is stateless, so one
/// instance serves any number of independent entries.
#[derive(Debug, Default)]
pub struct Checker;

impl Checker {
    pub fn new() -> Self {
        Checker
    }

    /// Check `expr` under `env`, yielding its type (possibly
    /// quantified). Fails with the first rule violation encountered;
    /// never coerces.
    pub fn check(&self, expr: &Expr, env: &TypeEnv) -> Result<Ty, TypeError> {
        self.check_expr(expr, env, &TyVarScope::empty())
    }

    /// Convenience wrapper: check under an empty root environment and
    /// render the result through the type printer.
    pub fn prove(&self, expr: &Expr) -> Result<String, TypeError> {
        self.check(expr, &TypeEnv::empty()).map(|ty| ty.pretty())
    }

    fn check_expr(
        &self,
        expr: &Expr,
        env: &TypeEnv,
        tyvars: &TyVarScope,
    ) -> Result<Ty, TypeError> {
        match expr {
            Expr::Lit { ty, .. } => {
                Ty::primitive(ty).ok_or_else(|| TypeError::not_a_type(Ty::Con(ty.clone())))
            }

            Expr::Var(name) => env
                .lookup(name)
                .cloned()
                .ok_or_else(|| TypeError::not_in_scope(name.clone())),

            Expr::UnOp { op, operand } => {
                let (domain, codomain) = unop_signature(*op);
                let actual = self.check_expr(operand, env, tyvars)?;
                if actual != domain {
                    return Err(TypeError::type_mismatch(domain, actual));
                }
                Ok(codomain)
            }

            Expr::BinOp { op, left, right } => self.check_binop(*op, left, right, env, tyvars),

            Expr::Cond {
                cond,
                then,
                otherwise,
            } => {
                let cond_ty = self.check_expr(cond, env, tyvars)?;
                if cond_ty != Ty::bool() {
                    return Err(TypeError::type_mismatch(Ty::bool(), cond_ty));
                }
                let then_ty = self.check_expr(then, env, tyvars)?;
                let else_ty = self.check_expr(otherwise, env, tyvars)?;
                if then_ty != else_ty {
                    return Err(TypeError::type_mismatch(then_ty, else_ty));
                }
                Ok(then_ty)
            }

            Expr::Lam {
                param,
                annotation,
                body,
            } => {
                self.well_formed(annotation, tyvars)?;
                let body_env =
                    TypeEnv::child(env).extend(param.clone(), annotation.clone());
                let body_ty = self.check_expr(body, &body_env, tyvars)?;
                Ok(Ty::arrow(annotation.clone(), body_ty))
            }

            Expr::App { func, arg } => {
                let func_ty = self.check_expr(func, env, tyvars)?;
                let arg_ty = self.check_expr(arg, env, tyvars)?;
                match func_ty {
                    Ty::Arrow(domain, codomain) => {
                        if *domain == arg_ty {
                            Ok(*codomain)
                        } else {
                            Err(TypeError::type_mismatch(*domain, arg_ty))
                        }
                    }
                    other => Err(TypeError::non_function(other)),
                }
            }

            Expr::TLam { param, body } => {
                if tyvars.contains(param) {
                    return Err(TypeError::duplicate_binding(param.clone()));
                }
                let body_tyvars = tyvars.extend(param.clone());
                let body_ty = self.check_expr(body, env, &body_tyvars)?;
                // Nested type abstractions fold into one ordered
                // quantifier sequence.
                Ok(match body_ty {
                    Ty::Forall(mut vars, inner) => {
                        vars.insert(0, param.clone());
                        Ty::Forall(vars, inner)
                    }
                    mono => Ty::forall(vec![param.clone()], mono),
                })
            }

            Expr::TApp { term, arg } => {
                self.well_formed(arg, tyvars)?;
                let term_ty = self.check_expr(term, env, tyvars)?;
                match term_ty {
                    Ty::Forall(vars, body) => {
                        // Eliminates exactly the first bound variable;
                        // the rest stay quantified.
                        let (first, rest) = vars
                            .split_first()
                            .expect("forall variable sequences are never empty");
                        let instantiated = substitute(&body, first, arg);
                        Ok(Ty::forall(rest.to_vec(), instantiated))
                    }
                    other => Err(TypeError::non_generic(other)),
                }
            }

            Expr::Let { name, bound, body } => {
                let bound_ty = self.check_expr(bound, env, tyvars)?;
                match body {
                    Some(body) => {
                        // No generalization: the name is monomorphic in
                        // the body (it keeps whatever quantifiers the
                        // bound term already carries, nothing more).
                        let body_env =
                            TypeEnv::child(env).extend(name.clone(), bound_ty);
                        self.check_expr(body, &body_env, tyvars)
                    }
                    None => {
                        if env.lookup(name).is_some() {
                            return Err(TypeError::duplicate_binding(name.clone()));
                        }
                        Ok(bound_ty)
                    }
                }
            }

            Expr::Fix(operand) => {
                let operand_ty = self.check_expr(operand, env, tyvars)?;
                match operand_ty {
                    Ty::Arrow(domain, codomain) => {
                        if domain == codomain {
                            Ok(*domain)
                        } else {
                            Err(TypeError::type_mismatch(
                                Ty::arrow((*domain).clone(), (*domain).clone()),
                                Ty::arrow(*domain, *codomain),
                            ))
                        }
                    }
                    other => Err(TypeError::non_function(other)),
                }
            }
        }
    }

    fn check_binop(
        &self,
        op: BinOpKind,
        left: &Expr,
        right: &Expr,
        env: &TypeEnv,
        tyvars: &TyVarScope,
    ) -> Result<Ty, TypeError> {
        let left_ty = self.check_expr(left, env, tyvars)?;
        let right_ty = self.check_expr(right, env, tyvars)?;

        let signature = match binop_signature(op) {
            // The polymorphic equality scheme is instantiated at the
            // left operand's type. Its body contains no binders, so
            // direct substitution cannot capture.
            Ty::Forall(vars, body) => substitute(&body, &vars[0], &left_ty),
            mono => mono,
        };

        let (first, second, codomain) = match signature {
            Ty::Arrow(first, rest) => match *rest {
                Ty::Arrow(second, codomain) => (*first, *second, *codomain),
                _ => unreachable!("operator signatures are binary"),
            },
            _ => unreachable!("operator signatures are binary"),
        };

        if left_ty != first {
            return Err(TypeError::type_mismatch(first, left_ty));
        }
        if right_ty != second {
            return Err(TypeError::type_mismatch(second, right_ty));
        }
        Ok(codomain)
    }

    /// An annotation denotes a type iff every constructor name is a
    /// recognized primitive and every type variable is bound by an
    /// enclosing type abstraction.
    fn well_formed(&self, ty: &Ty, tyvars: &TyVarScope) -> Result<(), TypeError> {
        match ty {
            Ty::Con(name) => {
                if Ty::primitive(name).is_some() {
                    Ok(())
                } else {
                    Err(TypeError::not_a_type(ty.clone()))
                }
            }
            Ty::Var(name) => {
                if tyvars.contains(name) {
                    Ok(())
                } else {
                    Err(TypeError::not_a_type(ty.clone()))
                }
            }
            Ty::Arrow(domain, codomain) => {
                self.well_formed(domain, tyvars)?;
                self.well_formed(codomain, tyvars)
            }
            Ty::Forall(vars, body) => self.well_formed(body, &tyvars.extend_many(vars)),
        }
    }
}
