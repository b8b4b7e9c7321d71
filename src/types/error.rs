//! # Type Error Definitions
//!
//! Every failure the checker can report. All errors are fail-fast: the
//! first rule violation aborts the current `check` call and carries its
//! constructing payload outward, so diagnostics can render any
//! type-valued field through the type printer.

use std::fmt;

use super::ty::Ty;

/// Type error raised during checking.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// A variable or type-variable name absent in every enclosing frame.
    NotInScope { name: String },

    /// An annotation does not denote a well-formed type: unknown
    /// constructor name or unbound type variable.
    NotAType { candidate: Ty },

    /// Structural equality failed where two types were required to match.
    TypeMismatch { expected: Ty, actual: Ty },

    /// The function position of an application is not an arrow type.
    NonFunctionApplied { ty: Ty },

    /// The term position of a type application is not universally
    /// quantified.
    NonGenericApplied { ty: Ty },

    /// A top-level declaration redeclares an existing name, or a type
    /// abstraction re-binds a type variable already in scope.
    DuplicateBinding { name: String },
}

impl TypeError {
    pub fn not_in_scope(name: impl Into<String>) -> Self {
        TypeError::NotInScope { name: name.into() }
    }

    pub fn not_a_type(candidate: Ty) -> Self {
        TypeError::NotAType { candidate }
    }

    pub fn type_mismatch(expected: Ty, actual: Ty) -> Self {
        TypeError::TypeMismatch { expected, actual }
    }

    pub fn non_function(ty: Ty) -> Self {
        TypeError::NonFunctionApplied { ty }
    }

    pub fn non_generic(ty: Ty) -> Self {
        TypeError::NonGenericApplied { ty }
    }

    pub fn duplicate_binding(name: impl Into<String>) -> Self {
        TypeError::DuplicateBinding { name: name.into() }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeError::NotInScope { name } => {
                write!(f, "variable '{}' not in scope", name)
            }
            TypeError::NotAType { candidate } => {
                write!(f, "'{}' does not denote a type", candidate.pretty())
            }
            TypeError::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "couldn't match expected type '{}' with '{}'",
                    expected.pretty(),
                    actual.pretty()
                )
            }
            TypeError::NonFunctionApplied { ty } => {
                write!(f, "tried to apply non-function type '{}'", ty.pretty())
            }
            TypeError::NonGenericApplied { ty } => {
                write!(f, "tried to type-apply non-generic type '{}'", ty.pretty())
            }
            TypeError::DuplicateBinding { name } => {
                write!(f, "'{}' is already bound", name)
            }
        }
    }
}

impl std::error::Error for TypeError {}
