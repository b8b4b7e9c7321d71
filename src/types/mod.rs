//! The static side of the language: types, environments, substitution
//! and the checker itself.

mod check;
mod env;
mod error;
mod subst;
mod ty;

pub use check::Checker;
pub use env::{TyVarScope, TypeEnv};
pub use error::TypeError;
pub use subst::substitute;
pub use ty::Ty;
