//! The dynamic side of the language: values, runtime scopes and the
//! strategy-parameterized evaluator.

mod error;
mod eval;
mod scope;
mod value;

pub use error::RuntimeError;
pub use eval::{Evaluator, Strategy};
pub use scope::{Binding, EvalEnv, ThunkState};
pub use value::Value;
