use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// Faults the evaluator can raise at runtime. Type errors are caught
/// statically, so this list is short: unbound names (only possible if
/// evaluation is run on unchecked terms), self-referential forcing
/// under call-by-need, and runaway recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    NotInScope { name: String },
    CyclicForce { name: String },
    StackExhausted,
}

impl RuntimeError {
    pub fn not_in_scope(name: impl Into<String>) -> Self {
        RuntimeError::NotInScope { name: name.into() }
    }

    pub fn cyclic_force(name: impl Into<String>) -> Self {
        RuntimeError::CyclicForce { name: name.into() }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RuntimeError::NotInScope { name } => {
                write!(f, "variable '{name}' is not in scope")
            }
            RuntimeError::CyclicForce { name } => {
                write!(f, "'{name}' depends on its own value while being forced")
            }
            RuntimeError::StackExhausted => {
                write!(f, "evaluation exceeded the maximum recursion depth")
            }
        }
    }
}

impl Error for RuntimeError {}
