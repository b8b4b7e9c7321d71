use std::collections::HashMap;

use super::ty::Ty;

/// Scoped term-binding environment for the checker: name -> type (which
/// may be quantified).
///
/// A chain of frames linked through `parent`. Lookup searches the local
/// frame first and then recurses outward; binding always extends the
/// local frame, shadowing without ever touching an ancestor's storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Ty>,
    parent: Option<Box<TypeEnv>>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv::default()
    }

    pub fn with_bindings(bindings: Vec<(String, Ty)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
            parent: None,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Ty> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Return a copy of this environment with `name` bound in its local
    /// frame. The receiver is untouched.
    pub fn extend(&self, name: String, ty: Ty) -> TypeEnv {
        let mut new_bindings = self.bindings.clone();
        new_bindings.insert(name, ty);
        TypeEnv {
            bindings: new_bindings,
            parent: self.parent.clone(),
        }
    }

    /// Fresh child frame whose lookups fall through to `parent`.
    pub fn child(parent: &TypeEnv) -> TypeEnv {
        TypeEnv {
            bindings: HashMap::new(),
            parent: Some(Box::new(parent.clone())),
        }
    }

    /// Bind into this frame in place. Only the ambient root environment
    /// is ever mutated this way, when a top-level declaration commits.
    pub fn define(&mut self, name: String, ty: Ty) {
        self.bindings.insert(name, ty);
    }
}

/// The in-scope type-variable environment.
///
/// Tracks which type-variable names an enclosing type abstraction has
/// introduced. It stores no mapped values: its only job is validating
/// that an annotation's type variable is actually bound. It is never
/// merged or searched interchangeably with [`TypeEnv`].
#[derive(Debug, Clone, Default)]
pub struct TyVarScope {
    names: Vec<String>,
    parent: Option<Box<TyVarScope>>,
}

impl TyVarScope {
    pub fn empty() -> Self {
        TyVarScope::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
            || self.parent.as_ref().is_some_and(|p| p.contains(name))
    }

    /// Child scope with one more variable in scope, used for the
    /// duration of checking a type abstraction's body.
    pub fn extend(&self, name: String) -> TyVarScope {
        TyVarScope {
            names: vec![name],
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Child scope introducing several variables at once (an annotation
    /// that is itself quantified).
    pub fn extend_many(&self, names: &[String]) -> TyVarScope {
        TyVarScope {
            names: names.to_vec(),
            parent: Some(Box::new(self.clone())),
        }
    }
}
