use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result};
use std::rc::Rc;

use crate::ast::Expr;

use super::value::Value;

/// How a name is stored in the runtime environment. Which flavor gets
/// created is the evaluation strategy's whole footprint: everything
/// downstream just resolves whatever it finds.
#[derive(Debug, Clone)]
pub enum Binding {
    /// Already a value. Eager evaluation only ever stores these.
    Strict(Value),
    /// Re-evaluated from scratch on every use.
    ByName { expr: Rc<Expr>, env: EvalEnv },
    /// Evaluated on first use, then memoized through the shared cell.
    Thunk(Rc<RefCell<ThunkState>>),
}

#[derive(Debug, Clone)]
pub enum ThunkState {
    Pending { expr: Rc<Expr>, env: EvalEnv },
    /// Marker set while the thunk's own evaluation is in flight.
    /// Observing it from inside means the binding needs itself.
    Forcing,
    Done(Value),
}

/// One frame of the runtime environment. Frames are shared behind
/// `Rc` so closures can capture their defining scope cheaply, and the
/// binding table is a `RefCell` so recursive bindings can be tied
/// after the frame exists.
pub struct Frame {
    bindings: RefCell<HashMap<String, Binding>>,
    parent: Option<EvalEnv>,
}

#[derive(Clone)]
pub struct EvalEnv(Rc<Frame>);

impl EvalEnv {
    pub fn root() -> Self {
        EvalEnv(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        }))
    }

    pub fn child(&self) -> Self {
        EvalEnv(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    pub fn bind(&self, name: impl Into<String>, binding: Binding) {
        self.0.bindings.borrow_mut().insert(name.into(), binding);
    }

    pub fn lookup(&self, name: &str) -> Option<Binding> {
        match self.0.bindings.borrow().get(name) {
            Some(binding) => Some(binding.clone()),
            None => self.0.parent.as_ref().and_then(|p| p.lookup(name)),
        }
    }
}

// Environments reference themselves through recursive bindings, so the
// derived Debug would not terminate. Print the local names and recurse
// into the parent chain only.
impl Debug for EvalEnv {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut names: Vec<String> = self.0.bindings.borrow().keys().cloned().collect();
        names.sort();
        write!(f, "EvalEnv({names:?}")?;
        if let Some(parent) = &self.0.parent {
            write!(f, " -> {parent:?}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_empty_root() {
        assert!(EvalEnv::root().lookup("x").is_none());
    }

    #[test]
    fn test_lookup_walks_parent_chain() {
        let root = EvalEnv::root();
        root.bind("x", Binding::Strict(Value::Num(1.0)));
        let inner = root.child().child();
        assert!(matches!(
            inner.lookup("x"),
            Some(Binding::Strict(Value::Num(n))) if n == 1.0
        ));
    }

    #[test]
    fn test_child_binding_shadows_parent() {
        let root = EvalEnv::root();
        root.bind("x", Binding::Strict(Value::Num(1.0)));
        let inner = root.child();
        inner.bind("x", Binding::Strict(Value::Num(2.0)));
        assert!(matches!(
            inner.lookup("x"),
            Some(Binding::Strict(Value::Num(n))) if n == 2.0
        ));
        assert!(matches!(
            root.lookup("x"),
            Some(Binding::Strict(Value::Num(n))) if n == 1.0
        ));
    }

    #[test]
    fn test_sibling_scopes_are_independent() {
        let root = EvalEnv::root();
        let left = root.child();
        let right = root.child();
        left.bind("x", Binding::Strict(Value::Num(1.0)));
        assert!(right.lookup("x").is_none());
    }

    #[test]
    fn test_debug_terminates_on_recursive_binding() {
        let env = EvalEnv::root().child();
        env.bind(
            "f",
            Binding::Strict(Value::Closure {
                param: "x".to_string(),
                body: Expr::var("x"),
                env: env.clone(),
            }),
        );
        let rendered = format!("{env:?}");
        assert!(rendered.contains("f"));
    }
}
