//! Term-level abstract syntax for System F.
//!
//! Every term carries its full type annotations: lambda parameters are
//! annotated, and type abstraction (`TLam`) / type application (`TApp`)
//! are explicit syntax. The checker and the evaluator both traverse this
//! tree; neither ever rewrites it.

use crate::types::Ty;

/// Literal payload of a [`Expr::Lit`] node.
///
/// The checker never inspects the payload, only the literal's declared
/// primitive name; the evaluator never inspects the name, only the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Num(f64),
    Bool(bool),
    Unit,
}

/// Binary operators of the fixed operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Gt,
    Lt,
    Eq,
}

impl BinOpKind {
    /// Surface symbol, used by diagnostics and the transpiler.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
            BinOpKind::Gt => ">",
            BinOpKind::Lt => "<",
            BinOpKind::Eq => "==",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOpKind {
    Not,
    Neg,
}

impl UnOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOpKind::Not => "!",
            UnOpKind::Neg => "-",
        }
    }
}

/// A System F term.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Term variable reference.
    Var(String),
    /// Literal with its declared primitive type name and payload.
    Lit { ty: String, value: Constant },
    /// Term abstraction with an explicit parameter annotation.
    Lam {
        param: String,
        annotation: Ty,
        body: Box<Expr>,
    },
    /// Term application.
    App { func: Box<Expr>, arg: Box<Expr> },
    /// Type abstraction, introducing a universally quantified variable.
    TLam { param: String, body: Box<Expr> },
    /// Type application, eliminating a universal quantifier.
    TApp { term: Box<Expr>, arg: Ty },
    /// Conditional; exactly one branch is ever evaluated.
    Cond {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Non-recursive binding. With a body it is a local `let .. in ..`;
    /// without one it is a top-level declaration the session persists.
    Let {
        name: String,
        bound: Box<Expr>,
        body: Option<Box<Expr>>,
    },
    BinOp {
        op: BinOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnOp { op: UnOpKind, operand: Box<Expr> },
    /// General recursion: `fix e` where `e : T -> T`.
    Fix(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn num(value: f64) -> Self {
        Expr::Lit {
            ty: "number".to_string(),
            value: Constant::Num(value),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Lit {
            ty: "bool".to_string(),
            value: Constant::Bool(value),
        }
    }

    pub fn unit() -> Self {
        Expr::Lit {
            ty: "unit".to_string(),
            value: Constant::Unit,
        }
    }

    /// Literal with an arbitrary primitive name, for exercising the
    /// checker's name validation.
    pub fn lit(ty: impl Into<String>, value: Constant) -> Self {
        Expr::Lit {
            ty: ty.into(),
            value,
        }
    }

    pub fn lam(param: impl Into<String>, annotation: Ty, body: Expr) -> Self {
        Expr::Lam {
            param: param.into(),
            annotation,
            body: Box::new(body),
        }
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App {
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    pub fn tlam(param: impl Into<String>, body: Expr) -> Self {
        Expr::TLam {
            param: param.into(),
            body: Box::new(body),
        }
    }

    pub fn tapp(term: Expr, arg: Ty) -> Self {
        Expr::TApp {
            term: Box::new(term),
            arg,
        }
    }

    pub fn cond(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Cond {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn let_in(name: impl Into<String>, bound: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            bound: Box::new(bound),
            body: Some(Box::new(body)),
        }
    }

    pub fn let_decl(name: impl Into<String>, bound: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            bound: Box::new(bound),
            body: None,
        }
    }

    pub fn binop(op: BinOpKind, left: Expr, right: Expr) -> Self {
        Expr::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unop(op: UnOpKind, operand: Expr) -> Self {
        Expr::UnOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn fix(operand: Expr) -> Self {
        Expr::Fix(Box::new(operand))
    }
}
