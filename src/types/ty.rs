use std::fmt;

/// Names of the base type constructors the checker recognizes.
pub const PRIMITIVES: [&str; 3] = ["number", "bool", "unit"];

/// A System F type.
///
/// Type variables are identified by name; equality is structural and
/// compares names literally. Alpha-renaming happens only during
/// substitution, never during comparison.
///
/// A universally quantified type (a scheme) is the `Forall` variant.
/// Quantifiers nest freely (the body of a type abstraction may itself
/// be quantified), but a `Forall` never carries an empty variable list:
/// [`Ty::forall`] collapses that case to the body, keeping structural
/// equality aligned with the "empty forall is its body" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    /// A rigid or bound type variable.
    Var(String),
    /// A base type constructor (`number`, `bool`, `unit`).
    Con(String),
    /// Function type, right-associative when printed.
    Arrow(Box<Ty>, Box<Ty>),
    /// Universal quantification over an ordered variable sequence.
    Forall(Vec<String>, Box<Ty>),
}

impl Ty {
    pub fn var(name: impl Into<String>) -> Self {
        Ty::Var(name.into())
    }

    pub fn number() -> Self {
        Ty::Con("number".to_string())
    }

    pub fn bool() -> Self {
        Ty::Con("bool".to_string())
    }

    pub fn unit() -> Self {
        Ty::Con("unit".to_string())
    }

    pub fn arrow(domain: Ty, codomain: Ty) -> Self {
        Ty::Arrow(Box::new(domain), Box::new(codomain))
    }

    /// Quantify `body` over `vars`. An empty sequence yields `body`
    /// itself.
    pub fn forall(vars: Vec<impl Into<String>>, body: Ty) -> Self {
        if vars.is_empty() {
            body
        } else {
            Ty::Forall(vars.into_iter().map(Into::into).collect(), Box::new(body))
        }
    }

    /// Look up a primitive type by its literal name.
    pub fn primitive(name: &str) -> Option<Ty> {
        PRIMITIVES
            .contains(&name)
            .then(|| Ty::Con(name.to_string()))
    }

    /// Render this type in the canonical diagnostic form.
    ///
    /// `->` is right-associative; an arrow is parenthesized exactly when
    /// it sits in the domain of an enclosing arrow. Domain positions
    /// increase the depth argument and a positive depth triggers parens;
    /// codomain positions reset it, which keeps `a -> b -> c` flat.
    /// Quantified types render as `forall v1 v2. body`.
    pub fn pretty(&self) -> String {
        self.pretty_at(0)
    }

    fn pretty_at(&self, depth: usize) -> String {
        match self {
            Ty::Con(name) => name.clone(),
            Ty::Var(name) => name.clone(),
            Ty::Arrow(domain, codomain) => {
                let rendered = format!(
                    "{} -> {}",
                    domain.pretty_at(depth + 1),
                    codomain.pretty_at(0)
                );
                if depth > 0 {
                    format!("({})", rendered)
                } else {
                    rendered
                }
            }
            Ty::Forall(vars, body) => {
                if vars.is_empty() {
                    body.pretty_at(depth)
                } else {
                    let rendered = format!("forall {}. {}", vars.join(" "), body.pretty_at(0));
                    if depth > 0 {
                        format!("({})", rendered)
                    } else {
                        rendered
                    }
                }
            }
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_lookup() {
        assert_eq!(Ty::primitive("number"), Some(Ty::number()));
        assert_eq!(Ty::primitive("bool"), Some(Ty::bool()));
        assert_eq!(Ty::primitive("unit"), Some(Ty::unit()));
        assert_eq!(Ty::primitive("string"), None);
    }

    #[test]
    fn test_pretty_print_simple() {
        assert_eq!(Ty::number().pretty(), "number");
        assert_eq!(Ty::var("a").pretty(), "a");
    }

    #[test]
    fn test_pretty_print_arrow_right_associative() {
        let ty = Ty::arrow(Ty::number(), Ty::arrow(Ty::number(), Ty::bool()));
        assert_eq!(ty.pretty(), "number -> number -> bool");
    }

    #[test]
    fn test_pretty_print_domain_arrow_parenthesized() {
        let ty = Ty::arrow(Ty::arrow(Ty::number(), Ty::number()), Ty::bool());
        assert_eq!(ty.pretty(), "(number -> number) -> bool");
    }

    #[test]
    fn test_pretty_print_nested_domain() {
        let ty = Ty::arrow(
            Ty::arrow(Ty::arrow(Ty::number(), Ty::bool()), Ty::unit()),
            Ty::number(),
        );
        assert_eq!(ty.pretty(), "((number -> bool) -> unit) -> number");
    }

    #[test]
    fn test_pretty_print_codomain_stays_flat() {
        let ty = Ty::arrow(
            Ty::arrow(Ty::number(), Ty::arrow(Ty::bool(), Ty::unit())),
            Ty::number(),
        );
        assert_eq!(ty.pretty(), "(number -> bool -> unit) -> number");
    }

    #[test]
    fn test_pretty_print_forall() {
        let ty = Ty::forall(vec!["a"], Ty::arrow(Ty::var("a"), Ty::var("a")));
        assert_eq!(ty.pretty(), "forall a. a -> a");
    }

    #[test]
    fn test_pretty_print_multi_var_forall() {
        let ty = Ty::forall(vec!["a", "b"], Ty::arrow(Ty::var("a"), Ty::var("b")));
        assert_eq!(ty.pretty(), "forall a b. a -> b");
    }

    #[test]
    fn test_empty_forall_collapses_to_body() {
        let vars: Vec<String> = Vec::new();
        let ty = Ty::forall(vars, Ty::number());
        assert_eq!(ty, Ty::number());
    }

    #[test]
    fn test_forall_in_domain_parenthesized() {
        let ty = Ty::arrow(
            Ty::forall(vec!["a"], Ty::arrow(Ty::var("a"), Ty::var("a"))),
            Ty::number(),
        );
        assert_eq!(ty.pretty(), "(forall a. a -> a) -> number");
    }

    #[test]
    fn test_structural_equality_is_literal_on_names() {
        assert_ne!(Ty::var("a"), Ty::var("b"));
        assert_eq!(
            Ty::arrow(Ty::var("a"), Ty::var("a")),
            Ty::arrow(Ty::var("a"), Ty::var("a"))
        );
    }
}
