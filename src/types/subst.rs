use super::ty::Ty;

/// Replace every free occurrence of `var` in `ty` with `replacement`.
///
/// Pure structural rewrite: the input tree is never mutated. A `Forall`
/// whose variable list re-binds `var` shadows it and the rewrite stops
/// there; capture avoidance beyond that single level is out of scope.
pub fn substitute(ty: &Ty, var: &str, replacement: &Ty) -> Ty {
    match ty {
        Ty::Con(_) => ty.clone(),
        Ty::Var(name) => {
            if name == var {
                replacement.clone()
            } else {
                ty.clone()
            }
        }
        Ty::Arrow(domain, codomain) => Ty::arrow(
            substitute(domain, var, replacement),
            substitute(codomain, var, replacement),
        ),
        Ty::Forall(vars, body) => {
            if vars.iter().any(|v| v == var) {
                ty.clone()
            } else {
                Ty::Forall(vars.clone(), Box::new(substitute(body, var, replacement)))
            }
        }
    }
}
