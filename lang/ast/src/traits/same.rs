use ordered_float::OrderedFloat;

use crate::exp::*;

/// Syntactic equality of two terms.
///
/// Binders are compared by opening both bodies with the same fresh variable.
/// Annotations, source spans, local definitions and logs are looked through.
/// A hole in `a` matches everything, so `a` acts as a pattern. Nothing is
/// reduced and no metavariable is solved.
pub fn same(a: &Term, b: &Term, depth: Lvl) -> bool {
    match (a, b) {
        (Term::Src(Src { exp, .. }), _) | (Term::Anno(Anno { exp, .. }), _) => same(exp, b, depth),
        (_, Term::Src(Src { exp, .. })) | (_, Term::Anno(Anno { exp, .. })) => same(a, exp, depth),
        (Term::Sub(exp), _) | (Term::SelfInst(SelfInst { exp }), _) => same(exp, b, depth),
        (_, Term::Sub(exp)) | (_, Term::SelfInst(SelfInst { exp })) => same(a, exp, depth),
        (Term::Let(Let { val, body, .. }), _) | (Term::Use(Use { val, body, .. }), _) => {
            same(&body.apply((**val).clone()), b, depth)
        }
        (_, Term::Let(Let { val, body, .. })) | (_, Term::Use(Use { val, body, .. })) => {
            same(a, &body.apply((**val).clone()), depth)
        }
        (Term::Log(Log { next, .. }), _) => same(next, b, depth),
        (_, Term::Log(Log { next, .. })) => same(a, next, depth),
        (Term::Hole(_), _) => true,
        (Term::Pi(a), Term::Pi(b)) => {
            same(&a.input, &b.input, depth)
                && same(
                    &a.body.apply(Term::var(a.name.clone(), depth)),
                    &b.body.apply(Term::var(b.name.clone(), depth)),
                    depth + 1,
                )
        }
        (Term::Lam(a), Term::Lam(b)) => same(
            &a.body.apply(Term::var(a.name.clone(), depth)),
            &b.body.apply(Term::var(b.name.clone(), depth)),
            depth + 1,
        ),
        (Term::App(a), Term::App(b)) => same(&a.fun, &b.fun, depth) && same(&a.arg, &b.arg, depth),
        (Term::SelfType(a), Term::SelfType(b)) => {
            same(&a.typ, &b.typ, depth)
                && same(
                    &a.body.apply(Term::var(a.name.clone(), depth)),
                    &b.body.apply(Term::var(b.name.clone(), depth)),
                    depth + 1,
                )
        }
        (Term::Adt(a), Term::Adt(b)) => {
            same(&a.typ, &b.typ, depth) && all_same(&a.indices, &b.indices, depth)
        }
        (Term::Ctor(a), Term::Ctor(b)) => {
            a.name == b.name
                && a.fields.len() == b.fields.len()
                && a.fields.iter().zip(&b.fields).all(|(x, y)| same(&x.exp, &y.exp, depth))
        }
        (Term::Match(a), Term::Match(b)) => {
            a.cases.len() == b.cases.len()
                && a.cases
                    .iter()
                    .zip(&b.cases)
                    .all(|(x, y)| x.name == y.name && same(&x.body, &y.body, depth))
        }
        (Term::Ref(a), Term::Ref(b)) => a.name == b.name,
        (Term::Var(a), Term::Var(b)) => a.lvl == b.lvl,
        (Term::Meta(a), Term::Meta(b)) => a.id == b.id && all_same(&a.spine, &b.spine, depth),
        (Term::TypeUniv, Term::TypeUniv)
        | (Term::U64Type, Term::U64Type)
        | (Term::F64Type, Term::F64Type) => true,
        (Term::Num(a), Term::Num(b)) => a == b,
        (Term::Flt(a), Term::Flt(b)) => OrderedFloat(*a) == OrderedFloat(*b),
        (Term::Op2(a), Term::Op2(b)) => {
            a.op == b.op && same(&a.lhs, &b.lhs, depth) && same(&a.rhs, &b.rhs, depth)
        }
        (Term::Switch(a), Term::Switch(b)) => {
            same(&a.zero, &b.zero, depth) && same(&a.succ, &b.succ, depth)
        }
        (Term::MapType(a), Term::MapType(b)) => same(&a.elem, &b.elem, depth),
        (Term::MapLit(a), Term::MapLit(b)) => {
            same(&a.default, &b.default, depth)
                && a.entries.len() == b.entries.len()
                && a.entries.iter().all(|(key, x)| {
                    b.entries.get(key).is_some_and(|y| same(x, y, depth))
                })
        }
        (Term::Get(a), Term::Get(b)) => {
            same(&a.map, &b.map, depth)
                && same(&a.key, &b.key, depth)
                && same(
                    &a.body.apply(Term::var(a.got.clone(), depth), Term::var(a.name.clone(), depth + 1)),
                    &b.body.apply(Term::var(b.got.clone(), depth), Term::var(b.name.clone(), depth + 1)),
                    depth + 2,
                )
        }
        (Term::Put(a), Term::Put(b)) => {
            same(&a.map, &b.map, depth)
                && same(&a.key, &b.key, depth)
                && same(&a.val, &b.val, depth)
                && same(
                    &a.body.apply(Term::var(a.got.clone(), depth), Term::var(a.name.clone(), depth + 1)),
                    &b.body.apply(Term::var(b.got.clone(), depth), Term::var(b.name.clone(), depth + 1)),
                    depth + 2,
                )
        }
        (Term::Txt(a), Term::Txt(b)) => a == b,
        (Term::Nat(a), Term::Nat(b)) => a == b,
        (Term::Lst(a), Term::Lst(b)) => all_same(a, b, depth),
        _ => false,
    }
}

fn all_same(xs: &[Term], ys: &[Term], depth: Lvl) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same(x, y, depth))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn alpha_equivalent_lambdas_are_same() {
        let a = Term::lam("x", |x| x);
        let b = Term::lam("y", |y| y);
        assert!(same(&a, &b, 0));
    }

    #[test]
    fn different_constructors_are_not_same() {
        let a = Term::ctor("Zero", vec![]);
        let b = Term::ctor("Succ", vec![("prev", Term::ctor("Zero", vec![]))]);
        assert!(!same(&a, &b, 0));
    }

    #[test]
    fn nan_is_same_as_itself() {
        assert!(same(&Term::Flt(f64::NAN), &Term::Flt(f64::NAN), 0));
    }
}
