use bough_lang_ast::*;

use crate::normalizer::Level;
use crate::result::TcResult;
use crate::typechecker::ctx::Ctx;
use crate::unifier::unify;

use super::equal;

/// How subterms are compared once the heads of two terms agree.
type Compare = fn(&mut Ctx, &Term, &Term, Lvl) -> TcResult<bool>;

/// Check whether `a` and `b` are syntactically identical.
///
/// Nothing is reduced except solved metavariables. Unsolved metavariables are
/// unified with the other side and holes are identical to every term.
pub fn identical(ctx: &mut Ctx, a: &Term, b: &Term, depth: Lvl) -> TcResult<bool> {
    if let Some(a) = look_through(a) {
        return identical(ctx, &a, b, depth);
    }
    if let Some(b) = look_through(b) {
        return identical(ctx, a, &b, depth);
    }
    match (a, b) {
        (Term::Hole(_), _) | (_, Term::Hole(_)) => Ok(true),
        (Term::Meta(Meta { id, spine }), _) => {
            if ctx.fill.contains(*id) {
                let a = ctx.whnf(Level::Never, a)?;
                return identical(ctx, &a, b, depth);
            }
            unify(ctx, *id, spine, b, depth)
        }
        (_, Term::Meta(Meta { id, spine })) => {
            if ctx.fill.contains(*id) {
                let b = ctx.whnf(Level::Never, b)?;
                return identical(ctx, a, &b, depth);
            }
            unify(ctx, *id, spine, a, depth)
        }
        _ => congruent(ctx, a, b, depth, identical),
    }
}

/// Compare two terms in weak head normal form component-wise, up to
/// definitional equality.
pub(super) fn similar(ctx: &mut Ctx, a: &Term, b: &Term, depth: Lvl) -> TcResult<bool> {
    congruent(ctx, a, b, depth, equal)
}

/// The term `term` stands for when it is compared. Annotations, spans and
/// self instantiations are transparent, local definitions are unfolded.
fn look_through(term: &Term) -> Option<Term> {
    match term {
        Term::Src(Src { exp, .. })
        | Term::Anno(Anno { exp, .. })
        | Term::SelfInst(SelfInst { exp })
        | Term::Sub(exp) => Some((**exp).clone()),
        Term::Log(Log { next, .. }) => Some((**next).clone()),
        Term::Let(Let { val, body, .. }) | Term::Use(Use { val, body, .. }) => {
            Some(body.apply((**val).clone()))
        }
        _ => None,
    }
}

fn open(name: &Name, body: &Closure, depth: Lvl) -> Term {
    body.apply(Term::var(name.clone(), depth))
}

fn open2(got: &Name, name: &Name, body: &Closure2, depth: Lvl) -> Term {
    body.apply(Term::var(got.clone(), depth), Term::var(name.clone(), depth + 1))
}

fn all(
    ctx: &mut Ctx,
    pairs: impl IntoIterator<Item = (Term, Term, Lvl)>,
    cmp: Compare,
) -> TcResult<bool> {
    for (a, b, depth) in pairs {
        if !cmp(ctx, &a, &b, depth)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn pairs<'a>(
    xs: &'a [Term],
    ys: &'a [Term],
    depth: Lvl,
) -> Option<impl Iterator<Item = (Term, Term, Lvl)> + 'a> {
    (xs.len() == ys.len()).then(|| xs.iter().zip(ys).map(move |(x, y)| (x.clone(), y.clone(), depth)))
}

/// Compare terms with the same head, using `cmp` for the subterms.
fn congruent(ctx: &mut Ctx, a: &Term, b: &Term, depth: Lvl, cmp: Compare) -> TcResult<bool> {
    match (a, b) {
        (Term::Pi(a), Term::Pi(b)) => all(
            ctx,
            [
                ((*a.input).clone(), (*b.input).clone(), depth),
                (open(&a.name, &a.body, depth), open(&b.name, &b.body, depth), depth + 1),
            ],
            cmp,
        ),
        (Term::SelfType(a), Term::SelfType(b)) => all(
            ctx,
            [
                ((*a.typ).clone(), (*b.typ).clone(), depth),
                (open(&a.name, &a.body, depth), open(&b.name, &b.body, depth), depth + 1),
            ],
            cmp,
        ),
        (Term::Lam(a), Term::Lam(b)) => {
            cmp(ctx, &open(&a.name, &a.body, depth), &open(&b.name, &b.body, depth), depth + 1)
        }
        (Term::App(a), Term::App(b)) => all(
            ctx,
            [((*a.fun).clone(), (*b.fun).clone(), depth), ((*a.arg).clone(), (*b.arg).clone(), depth)],
            cmp,
        ),
        (Term::Adt(a), Term::Adt(b)) => {
            let Some(indices) = pairs(&a.indices, &b.indices, depth) else { return Ok(false) };
            if !cmp(ctx, &a.typ, &b.typ, depth)? || !all(ctx, indices, cmp)? {
                return Ok(false);
            }
            if a.ctrs.len() != b.ctrs.len() {
                return Ok(false);
            }
            for (x, y) in a.ctrs.iter().zip(&b.ctrs) {
                if x.name != y.name || !congruent_tele(ctx, &x.tele, &y.tele, depth, cmp)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Term::Ctor(a), Term::Ctor(b)) => {
            if a.name != b.name || a.fields.len() != b.fields.len() {
                return Ok(false);
            }
            let fields = a.fields.iter().zip(&b.fields).map(|(x, y)| (x.exp.clone(), y.exp.clone(), depth));
            all(ctx, fields, cmp)
        }
        (Term::Match(a), Term::Match(b)) => {
            if a.cases.len() != b.cases.len() {
                return Ok(false);
            }
            for (x, y) in a.cases.iter().zip(&b.cases) {
                if x.name != y.name || !cmp(ctx, &x.body, &y.body, depth)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Term::Switch(a), Term::Switch(b)) => all(
            ctx,
            [
                ((*a.zero).clone(), (*b.zero).clone(), depth),
                ((*a.succ).clone(), (*b.succ).clone(), depth),
            ],
            cmp,
        ),
        (Term::Op2(a), Term::Op2(b)) => {
            if a.op != b.op {
                return Ok(false);
            }
            all(
                ctx,
                [((*a.lhs).clone(), (*b.lhs).clone(), depth), ((*a.rhs).clone(), (*b.rhs).clone(), depth)],
                cmp,
            )
        }
        (Term::MapType(a), Term::MapType(b)) => cmp(ctx, &a.elem, &b.elem, depth),
        (Term::MapLit(a), Term::MapLit(b)) => {
            if !a.entries.keys().eq(b.entries.keys()) {
                return Ok(false);
            }
            let entries = a.entries.values().zip(b.entries.values()).map(|(x, y)| (x.clone(), y.clone(), depth));
            if !all(ctx, entries, cmp)? {
                return Ok(false);
            }
            cmp(ctx, &a.default, &b.default, depth)
        }
        (Term::Get(a), Term::Get(b)) => all(
            ctx,
            [
                ((*a.map).clone(), (*b.map).clone(), depth),
                ((*a.key).clone(), (*b.key).clone(), depth),
                (open2(&a.got, &a.name, &a.body, depth), open2(&b.got, &b.name, &b.body, depth), depth + 2),
            ],
            cmp,
        ),
        (Term::Put(a), Term::Put(b)) => all(
            ctx,
            [
                ((*a.map).clone(), (*b.map).clone(), depth),
                ((*a.key).clone(), (*b.key).clone(), depth),
                ((*a.val).clone(), (*b.val).clone(), depth),
                (open2(&a.got, &a.name, &a.body, depth), open2(&b.got, &b.name, &b.body, depth), depth + 2),
            ],
            cmp,
        ),
        (Term::Lst(a), Term::Lst(b)) => match pairs(a, b, depth) {
            Some(items) => all(ctx, items, cmp),
            None => Ok(false),
        },
        (Term::Var(a), Term::Var(b)) => Ok(a.lvl == b.lvl),
        (Term::Ref(a), Term::Ref(b)) => Ok(a.name == b.name),
        (Term::TypeUniv, Term::TypeUniv)
        | (Term::U64Type, Term::U64Type)
        | (Term::F64Type, Term::F64Type) => Ok(true),
        (Term::Num(a), Term::Num(b)) | (Term::Nat(a), Term::Nat(b)) => Ok(a == b),
        (Term::Flt(a), Term::Flt(b)) => Ok(a.total_cmp(b).is_eq()),
        (Term::Txt(a), Term::Txt(b)) => Ok(a == b),
        _ => Ok(false),
    }
}

fn congruent_tele(
    ctx: &mut Ctx,
    a: &Telescope,
    b: &Telescope,
    depth: Lvl,
    cmp: Compare,
) -> TcResult<bool> {
    match (a, b) {
        (Telescope::Return(a), Telescope::Return(b)) => cmp(ctx, a, b, depth),
        (Telescope::Extend(a), Telescope::Extend(b)) => {
            if !cmp(ctx, &a.input, &b.input, depth)? {
                return Ok(false);
            }
            let a = a.body.apply(Term::var(a.name.clone(), depth));
            let b = b.body.apply(Term::var(b.name.clone(), depth));
            congruent_tele(ctx, &a, &b, depth + 1, cmp)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    #[test]
    fn identical_does_not_reduce() {
        let redex = Term::app(Term::lam("x", |x| x), Term::Num(1));
        assert!(!identical(&mut ctx(), &redex, &Term::Num(1), 0).unwrap());
    }

    #[test]
    fn identical_unfolds_local_definitions() {
        let term = Term::let_in("x", Term::Num(2), |x| x);
        assert!(identical(&mut ctx(), &term, &Term::Num(2), 0).unwrap());
    }

    #[test]
    fn identical_compares_telescopes() {
        let adt = |ret: Term| -> Term {
            Adt {
                indices: vec![],
                ctrs: vec![Ctr {
                    name: "Box".to_owned(),
                    tele: Telescope::extend("val", Term::U64Type, move |_| Telescope::ret(ret.clone())),
                }],
                typ: Rc::new(Term::reference("Box")),
            }
            .into()
        };
        let mut ctx = ctx();
        assert!(identical(&mut ctx, &adt(Term::reference("Box")), &adt(Term::reference("Box")), 0).unwrap());
        assert!(!identical(&mut ctx, &adt(Term::reference("Box")), &adt(Term::U64Type), 0).unwrap());
    }

    #[test]
    fn identical_solves_metas_on_either_side() {
        let mut ctx = ctx();
        assert!(identical(&mut ctx, &Term::U64Type, &Term::meta(3), 0).unwrap());
        assert!(matches!(ctx.fill.get(MetaVar { id: 3 }), Some(Term::U64Type)));
    }
}
