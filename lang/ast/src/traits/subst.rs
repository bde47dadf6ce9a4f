use std::rc::Rc;

use crate::exp::*;

/// A rewrite of a term at a given depth.
pub type Rewrite = Rc<dyn Fn(&Term, Lvl) -> Term>;

/// Rebuild `term`, applying `f` to each immediate subterm.
///
/// Binder bodies are rebuilt lazily: the value a body is applied to gets
/// wrapped in [Term::Sub] before `f` sees it, and `f` is expected to unwrap
/// such markers without descending into them.
pub fn map_subterms(term: &Term, depth: Lvl, f: &Rewrite) -> Term {
    let go = |t: &Term| f(t, depth);
    let rc = |t: &Rc<Term>| Rc::new(f(&**t, depth));
    match term {
        Term::Pi(Pi { name, input, body }) => {
            Pi { name: name.clone(), input: rc(input), body: under(body, depth + 1, f) }.into()
        }
        Term::Lam(Lam { name, body }) => {
            Lam { name: name.clone(), body: under(body, depth + 1, f) }.into()
        }
        Term::App(App { fun, arg }) => App { fun: rc(fun), arg: rc(arg) }.into(),
        Term::Anno(Anno { check, exp, typ }) => {
            Anno { check: *check, exp: rc(exp), typ: rc(typ) }.into()
        }
        Term::SelfType(SelfType { name, typ, body }) => {
            SelfType { name: name.clone(), typ: rc(typ), body: under(body, depth + 1, f) }.into()
        }
        Term::SelfInst(SelfInst { exp }) => SelfInst { exp: rc(exp) }.into(),
        Term::Adt(Adt { indices, ctrs, typ }) => Adt {
            indices: indices.iter().map(go).collect(),
            ctrs: ctrs
                .iter()
                .map(|ctr| Ctr { name: ctr.name.clone(), tele: map_tele(&ctr.tele, depth, f) })
                .collect(),
            typ: rc(typ),
        }
        .into(),
        Term::Ctor(Ctor { name, fields }) => Ctor {
            name: name.clone(),
            fields: fields
                .iter()
                .map(|field| Field { name: field.name.clone(), exp: go(&field.exp) })
                .collect(),
        }
        .into(),
        Term::Match(Match { cases }) => Match {
            cases: cases
                .iter()
                .map(|case| Case { name: case.name.clone(), body: go(&case.body) })
                .collect(),
        }
        .into(),
        Term::Let(Let { name, val, body }) => {
            Let { name: name.clone(), val: rc(val), body: under(body, depth + 1, f) }.into()
        }
        Term::Use(Use { name, val, body }) => {
            Use { name: name.clone(), val: rc(val), body: under(body, depth + 1, f) }.into()
        }
        Term::Op2(Op2 { op, lhs, rhs }) => Op2 { op: *op, lhs: rc(lhs), rhs: rc(rhs) }.into(),
        Term::Switch(Switch { zero, succ }) => Switch { zero: rc(zero), succ: rc(succ) }.into(),
        Term::MapType(MapType { elem }) => MapType { elem: rc(elem) }.into(),
        Term::MapLit(MapLit { entries, default }) => MapLit {
            entries: entries.iter().map(|(key, val)| (*key, go(val))).collect(),
            default: rc(default),
        }
        .into(),
        Term::Get(Get { got, name, map, key, body }) => Get {
            got: got.clone(),
            name: name.clone(),
            map: rc(map),
            key: rc(key),
            body: under2(body, depth + 2, f),
        }
        .into(),
        Term::Put(Put { got, name, map, key, val, body }) => Put {
            got: got.clone(),
            name: name.clone(),
            map: rc(map),
            key: rc(key),
            val: rc(val),
            body: under2(body, depth + 2, f),
        }
        .into(),
        Term::Hole(Hole { name, ctx }) => {
            Hole { name: name.clone(), ctx: ctx.iter().map(go).collect() }.into()
        }
        Term::Meta(Meta { id, spine }) => Meta { id: *id, spine: spine.iter().map(go).collect() }.into(),
        Term::Log(Log { msg, next }) => Log { msg: rc(msg), next: rc(next) }.into(),
        Term::Src(Src { span, exp }) => Src { span: span.clone(), exp: rc(exp) }.into(),
        Term::Lst(items) => Term::Lst(items.iter().map(go).collect()),
        Term::Sub(exp) => Term::Sub(rc(exp)),
        Term::Ref(_)
        | Term::Var(_)
        | Term::TypeUniv
        | Term::U64Type
        | Term::F64Type
        | Term::Num(_)
        | Term::Flt(_)
        | Term::Txt(_)
        | Term::Nat(_) => term.clone(),
    }
}

pub fn map_tele(tele: &Telescope, depth: Lvl, f: &Rewrite) -> Telescope {
    match tele {
        Telescope::Return(ret) => Telescope::Return(Rc::new(f(&**ret, depth))),
        Telescope::Extend(Extend { name, input, body }) => {
            let body = body.clone();
            let f2 = f.clone();
            Telescope::Extend(Extend {
                name: name.clone(),
                input: Rc::new(f(&**input, depth)),
                body: Closure::new(move |x| map_tele(&body.apply(marked(x)), depth + 1, &f2)),
            })
        }
    }
}

fn under(body: &Closure, depth: Lvl, f: &Rewrite) -> Closure {
    let body = body.clone();
    let f = f.clone();
    Closure::new(move |x| f(&body.apply(marked(x)), depth))
}

fn under2(body: &Closure2, depth: Lvl, f: &Rewrite) -> Closure2 {
    let body = body.clone();
    let f = f.clone();
    Closure2::new(move |x, y| f(&body.apply(marked(x), marked(y)), depth))
}

fn marked(x: Term) -> Term {
    Term::Sub(Rc::new(x))
}

/// Replace every variable with level `lvl` by `neo`.
pub fn subst(lvl: Lvl, neo: &Term, term: &Term) -> Term {
    subst_many(&[(lvl, neo.clone())], term)
}

/// Replace variables by level, all at once.
pub fn subst_many(pairs: &[(Lvl, Term)], term: &Term) -> Term {
    let pairs: Rc<[(Lvl, Term)]> = pairs.into();
    subst_go(&pairs, term)
}

fn subst_go(pairs: &Rc<[(Lvl, Term)]>, term: &Term) -> Term {
    match term {
        Term::Var(Var { lvl, .. }) => match pairs.iter().find(|(l, _)| l == lvl) {
            Some((_, neo)) => neo.clone(),
            None => term.clone(),
        },
        Term::Sub(exp) => (**exp).clone(),
        _ => {
            let pairs = pairs.clone();
            let f: Rewrite = Rc::new(move |t, _| subst_go(&pairs, t));
            map_subterms(term, 0, &f)
        }
    }
}

/// [subst] for telescopes.
pub fn subst_tele(lvl: Lvl, neo: &Term, tele: &Telescope) -> Telescope {
    let pairs: Rc<[(Lvl, Term)]> = vec![(lvl, neo.clone())].into();
    let f: Rewrite = Rc::new(move |t, _| subst_go(&pairs, t));
    map_tele(tele, 0, &f)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn subst_replaces_matching_level() {
        let term = Term::app(Term::var("x", 0), Term::var("y", 1));
        let out = subst(0, &Term::Num(7), &term);
        let Term::App(App { fun, arg }) = out else { panic!("expected an application") };
        assert!(matches!(*fun, Term::Num(7)));
        assert!(matches!(&*arg, Term::Var(Var { lvl: 1, .. })));
    }

    #[test]
    fn subst_under_binder_leaves_bound_value_alone() {
        // The argument of the rebuilt body has level 0 as well but is not substituted.
        let term = Term::lam("z", |z| Term::app(Term::var("x", 0), z));
        let out = subst(0, &Term::var("w", 0), &term);
        let Term::Lam(lam) = out else { panic!("expected a lambda") };
        let Term::App(App { fun, arg }) = lam.body.apply(Term::var("z", 0)) else {
            panic!("expected an application")
        };
        assert!(matches!(&*fun, Term::Var(Var { name, .. }) if name == "w"));
        assert!(matches!(&*arg, Term::Var(Var { name, .. }) if name == "z"));
    }
}
