use std::rc::Rc;

use super::subst::{subst, subst_many, subst_tele};
use crate::exp::*;

/// Rebuild `term`, applying `f` to each immediate subterm.
///
/// Unlike [super::map_subterms], binder bodies are opened with fresh variables
/// of the binder's depth and `f` runs on them right away, exactly once. The
/// results are closed again by substituting for those variables.
pub fn map_opened(term: &Term, depth: Lvl, f: &mut dyn FnMut(&Term, Lvl) -> Term) -> Term {
    match term {
        Term::Pi(Pi { name, input, body }) => {
            let input = Rc::new(f(input, depth));
            let body = close(depth, f(&open(name, body, depth), depth + 1));
            Pi { name: name.clone(), input, body }.into()
        }
        Term::Lam(Lam { name, body }) => {
            let body = close(depth, f(&open(name, body, depth), depth + 1));
            Lam { name: name.clone(), body }.into()
        }
        Term::SelfType(SelfType { name, typ, body }) => {
            let typ = Rc::new(f(typ, depth));
            let body = close(depth, f(&open(name, body, depth), depth + 1));
            SelfType { name: name.clone(), typ, body }.into()
        }
        Term::Let(Let { name, val, body }) => {
            let val = Rc::new(f(val, depth));
            let body = close(depth, f(&open(name, body, depth), depth + 1));
            Let { name: name.clone(), val, body }.into()
        }
        Term::Use(Use { name, val, body }) => {
            let val = Rc::new(f(val, depth));
            let body = close(depth, f(&open(name, body, depth), depth + 1));
            Use { name: name.clone(), val, body }.into()
        }
        Term::Get(Get { got, name, map, key, body }) => {
            let map = Rc::new(f(map, depth));
            let key = Rc::new(f(key, depth));
            let body = close2(depth, f(&open2(got, name, body, depth), depth + 2));
            Get { got: got.clone(), name: name.clone(), map, key, body }.into()
        }
        Term::Put(Put { got, name, map, key, val, body }) => {
            let map = Rc::new(f(map, depth));
            let key = Rc::new(f(key, depth));
            let val = Rc::new(f(val, depth));
            let body = close2(depth, f(&open2(got, name, body, depth), depth + 2));
            Put { got: got.clone(), name: name.clone(), map, key, val, body }.into()
        }
        Term::Adt(Adt { indices, ctrs, typ }) => {
            let indices = indices.iter().map(|idx| f(idx, depth)).collect();
            let ctrs = ctrs
                .iter()
                .map(|ctr| Ctr { name: ctr.name.clone(), tele: map_tele_opened(&ctr.tele, depth, f) })
                .collect();
            let typ = Rc::new(f(typ, depth));
            Adt { indices, ctrs, typ }.into()
        }
        Term::App(App { fun, arg }) => {
            let fun = Rc::new(f(fun, depth));
            let arg = Rc::new(f(arg, depth));
            App { fun, arg }.into()
        }
        Term::Anno(Anno { check, exp, typ }) => {
            let exp = Rc::new(f(exp, depth));
            let typ = Rc::new(f(typ, depth));
            Anno { check: *check, exp, typ }.into()
        }
        Term::SelfInst(SelfInst { exp }) => SelfInst { exp: Rc::new(f(exp, depth)) }.into(),
        Term::Ctor(Ctor { name, fields }) => Ctor {
            name: name.clone(),
            fields: fields
                .iter()
                .map(|field| Field { name: field.name.clone(), exp: f(&field.exp, depth) })
                .collect(),
        }
        .into(),
        Term::Match(Match { cases }) => Match {
            cases: cases
                .iter()
                .map(|case| Case { name: case.name.clone(), body: f(&case.body, depth) })
                .collect(),
        }
        .into(),
        Term::Op2(Op2 { op, lhs, rhs }) => {
            let lhs = Rc::new(f(lhs, depth));
            let rhs = Rc::new(f(rhs, depth));
            Op2 { op: *op, lhs, rhs }.into()
        }
        Term::Switch(Switch { zero, succ }) => {
            let zero = Rc::new(f(zero, depth));
            let succ = Rc::new(f(succ, depth));
            Switch { zero, succ }.into()
        }
        Term::MapType(MapType { elem }) => MapType { elem: Rc::new(f(elem, depth)) }.into(),
        Term::MapLit(MapLit { entries, default }) => {
            let entries = entries.iter().map(|(key, val)| (*key, f(val, depth))).collect();
            let default = Rc::new(f(default, depth));
            MapLit { entries, default }.into()
        }
        Term::Hole(Hole { name, ctx }) => {
            Hole { name: name.clone(), ctx: ctx.iter().map(|t| f(t, depth)).collect() }.into()
        }
        Term::Meta(Meta { id, spine }) => {
            Meta { id: *id, spine: spine.iter().map(|t| f(t, depth)).collect() }.into()
        }
        Term::Log(Log { msg, next }) => {
            let msg = Rc::new(f(msg, depth));
            let next = Rc::new(f(next, depth));
            Log { msg, next }.into()
        }
        Term::Src(Src { span, exp }) => Src { span: span.clone(), exp: Rc::new(f(exp, depth)) }.into(),
        Term::Lst(items) => Term::Lst(items.iter().map(|t| f(t, depth)).collect()),
        Term::Sub(exp) => Term::Sub(Rc::new(f(exp, depth))),
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

/// [map_opened] for telescopes.
pub fn map_tele_opened(
    tele: &Telescope,
    depth: Lvl,
    f: &mut dyn FnMut(&Term, Lvl) -> Term,
) -> Telescope {
    match tele {
        Telescope::Return(ret) => Telescope::Return(Rc::new(f(ret, depth))),
        Telescope::Extend(Extend { name, input, body }) => {
            let input = Rc::new(f(input, depth));
            let rest = map_tele_opened(&body.apply(Term::var(name.clone(), depth)), depth + 1, f);
            let body = Closure::new(move |x| subst_tele(depth, &x, &rest));
            Telescope::Extend(Extend { name: name.clone(), input, body })
        }
    }
}

fn open(name: &Name, body: &Closure, depth: Lvl) -> Term {
    body.apply(Term::var(name.clone(), depth))
}

fn open2(got: &Name, name: &Name, body: &Closure2, depth: Lvl) -> Term {
    body.apply(Term::var(got.clone(), depth), Term::var(name.clone(), depth + 1))
}

/// Abstract the variable of level `depth` out of `body`.
pub fn close(depth: Lvl, body: Term) -> Closure {
    Closure::new(move |x| subst(depth, &x, &body))
}

/// Abstract the variables of levels `depth` and `depth + 1` out of `body`.
pub fn close2(depth: Lvl, body: Term) -> Closure2 {
    Closure2::new(move |x, y| subst_many(&[(depth, x), (depth + 1, y)], &body))
}
