use std::rc::Rc;

use crate::exp::*;

/// The binders in scope, outermost first.
type Scope = Rc<Vec<(Name, Term)>>;

/// Resolve variables and references by name.
///
/// Every binder body is rebuilt so that a [Var] or [Ref] whose name is bound
/// by an enclosing binder becomes the value that binder is applied to.
/// Holes capture the values of all enclosing binders as their context.
///
/// Names are resolved lexically without regard to the book: a binder named
/// like a global definition captures every reference to that definition in
/// its body.
///
/// The elaborator annotates terms with variables of the depth they were
/// checked at; binding turns its output back into closed higher-order syntax.
pub fn bind(term: &Term) -> Term {
    bind_go(term, &Rc::new(Vec::new()))
}

fn lookup(scope: &Scope, name: &str) -> Option<Term> {
    scope.iter().rev().find(|(n, _)| n == name).map(|(_, val)| val.clone())
}

fn extend(scope: &Scope, name: &str, val: Term) -> Scope {
    let mut scope = (**scope).clone();
    scope.push((name.to_owned(), val));
    Rc::new(scope)
}

fn bind_body(name: &Name, body: &Closure, scope: &Scope) -> Closure {
    let name = name.clone();
    let body = body.clone();
    let scope = scope.clone();
    Closure::new(move |x| bind_go(&body.apply(Term::var(name.clone(), 0)), &extend(&scope, &name, x)))
}

fn bind_body2(got: &Name, name: &Name, body: &Closure2, scope: &Scope) -> Closure2 {
    let got = got.clone();
    let name = name.clone();
    let body = body.clone();
    let scope = scope.clone();
    Closure2::new(move |x, y| {
        let opened = body.apply(Term::var(got.clone(), 0), Term::var(name.clone(), 0));
        bind_go(&opened, &extend(&extend(&scope, &got, x), &name, y))
    })
}

fn bind_tele(tele: &Telescope, scope: &Scope) -> Telescope {
    match tele {
        Telescope::Return(ret) => Telescope::Return(Rc::new(bind_go(ret, scope))),
        Telescope::Extend(Extend { name, input, body }) => {
            let input = Rc::new(bind_go(input, scope));
            let name2 = name.clone();
            let body = body.clone();
            let scope = scope.clone();
            Telescope::Extend(Extend {
                name: name.clone(),
                input,
                body: Closure::new(move |x| {
                    bind_tele(&body.apply(Term::var(name2.clone(), 0)), &extend(&scope, &name2, x))
                }),
            })
        }
    }
}

fn bind_go(term: &Term, scope: &Scope) -> Term {
    let go = |t: &Term| bind_go(t, scope);
    let rc = |t: &Rc<Term>| Rc::new(bind_go(t, scope));
    match term {
        Term::Var(Var { name, .. }) | Term::Ref(Ref { name }) => {
            lookup(scope, name).unwrap_or_else(|| term.clone())
        }
        Term::Hole(Hole { name, .. }) => {
            Hole { name: name.clone(), ctx: scope.iter().map(|(_, val)| val.clone()).collect() }
                .into()
        }
        Term::Pi(Pi { name, input, body }) => {
            Pi { name: name.clone(), input: rc(input), body: bind_body(name, body, scope) }.into()
        }
        Term::Lam(Lam { name, body }) => {
            Lam { name: name.clone(), body: bind_body(name, body, scope) }.into()
        }
        Term::SelfType(SelfType { name, typ, body }) => {
            SelfType { name: name.clone(), typ: rc(typ), body: bind_body(name, body, scope) }.into()
        }
        Term::Let(Let { name, val, body }) => {
            Let { name: name.clone(), val: rc(val), body: bind_body(name, body, scope) }.into()
        }
        Term::Use(Use { name, val, body }) => {
            Use { name: name.clone(), val: rc(val), body: bind_body(name, body, scope) }.into()
        }
        Term::Get(Get { got, name, map, key, body }) => Get {
            got: got.clone(),
            name: name.clone(),
            map: rc(map),
            key: rc(key),
            body: bind_body2(got, name, body, scope),
        }
        .into(),
        Term::Put(Put { got, name, map, key, val, body }) => Put {
            got: got.clone(),
            name: name.clone(),
            map: rc(map),
            key: rc(key),
            val: rc(val),
            body: bind_body2(got, name, body, scope),
        }
        .into(),
        Term::Adt(Adt { indices, ctrs, typ }) => Adt {
            indices: indices.iter().map(go).collect(),
            ctrs: ctrs
                .iter()
                .map(|ctr| Ctr { name: ctr.name.clone(), tele: bind_tele(&ctr.tele, scope) })
                .collect(),
            typ: rc(typ),
        }
        .into(),
        Term::App(App { fun, arg }) => App { fun: rc(fun), arg: rc(arg) }.into(),
        Term::Anno(Anno { check, exp, typ }) => {
            Anno { check: *check, exp: rc(exp), typ: rc(typ) }.into()
        }
        Term::SelfInst(SelfInst { exp }) => SelfInst { exp: rc(exp) }.into(),
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
        Term::Op2(Op2 { op, lhs, rhs }) => Op2 { op: *op, lhs: rc(lhs), rhs: rc(rhs) }.into(),
        Term::Switch(Switch { zero, succ }) => Switch { zero: rc(zero), succ: rc(succ) }.into(),
        Term::MapType(MapType { elem }) => MapType { elem: rc(elem) }.into(),
        Term::MapLit(MapLit { entries, default }) => MapLit {
            entries: entries.iter().map(|(key, val)| (*key, go(val))).collect(),
            default: rc(default),
        }
        .into(),
        Term::Meta(Meta { id, spine }) => Meta { id: *id, spine: spine.iter().map(go).collect() }.into(),
        Term::Log(Log { msg, next }) => Log { msg: rc(msg), next: rc(next) }.into(),
        Term::Src(Src { span, exp }) => Src { span: span.clone(), exp: rc(exp) }.into(),
        Term::Lst(items) => Term::Lst(items.iter().map(go).collect()),
        Term::Sub(exp) => (**exp).clone(),
        Term::TypeUniv
        | Term::U64Type
        | Term::F64Type
        | Term::Num(_)
        | Term::Flt(_)
        | Term::Txt(_)
        | Term::Nat(_) => term.clone(),
    }
}
