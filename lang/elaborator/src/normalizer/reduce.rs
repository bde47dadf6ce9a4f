use std::rc::Rc;

use log::trace;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use crate::result::{EvalResult, InternalError};

use super::{Level, Output};

/// Reduction against a fixed book and fill.
pub struct Reducer<'a> {
    pub book: &'a Book,
    pub fill: &'a Fill,
    pub out: &'a dyn Output,
}

impl<'a> Reducer<'a> {
    pub fn new(book: &'a Book, fill: &'a Fill, out: &'a dyn Output) -> Self {
        Self { book, fill, out }
    }

    /// Reduce `term` to weak head normal form.
    pub fn whnf(&self, lv: Level, term: &Term) -> EvalResult<Term> {
        let res = self.red(lv, term)?;
        trace!("{} ▷ {}", term.print_trace(), res.print_trace());
        Ok(res)
    }

    pub(super) fn red(&self, lv: Level, term: &Term) -> EvalResult<Term> {
        match term {
            Term::App(App { fun, arg }) => {
                let fun = self.red(lv, fun)?;
                self.app(lv, fun, arg)
            }
            Term::Anno(Anno { exp, .. })
            | Term::SelfInst(SelfInst { exp })
            | Term::Src(Src { exp, .. })
            | Term::Sub(exp) => self.red(lv, exp),
            Term::Ref(Ref { name }) => self.reference(lv, name),
            Term::Let(Let { val, body, .. }) | Term::Use(Use { val, body, .. }) => {
                let val = self.red(lv, val)?;
                self.red(lv, &body.apply(val))
            }
            Term::Op2(Op2 { op, lhs, rhs }) => {
                let lhs = self.red(lv, lhs)?;
                let rhs = self.red(lv, rhs)?;
                self.op2(*op, lhs, rhs)
            }
            Term::Txt(_) | Term::Lst(_) | Term::Nat(_) => match term.unfold_literal() {
                Some(ctor) => Ok(ctor),
                None => Err(InternalError::impossible("literal without constructor form")),
            },
            Term::Meta(Meta { id, spine }) => self.meta(lv, *id, spine.clone()),
            Term::Log(Log { msg, next }) => self.log(lv, msg, next),
            Term::Get(get) => self.get(lv, get),
            Term::Put(put) => self.put(lv, put),
            _ => Ok(term.clone()),
        }
    }

    fn app(&self, lv: Level, fun: Term, arg: &Rc<Term>) -> EvalResult<Term> {
        match fun {
            Term::Lam(Lam { body, .. }) => {
                let arg = self.red(Level::Never, arg)?;
                self.red(lv, &body.apply(arg))
            }
            Term::Match(mat) => {
                let scrutinee = self.red(lv, arg)?;
                self.mat(lv, mat, scrutinee)
            }
            Term::Switch(switch) => {
                let scrutinee = self.red(lv, arg)?;
                self.switch(lv, switch, scrutinee)
            }
            Term::Meta(Meta { id, mut spine }) => {
                spine.push((**arg).clone());
                self.meta(lv, id, spine)
            }
            fun => Ok(App { fun: Rc::new(fun), arg: arg.clone() }.into()),
        }
    }

    fn mat(&self, lv: Level, mat: Match, scrutinee: Term) -> EvalResult<Term> {
        let Term::Ctor(Ctor { name, fields }) = &scrutinee else {
            return Ok(Term::app(mat.into(), scrutinee));
        };
        if let Some(case) = mat.case(name) {
            let args = fields.iter().map(|field| field.exp.clone());
            return self.red(lv, &Term::apps(case.body.clone(), args));
        }
        if let Some(case) = mat.wildcard() {
            return self.red(lv, &Term::app(case.body.clone(), scrutinee.clone()));
        }
        Err(Box::new(InternalError::MissingCase { name: name.clone() }))
    }

    fn switch(&self, lv: Level, switch: Switch, scrutinee: Term) -> EvalResult<Term> {
        let pred = match &scrutinee {
            Term::Num(0) => return self.red(lv, &switch.zero),
            Term::Num(n) => Term::Num(n - 1),
            Term::Op2(Op2 { op: Oper::Add, lhs, rhs }) if is_one(lhs) => (**rhs).clone(),
            Term::Op2(Op2 { op: Oper::Add, lhs, rhs }) if is_one(rhs) => (**lhs).clone(),
            _ => return Ok(Term::app(switch.into(), scrutinee)),
        };
        self.red(lv, &Term::app((*switch.succ).clone(), pred))
    }

    fn meta(&self, lv: Level, id: MetaVar, spine: Vec<Term>) -> EvalResult<Term> {
        match self.fill.get(id) {
            Some(solution) => self.red(lv, &Term::apps(solution.clone(), spine)),
            None => Ok(Meta { id, spine }.into()),
        }
    }

    fn reference(&self, lv: Level, name: &str) -> EvalResult<Term> {
        if lv.unfolds() {
            if let Some(def) = self.book.get(name) {
                return self.red(lv, def);
            }
        }
        Ok(Term::reference(name))
    }

    fn op2(&self, op: Oper, lhs: Term, rhs: Term) -> EvalResult<Term> {
        let folded = match (&lhs, &rhs) {
            (Term::Num(x), Term::Num(y)) => fold_u64(op, *x, *y),
            (Term::Flt(x), Term::Flt(y)) => fold_f64(op, *x, *y)?,
            _ => None,
        };
        Ok(folded.unwrap_or_else(|| Term::op2(op, lhs, rhs)))
    }

    /// Emits the message if it reduces to a list of character codes, then
    /// continues with `next`.
    fn log(&self, lv: Level, msg: &Term, next: &Term) -> EvalResult<Term> {
        let mut text = String::new();
        let mut msg = msg.clone();
        loop {
            match self.red(Level::Full, &msg)? {
                Term::Ctor(Ctor { name, fields }) if name == CONS && fields.len() == 2 => {
                    let code = match self.red(lv, &fields[0].exp)? {
                        Term::Num(code) => u32::try_from(code).ok().and_then(char::from_u32),
                        _ => None,
                    };
                    let Some(c) = code else { break };
                    text.push(c);
                    msg = fields[1].exp.clone();
                }
                Term::Ctor(Ctor { name, fields }) if name == NIL && fields.is_empty() => {
                    self.out.emit(&text);
                    break;
                }
                _ => break,
            }
        }
        self.red(lv, next)
    }

    fn get(&self, lv: Level, get: &Get) -> EvalResult<Term> {
        let Get { got, name, map, key, body } = get;
        let map = self.red(lv, map)?;
        let key = self.red(lv, key)?;
        if let (Term::MapLit(lit), Term::Num(key)) = (&map, &key) {
            let val = lit.lookup(*key).clone();
            return self.red(lv, &body.apply(val, map.clone()));
        }
        Ok(Get {
            got: got.clone(),
            name: name.clone(),
            map: Rc::new(map),
            key: Rc::new(key),
            body: body.clone(),
        }
        .into())
    }

    fn put(&self, lv: Level, put: &Put) -> EvalResult<Term> {
        let Put { got, name, map, key, val, body } = put;
        let map = self.red(lv, map)?;
        let key = self.red(lv, key)?;
        if let (Term::MapLit(lit), Term::Num(key)) = (&map, &key) {
            let old = lit.lookup(*key).clone();
            let mut entries = lit.entries.clone();
            entries.insert(*key, (**val).clone());
            let map = MapLit { entries, default: lit.default.clone() };
            return self.red(lv, &body.apply(old, map.into()));
        }
        Ok(Put {
            got: got.clone(),
            name: name.clone(),
            map: Rc::new(map),
            key: Rc::new(key),
            val: val.clone(),
            body: body.clone(),
        }
        .into())
    }
}

fn is_one(term: &Term) -> bool {
    matches!(term.strip_src(), Term::Num(1))
}

fn bool_to_num(b: bool) -> Term {
    Term::Num(u64::from(b))
}

/// Fold an operator over two unsigned literals. Arithmetic wraps around;
/// division by zero does not fold.
fn fold_u64(op: Oper, x: u64, y: u64) -> Option<Term> {
    let shift = |f: fn(u64, u32) -> u64| match u32::try_from(y) {
        Ok(y) if y < u64::BITS => f(x, y),
        _ => 0,
    };
    let n = match op {
        Oper::Add => x.wrapping_add(y),
        Oper::Sub => x.wrapping_sub(y),
        Oper::Mul => x.wrapping_mul(y),
        Oper::Div => x.checked_div(y)?,
        Oper::Mod => x.checked_rem(y)?,
        Oper::Eq => return Some(bool_to_num(x == y)),
        Oper::Ne => return Some(bool_to_num(x != y)),
        Oper::Lt => return Some(bool_to_num(x < y)),
        Oper::Gt => return Some(bool_to_num(x > y)),
        Oper::Lte => return Some(bool_to_num(x <= y)),
        Oper::Gte => return Some(bool_to_num(x >= y)),
        Oper::And => x & y,
        Oper::Or => x | y,
        Oper::Xor => x ^ y,
        Oper::Lsh => shift(|a: u64, b: u32| a << b),
        Oper::Rsh => shift(|a: u64, b: u32| a >> b),
    };
    Some(Term::Num(n))
}

fn fold_f64(op: Oper, x: f64, y: f64) -> EvalResult<Option<Term>> {
    if op.is_bitwise() {
        return Err(Box::new(InternalError::FloatBitwise { op }));
    }
    let res = match op {
        Oper::Add => Term::Flt(x + y),
        Oper::Sub => Term::Flt(x - y),
        Oper::Mul => Term::Flt(x * y),
        Oper::Div => Term::Flt(x / y),
        Oper::Mod => Term::Flt(x % y),
        Oper::Eq => bool_to_num(x == y),
        Oper::Ne => bool_to_num(x != y),
        Oper::Lt => bool_to_num(x < y),
        Oper::Gt => bool_to_num(x > y),
        Oper::Lte => bool_to_num(x <= y),
        Oper::Gte => bool_to_num(x >= y),
        Oper::And | Oper::Or | Oper::Xor | Oper::Lsh | Oper::Rsh => return Ok(None),
    };
    Ok(Some(res))
}

#[cfg(test)]
mod test {
    use super::super::Captured;
    use super::*;

    fn whnf(book: &Book, term: &Term) -> Term {
        Reducer::new(book, &Fill::new(), &Captured::new()).whnf(Level::Redex, term).unwrap()
    }

    fn num(term: &Term) -> u64 {
        match term {
            Term::Num(n) => *n,
            _ => panic!("expected a number"),
        }
    }

    #[test]
    fn beta_reduction() {
        let id = Term::lam("x", |x| x);
        assert_eq!(num(&whnf(&Book::new(), &Term::app(id, Term::Num(5)))), 5);
    }

    #[test]
    fn references_unfold_only_above_never() {
        let book: Book = [("five", Term::Num(5))].into_iter().collect();
        let five = Term::reference("five");
        assert_eq!(num(&whnf(&book, &five)), 5);
        let folded = Reducer::new(&book, &Fill::new(), &Captured::new())
            .whnf(Level::Never, &five)
            .unwrap();
        assert!(matches!(folded, Term::Ref(_)));
    }

    #[test]
    fn undefined_reference_is_stuck() {
        assert!(matches!(whnf(&Book::new(), &Term::reference("nope")), Term::Ref(_)));
    }

    #[test]
    fn match_selects_case_by_name() {
        let mat: Term = Match {
            cases: vec![
                Case { name: ZERO.to_owned(), body: Term::Num(0) },
                Case { name: SUCC.to_owned(), body: Term::lam("prev", |_| Term::Num(1)) },
            ],
        }
        .into();
        assert_eq!(num(&whnf(&Book::new(), &Term::app(mat.clone(), Term::Nat(0)))), 0);
        assert_eq!(num(&whnf(&Book::new(), &Term::app(mat, Term::Nat(3)))), 1);
    }

    #[test]
    fn match_falls_back_to_wildcard() {
        let mat: Term = Match {
            cases: vec![Case { name: WILDCARD.to_owned(), body: Term::lam("n", |_| Term::Num(7)) }],
        }
        .into();
        assert_eq!(num(&whnf(&Book::new(), &Term::app(mat, Term::Nat(2)))), 7);
    }

    #[test]
    fn match_without_case_is_internal_error() {
        let mat: Term = Match { cases: vec![Case { name: ZERO.to_owned(), body: Term::Num(0) }] }.into();
        let err = Reducer::new(&Book::new(), &Fill::new(), &Captured::new())
            .whnf(Level::Redex, &Term::app(mat, Term::Nat(1)))
            .unwrap_err();
        assert_eq!(*err, InternalError::MissingCase { name: SUCC.to_owned() });
    }

    #[test]
    fn match_on_variable_is_stuck() {
        let mat: Term = Match { cases: vec![Case { name: ZERO.to_owned(), body: Term::Num(0) }] }.into();
        let stuck = whnf(&Book::new(), &Term::app(mat, Term::var("x", 0)));
        assert!(matches!(stuck, Term::App(_)));
    }

    #[test]
    fn switch_on_literals_and_successors() {
        let switch: Term = Switch {
            zero: Rc::new(Term::Num(100)),
            succ: Rc::new(Term::lam("n", |n| Term::op2(Oper::Add, n, Term::Num(1)))),
        }
        .into();
        let book = Book::new();
        assert_eq!(num(&whnf(&book, &Term::app(switch.clone(), Term::Num(0)))), 100);
        assert_eq!(num(&whnf(&book, &Term::app(switch.clone(), Term::Num(4)))), 4);
        let succ = Term::op2(Oper::Add, Term::Num(1), Term::var("k", 0));
        let res = whnf(&book, &Term::app(switch.clone(), succ));
        assert!(matches!(res, Term::Op2(Op2 { op: Oper::Add, .. })));
        let stuck = whnf(&book, &Term::app(switch, Term::var("k", 0)));
        assert!(matches!(stuck, Term::App(_)));
    }

    #[test]
    fn get_sees_old_value_and_map() {
        let map: Term = MapLit {
            entries: [(0, Term::Num(10)), (1, Term::Num(20))].into_iter().collect(),
            default: Rc::new(Term::Num(0)),
        }
        .into();
        let get: Term = Get {
            got: "v".to_owned(),
            name: "m".to_owned(),
            map: Rc::new(map),
            key: Rc::new(Term::Num(1)),
            body: Closure2::new(|v, m| Term::app(Term::app(Term::reference("pair"), v), m)),
        }
        .into();
        let Term::App(App { fun, arg }) = whnf(&Book::new(), &get) else { panic!() };
        let Term::App(App { arg: got, .. }) = &*fun else { panic!() };
        assert_eq!(num(got), 20);
        let Term::MapLit(lit) = &*arg else { panic!() };
        assert_eq!(lit.entries.len(), 2);
        assert_eq!(num(lit.lookup(1)), 20);
    }

    #[test]
    fn put_updates_map() {
        let map: Term =
            MapLit { entries: Default::default(), default: Rc::new(Term::Num(3)) }.into();
        let put: Term = Put {
            got: "old".to_owned(),
            name: "m".to_owned(),
            map: Rc::new(map),
            key: Rc::new(Term::Num(4)),
            val: Rc::new(Term::Num(9)),
            body: Closure2::new(|old, m| Term::app(Term::app(Term::reference("pair"), old), m)),
        }
        .into();
        let Term::App(App { fun, arg }) = whnf(&Book::new(), &put) else { panic!() };
        let Term::App(App { arg: old, .. }) = &*fun else { panic!() };
        assert_eq!(num(old), 3);
        let Term::MapLit(lit) = &*arg else { panic!() };
        assert_eq!(num(lit.lookup(4)), 9);
    }

    #[test]
    fn operators_fold() {
        let book = Book::new();
        let op = |op, x, y| whnf(&book, &Term::op2(op, Term::Num(x), Term::Num(y)));
        assert_eq!(num(&op(Oper::Add, u64::MAX, 1)), 0);
        assert_eq!(num(&op(Oper::Lt, 1, 2)), 1);
        assert_eq!(num(&op(Oper::Lsh, 1, 64)), 0);
        assert!(matches!(op(Oper::Div, 1, 0), Term::Op2(_)));
        let cmp = whnf(&book, &Term::op2(Oper::Gte, Term::Flt(1.5), Term::Flt(0.5)));
        assert_eq!(num(&cmp), 1);
    }

    #[test]
    fn float_bitwise_is_internal_error() {
        let err = Reducer::new(&Book::new(), &Fill::new(), &Captured::new())
            .whnf(Level::Redex, &Term::op2(Oper::Xor, Term::Flt(1.0), Term::Flt(2.0)))
            .unwrap_err();
        assert_eq!(*err, InternalError::FloatBitwise { op: Oper::Xor });
    }

    #[test]
    fn mixed_operands_are_stuck() {
        let res = whnf(&Book::new(), &Term::op2(Oper::Add, Term::Num(3), Term::Flt(1.5)));
        assert!(matches!(res, Term::Op2(_)));
    }

    #[test]
    fn solved_meta_is_replaced() {
        let mut fill = Fill::new();
        fill.insert(MetaVar { id: 0 }, Term::lam("x", |x| x));
        let term = Term::app(Term::meta(0), Term::Num(8));
        let res = Reducer::new(&Book::new(), &fill, &Captured::new())
            .whnf(Level::Redex, &term)
            .unwrap();
        assert_eq!(num(&res), 8);
        let unsolved = whnf(&Book::new(), &term);
        assert!(matches!(unsolved, Term::Meta(Meta { ref spine, .. }) if spine.len() == 1));
    }

    #[test]
    fn log_emits_text_in_order() {
        let out = Captured::new();
        let term = Term::log(Term::txt("a"), Term::log(Term::txt("b"), Term::Num(1)));
        let res = Reducer::new(&Book::new(), &Fill::new(), &out).whnf(Level::Redex, &term).unwrap();
        assert_eq!(num(&res), 1);
        assert_eq!(out.lines(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn log_skips_improper_messages() {
        let out = Captured::new();
        let msg = Term::ctor(CONS, vec![(ITEM, Term::Num(104)), (REST, Term::var("t", 0))]);
        let res = Reducer::new(&Book::new(), &Fill::new(), &out)
            .whnf(Level::Redex, &Term::log(msg, Term::Num(2)))
            .unwrap();
        assert_eq!(num(&res), 2);
        assert!(out.lines().is_empty());
    }
}
