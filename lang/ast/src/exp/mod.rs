use std::rc::Rc;

use bough_lang_printer::{Alloc, Builder, Print, PrintCfg, PrintInCtx};

mod adt;
mod anno;
mod closure;
mod hole;
mod lam;
mod literal;
mod local_let;
mod local_match;
mod log;
mod map;
mod pi;
mod src;
mod telescope;
mod variable;

pub use adt::*;
pub use anno::*;
pub use closure::*;
pub use hole::*;
pub use lam::*;
pub use literal::*;
pub use local_let::*;
pub use local_match::*;
pub use log::*;
pub use map::*;
pub use pi::*;
pub use src::*;
pub use telescope::*;
pub use variable::*;

pub type Name = String;

/// The de Bruijn level of a binder, counted from the outermost binder.
pub type Lvl = usize;

/// Terms of the calculus.
///
/// Binders hold [Closure]s (higher-order abstract syntax). All terms are
/// immutable and cheap to clone.
#[derive(Debug, Clone)]
pub enum Term {
    /// `∀(x: A) B`
    Pi(Pi),
    /// `λx b`
    Lam(Lam),
    App(App),
    /// `{x: T}`
    Anno(Anno),
    /// `$(x: A) B`
    SelfType(SelfType),
    /// `~x`
    SelfInst(SelfInst),
    Adt(Adt),
    Ctor(Ctor),
    Match(Match),
    Ref(Ref),
    Let(Let),
    Use(Use),
    /// `*`
    TypeUniv,
    U64Type,
    F64Type,
    Num(u64),
    Flt(f64),
    Op2(Op2),
    Switch(Switch),
    MapType(MapType),
    MapLit(MapLit),
    Get(Get),
    Put(Put),
    Hole(Hole),
    Meta(Meta),
    Log(Log),
    Var(Var),
    Src(Src),
    Txt(String),
    Lst(Vec<Term>),
    Nat(u64),
    /// Marks a term that was substituted under a binder. Substitution removes
    /// the marker when it traverses the body again, so substituted values are
    /// never traversed twice.
    Sub(Rc<Term>),
}

impl Term {
    pub fn pi(name: impl Into<Name>, input: Term, body: impl Fn(Term) -> Term + 'static) -> Term {
        Pi { name: name.into(), input: Rc::new(input), body: Closure::new(body) }.into()
    }

    pub fn lam(name: impl Into<Name>, body: impl Fn(Term) -> Term + 'static) -> Term {
        Lam { name: name.into(), body: Closure::new(body) }.into()
    }

    pub fn app(fun: Term, arg: Term) -> Term {
        App { fun: Rc::new(fun), arg: Rc::new(arg) }.into()
    }

    /// Apply `fun` to every argument in order.
    pub fn apps(fun: Term, args: impl IntoIterator<Item = Term>) -> Term {
        args.into_iter().fold(fun, Term::app)
    }

    /// An annotation which is checked during inference.
    pub fn anno(exp: Term, typ: Term) -> Term {
        Anno { check: true, exp: Rc::new(exp), typ: Rc::new(typ) }.into()
    }

    /// An annotation which is trusted during inference.
    pub fn trusted(exp: Term, typ: Term) -> Term {
        Anno { check: false, exp: Rc::new(exp), typ: Rc::new(typ) }.into()
    }

    pub fn self_type(
        name: impl Into<Name>,
        typ: Term,
        body: impl Fn(Term) -> Term + 'static,
    ) -> Term {
        SelfType { name: name.into(), typ: Rc::new(typ), body: Closure::new(body) }.into()
    }

    pub fn self_inst(exp: Term) -> Term {
        SelfInst { exp: Rc::new(exp) }.into()
    }

    pub fn ctor(name: impl Into<Name>, fields: Vec<(&str, Term)>) -> Term {
        let fields = fields
            .into_iter()
            .map(|(name, exp)| Field { name: Some(name.to_owned()), exp })
            .collect();
        Ctor { name: name.into(), fields }.into()
    }

    pub fn reference(name: impl Into<Name>) -> Term {
        Ref { name: name.into() }.into()
    }

    pub fn var(name: impl Into<Name>, lvl: Lvl) -> Term {
        Var { name: name.into(), lvl }.into()
    }

    pub fn let_in(name: impl Into<Name>, val: Term, body: impl Fn(Term) -> Term + 'static) -> Term {
        Let { name: name.into(), val: Rc::new(val), body: Closure::new(body) }.into()
    }

    pub fn use_in(name: impl Into<Name>, val: Term, body: impl Fn(Term) -> Term + 'static) -> Term {
        Use { name: name.into(), val: Rc::new(val), body: Closure::new(body) }.into()
    }

    pub fn op2(op: Oper, lhs: Term, rhs: Term) -> Term {
        Op2 { op, lhs: Rc::new(lhs), rhs: Rc::new(rhs) }.into()
    }

    pub fn hole(name: impl Into<Name>) -> Term {
        Hole { name: name.into(), ctx: Vec::new() }.into()
    }

    pub fn meta(id: u64) -> Term {
        Meta { id: MetaVar { id }, spine: Vec::new() }.into()
    }

    pub fn txt(text: impl Into<String>) -> Term {
        Term::Txt(text.into())
    }

    pub fn log(msg: Term, next: Term) -> Term {
        Log { msg: Rc::new(msg), next: Rc::new(next) }.into()
    }

    pub fn src(span: CodeSpan, exp: Term) -> Term {
        Src { span, exp: Rc::new(exp) }.into()
    }

    /// Remove every enclosing source span.
    pub fn strip_src(&self) -> &Term {
        match self {
            Term::Src(Src { exp, .. }) => exp.strip_src(),
            other => other,
        }
    }
}

impl Print for Term {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_in_ctx(cfg, &0, alloc)
    }
}

impl PrintInCtx for Term {
    /// The number of binders we are under.
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Term::Pi(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Lam(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::App(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Anno(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::SelfType(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::SelfInst(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Adt(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Ctor(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Match(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Ref(e) => e.print(cfg, alloc),
            Term::Let(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Use(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::TypeUniv => literal::print_type_univ(alloc),
            Term::U64Type => literal::print_u64_type(alloc),
            Term::F64Type => literal::print_f64_type(alloc),
            Term::Num(n) => literal::print_num(*n, alloc),
            Term::Flt(x) => literal::print_flt(*x, alloc),
            Term::Op2(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Switch(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::MapType(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::MapLit(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Get(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Put(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Hole(e) => e.print(cfg, alloc),
            Term::Meta(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Log(e) => e.print_in_ctx(cfg, depth, alloc),
            Term::Var(e) => e.print(cfg, alloc),
            Term::Src(e) => e.exp.print_in_ctx(cfg, depth, alloc),
            Term::Txt(text) => literal::print_txt(text, alloc),
            Term::Lst(items) => literal::print_lst(items, cfg, depth, alloc),
            Term::Nat(n) => literal::print_nat(*n, alloc),
            Term::Sub(e) => e.print_in_ctx(cfg, depth, alloc),
        }
    }
}
