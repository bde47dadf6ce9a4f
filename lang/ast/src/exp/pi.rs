use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COLON, FORALL, SELF_INST, SELF_TYPE},
};
use derivative::Derivative;

use super::{Closure, Lvl, Name, Term};

/// The dependent function type `∀(x: A) B`.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Pi {
    pub name: Name,
    pub input: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure,
}

impl From<Pi> for Term {
    fn from(val: Pi) -> Self {
        Term::Pi(val)
    }
}

impl PrintInCtx for Pi {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Pi { name, input, body } = self;
        let body = body.apply(Term::var(name.clone(), *depth));
        print_binder(FORALL, name, input, &body, cfg, *depth, alloc)
    }
}

/// The self type `$(x: A) B`, whose body may refer to the inhabitant itself.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct SelfType {
    pub name: Name,
    pub typ: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure,
}

impl From<SelfType> for Term {
    fn from(val: SelfType) -> Self {
        Term::SelfType(val)
    }
}

impl PrintInCtx for SelfType {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let SelfType { name, typ, body } = self;
        let body = body.apply(Term::var(name.clone(), *depth));
        print_binder(SELF_TYPE, name, typ, &body, cfg, *depth, alloc)
    }
}

/// Instantiation `~x` of a term whose type is a [SelfType].
#[derive(Debug, Clone)]
pub struct SelfInst {
    pub exp: Rc<Term>,
}

impl From<SelfInst> for Term {
    fn from(val: SelfInst) -> Self {
        Term::SelfInst(val)
    }
}

impl PrintInCtx for SelfInst {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(SELF_INST).append(self.exp.print_in_ctx(cfg, depth, alloc))
    }
}

fn print_binder<'a>(
    symbol: &'static str,
    name: &str,
    input: &Term,
    body: &Term,
    cfg: &PrintCfg,
    depth: Lvl,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let head = alloc
        .text(name.to_owned())
        .append(COLON)
        .append(alloc.space())
        .append(input.print_in_ctx(cfg, &depth, alloc))
        .parens();
    alloc
        .keyword(symbol)
        .append(head)
        .append(alloc.line())
        .append(body.print_in_ctx(cfg, &(depth + 1), alloc))
        .group()
}
