use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{EQ, LET, SEMI, USE},
};
use derivative::Derivative;

use super::{Closure, Lvl, Name, Term};

/// `let x = val; body`
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Let {
    pub name: Name,
    pub val: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure,
}

impl From<Let> for Term {
    fn from(val: Let) -> Self {
        Term::Let(val)
    }
}

impl PrintInCtx for Let {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        print_local(LET, &self.name, &self.val, &self.body, cfg, *depth, alloc)
    }
}

/// `use x = val; body`
///
/// Unlike [Let], the value is substituted into the body before the body is
/// checked.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Use {
    pub name: Name,
    pub val: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure,
}

impl From<Use> for Term {
    fn from(val: Use) -> Self {
        Term::Use(val)
    }
}

impl PrintInCtx for Use {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        print_local(USE, &self.name, &self.val, &self.body, cfg, *depth, alloc)
    }
}

fn print_local<'a>(
    keyword: &'static str,
    name: &str,
    val: &Term,
    body: &Closure,
    cfg: &PrintCfg,
    depth: Lvl,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let body = body.apply(Term::var(name.to_owned(), depth));
    alloc
        .keyword(keyword)
        .append(alloc.space())
        .append(alloc.text(name.to_owned()))
        .append(alloc.space())
        .append(EQ)
        .append(alloc.space())
        .append(val.print_in_ctx(cfg, &depth, alloc))
        .append(SEMI)
        .append(alloc.line())
        .append(body.print_in_ctx(cfg, &(depth + 1), alloc))
        .group()
}
