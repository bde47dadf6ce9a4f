use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{LOG, SEMI},
};

use super::{Lvl, Term};

/// `log msg; next`: when reduced, prints `msg` if it is a string and continues
/// with `next`.
#[derive(Debug, Clone)]
pub struct Log {
    pub msg: Rc<Term>,
    pub next: Rc<Term>,
}

impl From<Log> for Term {
    fn from(val: Log) -> Self {
        Term::Log(val)
    }
}

impl PrintInCtx for Log {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .keyword(LOG)
            .append(alloc.space())
            .append(self.msg.print_in_ctx(cfg, depth, alloc))
            .append(SEMI)
            .append(alloc.line())
            .append(self.next.print_in_ctx(cfg, depth, alloc))
            .group()
    }
}
