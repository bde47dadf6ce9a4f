use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx, tokens::COLON,
};

use super::{Lvl, Term};

/// Type annotation `{exp: typ}`.
///
/// The elaborator wraps every term it checked in an unchecked annotation
/// carrying the computed type.
#[derive(Debug, Clone)]
pub struct Anno {
    /// Whether inference has to check `exp` against `typ`. When `false` the
    /// annotation is trusted.
    pub check: bool,
    pub exp: Rc<Term>,
    pub typ: Rc<Term>,
}

impl From<Anno> for Term {
    fn from(val: Anno) -> Self {
        Term::Anno(val)
    }
}

impl PrintInCtx for Anno {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.exp
            .print_in_ctx(cfg, depth, alloc)
            .append(COLON)
            .append(alloc.line())
            .append(self.typ.print_in_ctx(cfg, depth, alloc))
            .nest(cfg.indent)
            .group()
            .enclose("{", "}")
    }
}
