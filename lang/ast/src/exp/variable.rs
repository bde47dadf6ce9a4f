use bough_lang_printer::{
    Alloc, Builder, DocAllocator, Print, PrintCfg, tokens::LEVEL,
};

use super::{Lvl, Name, Term};

/// A free variable standing for an opened binder.
#[derive(Debug, Clone)]
pub struct Var {
    pub name: Name,
    pub lvl: Lvl,
}

impl From<Var> for Term {
    fn from(val: Var) -> Self {
        Term::Var(val)
    }
}

impl Print for Var {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if cfg.de_bruijn {
            alloc.text(format!("{}{LEVEL}{}", self.name, self.lvl))
        } else {
            alloc.text(self.name.clone())
        }
    }
}

/// A reference to a definition in the book.
#[derive(Debug, Clone)]
pub struct Ref {
    pub name: Name,
}

impl From<Ref> for Term {
    fn from(val: Ref) -> Self {
        Term::Ref(val)
    }
}

impl Print for Ref {
    fn print<'a>(&self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(self.name.clone())
    }
}
