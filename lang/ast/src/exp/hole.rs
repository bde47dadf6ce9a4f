use std::fmt;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, Print, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{HOLE, UNDERSCORE},
};

use super::{Lvl, Name, Term};

/// A named goal `?name`. The elaborator reports the expected type of every
/// hole together with `ctx`, the values of the enclosing binders.
#[derive(Debug, Clone)]
pub struct Hole {
    pub name: Name,
    pub ctx: Vec<Term>,
}

impl From<Hole> for Term {
    fn from(val: Hole) -> Self {
        Term::Hole(val)
    }
}

impl Print for Hole {
    fn print<'a>(&self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.hole(format!("{HOLE}{}", self.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaVar {
    pub id: u64,
}

impl fmt::Display for MetaVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{UNDERSCORE}{}", self.id)
    }
}

/// A metavariable applied to the variables it may depend on.
#[derive(Debug, Clone)]
pub struct Meta {
    pub id: MetaVar,
    pub spine: Vec<Term>,
}

impl From<Meta> for Term {
    fn from(val: Meta) -> Self {
        Term::Meta(val)
    }
}

impl PrintInCtx for Meta {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let head = alloc.hole(self.id.to_string());
        if self.spine.is_empty() || !cfg.print_spines {
            return head;
        }
        let args = self.spine.iter().map(|arg| arg.print_in_ctx(cfg, depth, alloc));
        head.append(alloc.space()).append(alloc.intersperse(args, alloc.space())).parens()
    }
}
