use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COLON, HASH},
};

use super::{Lvl, Name, Telescope, Term};

/// An algebraic datatype instantiated at some indices.
///
/// Indexed families are functions returning an `Adt`, e.g.
/// `λn #[n]{ ... }`, and the constructors' telescopes end in the family
/// applied to the indices they produce.
#[derive(Debug, Clone)]
pub struct Adt {
    pub indices: Vec<Term>,
    /// Constructor names are unique within one datatype.
    pub ctrs: Vec<Ctr>,
    /// The datatype itself as the user refers to it, e.g. `(Vec A n)`.
    pub typ: Rc<Term>,
}

impl Adt {
    pub fn ctr(&self, name: &str) -> Option<&Ctr> {
        self.ctrs.iter().find(|ctr| ctr.name == name)
    }
}

impl From<Adt> for Term {
    fn from(val: Adt) -> Self {
        Term::Adt(val)
    }
}

impl PrintInCtx for Adt {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let indices = self.indices.iter().map(|idx| idx.print_in_ctx(cfg, depth, alloc));
        let ctrs = self.ctrs.iter().map(|ctr| {
            alloc.ctor(format!("{HASH}{}", ctr.name)).append(ctr.tele.print_in_ctx(cfg, depth, alloc))
        });
        alloc
            .text(HASH)
            .append(alloc.intersperse(indices, alloc.space()).brackets())
            .append(
                alloc
                    .line()
                    .append(alloc.intersperse(ctrs, alloc.line()))
                    .nest(cfg.indent)
                    .append(alloc.line())
                    .enclose("{", "}")
                    .group(),
            )
    }
}

/// A constructor signature inside an [Adt].
#[derive(Debug, Clone)]
pub struct Ctr {
    pub name: Name,
    pub tele: Telescope,
}

/// A constructor value `#Name{a b}`.
#[derive(Debug, Clone)]
pub struct Ctor {
    pub name: Name,
    pub fields: Vec<Field>,
}

impl From<Ctor> for Term {
    fn from(val: Ctor) -> Self {
        Term::Ctor(val)
    }
}

impl PrintInCtx for Ctor {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let fields = self.fields.iter().map(|field| field.print_in_ctx(cfg, depth, alloc));
        alloc
            .ctor(format!("{HASH}{}", self.name))
            .append(alloc.intersperse(fields, alloc.space()).enclose("{", "}"))
    }
}

/// A constructor argument, optionally naming the parameter it is given for.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: Option<Name>,
    pub exp: Term,
}

impl PrintInCtx for Field {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match &self.name {
            Some(name) => alloc
                .text(name.clone())
                .append(COLON)
                .append(alloc.space())
                .append(self.exp.print_in_ctx(cfg, depth, alloc)),
            None => self.exp.print_in_ctx(cfg, depth, alloc),
        }
    }
}
