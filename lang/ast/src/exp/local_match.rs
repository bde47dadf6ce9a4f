use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COLON, HASH, LAMBDA, UNDERSCORE},
};

use super::{Lvl, Name, Term};

/// The name of the catch-all case of a [Match].
pub const WILDCARD: &str = "_";

/// A pattern-matching function `λ{ #Zero: z #Succ: s }`.
///
/// Each case body is applied to the fields of the matched constructor. The
/// wildcard case `_`, if present, is applied to the whole scrutinee.
#[derive(Debug, Clone)]
pub struct Match {
    pub cases: Vec<Case>,
}

impl Match {
    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.name == name)
    }

    pub fn wildcard(&self) -> Option<&Case> {
        self.case(WILDCARD)
    }
}

impl From<Match> for Term {
    fn from(val: Match) -> Self {
        Term::Match(val)
    }
}

impl PrintInCtx for Match {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let cases = self.cases.iter().map(|case| {
            let name = if case.name == WILDCARD {
                alloc.text(UNDERSCORE)
            } else {
                alloc.ctor(format!("{HASH}{}", case.name))
            };
            name.append(COLON).append(alloc.space()).append(case.body.print_in_ctx(cfg, depth, alloc))
        });
        print_cases(cases, cfg, alloc)
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: Name,
    pub body: Term,
}

/// Elimination of natural numbers `λ{ 0: z _: s }`.
///
/// `s` receives the predecessor.
#[derive(Debug, Clone)]
pub struct Switch {
    pub zero: Rc<Term>,
    pub succ: Rc<Term>,
}

impl From<Switch> for Term {
    fn from(val: Switch) -> Self {
        Term::Switch(val)
    }
}

impl PrintInCtx for Switch {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let zero = alloc
            .text("0")
            .append(COLON)
            .append(alloc.space())
            .append(self.zero.print_in_ctx(cfg, depth, alloc));
        let succ = alloc
            .text(UNDERSCORE)
            .append(COLON)
            .append(alloc.space())
            .append(self.succ.print_in_ctx(cfg, depth, alloc));
        print_cases(vec![zero, succ], cfg, alloc)
    }
}

fn print_cases<'a, I>(cases: I, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a>
where
    I: IntoIterator<Item = Builder<'a>>,
{
    alloc.keyword(LAMBDA).append(
        alloc
            .line()
            .append(alloc.intersperse(cases, alloc.line()))
            .nest(cfg.indent)
            .append(alloc.line())
            .enclose("{", "}")
            .group(),
    )
}
