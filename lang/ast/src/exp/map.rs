use std::collections::BTreeMap;
use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COLON, COLONEQ, COMMA, EQ, GET, MAP, PIPE, PUT, SEMI},
};
use derivative::Derivative;

use super::{Closure2, Lvl, Name, Term};

/// `(Map T)`: finite maps from `U64` keys to values of type `T`.
#[derive(Debug, Clone)]
pub struct MapType {
    pub elem: Rc<Term>,
}

impl From<MapType> for Term {
    fn from(val: MapType) -> Self {
        Term::MapType(val)
    }
}

impl PrintInCtx for MapType {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .typ(MAP)
            .append(alloc.space())
            .append(self.elem.print_in_ctx(cfg, depth, alloc))
            .parens()
    }
}

/// `{0: a, 1: b | d}`: absent keys map to the default `d`.
#[derive(Debug, Clone)]
pub struct MapLit {
    pub entries: BTreeMap<u64, Term>,
    pub default: Rc<Term>,
}

impl MapLit {
    pub fn lookup(&self, key: u64) -> &Term {
        self.entries.get(&key).unwrap_or(&self.default)
    }
}

impl From<MapLit> for Term {
    fn from(val: MapLit) -> Self {
        Term::MapLit(val)
    }
}

impl PrintInCtx for MapLit {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let entries = self.entries.iter().map(|(key, val)| {
            alloc
                .text(key.to_string())
                .append(COLON)
                .append(alloc.space())
                .append(val.print_in_ctx(cfg, depth, alloc))
        });
        alloc
            .intersperse(entries, alloc.text(COMMA).append(alloc.line()))
            .append(alloc.line())
            .append(PIPE)
            .append(alloc.space())
            .append(self.default.print_in_ctx(cfg, depth, alloc))
            .enclose("{", "}")
            .group()
    }
}

/// `get got = name@map[key]; body`
///
/// `body` receives the value stored at `key` and the map.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Get {
    pub got: Name,
    pub name: Name,
    pub map: Rc<Term>,
    pub key: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure2,
}

impl From<Get> for Term {
    fn from(val: Get) -> Self {
        Term::Get(val)
    }
}

impl PrintInCtx for Get {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Get { got, name, map, key, body } = self;
        let access = print_access(GET, got, name, map, key, cfg, *depth, alloc);
        print_continue(access, got, name, body, cfg, *depth, alloc)
    }
}

/// `put got = name@map[key] := val; body`
///
/// `body` receives the value previously stored at `key` and the updated map.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Put {
    pub got: Name,
    pub name: Name,
    pub map: Rc<Term>,
    pub key: Rc<Term>,
    pub val: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure2,
}

impl From<Put> for Term {
    fn from(val: Put) -> Self {
        Term::Put(val)
    }
}

impl PrintInCtx for Put {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Put { got, name, map, key, val, body } = self;
        let access = print_access(PUT, got, name, map, key, cfg, *depth, alloc)
            .append(alloc.space())
            .append(COLONEQ)
            .append(alloc.space())
            .append(val.print_in_ctx(cfg, depth, alloc));
        print_continue(access, got, name, body, cfg, *depth, alloc)
    }
}

#[allow(clippy::too_many_arguments)]
fn print_access<'a>(
    keyword: &'static str,
    got: &str,
    name: &str,
    map: &Term,
    key: &Term,
    cfg: &PrintCfg,
    depth: Lvl,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    alloc
        .keyword(keyword)
        .append(alloc.space())
        .append(alloc.text(got.to_owned()))
        .append(alloc.space())
        .append(EQ)
        .append(alloc.space())
        .append(alloc.text(format!("{name}@")))
        .append(map.print_in_ctx(cfg, &depth, alloc))
        .append(key.print_in_ctx(cfg, &depth, alloc).brackets())
}

fn print_continue<'a>(
    access: Builder<'a>,
    got: &str,
    name: &str,
    body: &Closure2,
    cfg: &PrintCfg,
    depth: Lvl,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let body = body.apply(Term::var(got.to_owned(), depth), Term::var(name.to_owned(), depth + 1));
    access
        .append(SEMI)
        .append(alloc.line())
        .append(body.print_in_ctx(cfg, &(depth + 2), alloc))
        .group()
}
