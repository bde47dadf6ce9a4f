use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx, theme::ThemeExt, tokens::LAMBDA,
};
use derivative::Derivative;

use super::{Closure, Lvl, Name, Term};

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Lam {
    pub name: Name,
    #[derivative(Debug = "ignore")]
    pub body: Closure,
}

impl From<Lam> for Term {
    fn from(val: Lam) -> Self {
        Term::Lam(val)
    }
}

impl PrintInCtx for Lam {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Lam { name, body } = self;
        let body = body.apply(Term::var(name.clone(), *depth));
        alloc
            .keyword(LAMBDA)
            .append(alloc.text(name.clone()))
            .append(alloc.line())
            .append(body.print_in_ctx(cfg, &(depth + 1), alloc))
            .nest(cfg.indent)
            .group()
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub fun: Rc<Term>,
    pub arg: Rc<Term>,
}

impl App {
    /// The head of an application spine together with its arguments, in order.
    pub fn spine(&self) -> (&Term, Vec<&Term>) {
        let mut args = vec![self.arg.as_ref()];
        let mut head = self.fun.as_ref();
        while let Term::App(App { fun, arg }) = head {
            args.push(arg);
            head = fun;
        }
        args.reverse();
        (head, args)
    }
}

impl From<App> for Term {
    fn from(val: App) -> Self {
        Term::App(val)
    }
}

impl PrintInCtx for App {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let (head, args) = self.spine();
        let args = args.into_iter().map(|arg| arg.print_in_ctx(cfg, depth, alloc));
        head.print_in_ctx(cfg, depth, alloc)
            .append(alloc.line().append(alloc.intersperse(args, alloc.line())).nest(cfg.indent))
            .parens()
            .group()
    }
}
