use std::error::Error;
use std::rc::Rc;

use pretty::DocAllocator;
use pretty::termcolor::ColorSpec;

use crate::theme::ThemeExt;

pub type Alloc<'a> = pretty::Arena<'a, ColorSpec>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, ColorSpec>;

/// Operator precedences
pub type Precedence = u32;

/// Terms contain binder closures that have to be opened while printing,
/// so the printed document owns its text and does not borrow from `self`.
pub trait Print {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        Print::print_prec(self, cfg, alloc, 0)
    }

    /// Print with precedence information about the enclosing context.
    ///
    /// * `_prec` The precedence of the surrounding context.
    fn print_prec<'a>(
        &self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        Print::print(self, cfg, alloc)
    }
}

/// Printing that depends on a context, for example the current binder depth.
pub trait PrintInCtx {
    type Ctx;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, ctx: &Self::Ctx, alloc: &'a Alloc<'a>) -> Builder<'a> {
        PrintInCtx::print_in_ctx_prec(self, cfg, ctx, alloc, 0)
    }

    /// Print with precedence information about the enclosing context.
    ///
    /// * `_prec` The precedence of the surrounding context.
    fn print_in_ctx_prec<'a>(
        &self,
        cfg: &PrintCfg,
        ctx: &Self::Ctx,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        PrintInCtx::print_in_ctx(self, cfg, ctx, alloc)
    }
}

impl<T: Print + ?Sized> Print for &T {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>, prec: Precedence) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

impl<T: Print + ?Sized> Print for Rc<T> {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>, prec: Precedence) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

impl<T: Print, E: Error> Print for Result<T, E> {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Ok(x) => x.print(cfg, alloc),
            Err(err) => alloc.error(err.to_string()),
        }
    }

    fn print_prec<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>, prec: Precedence) -> Builder<'a> {
        match self {
            Ok(x) => x.print_prec(cfg, alloc, prec),
            Err(err) => alloc.error(err.to_string()),
        }
    }
}

impl<T: Print> Print for Option<T> {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Some(x) => x.print(cfg, alloc),
            None => alloc.nil(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrintCfg {
    /// The width of the output terminal/device. Width is used for
    /// the insertion of linebreaks.
    pub width: usize,
    /// Whether to print the level of each variable next to its name
    pub de_bruijn: bool,
    /// How many spaces of indentation are used
    pub indent: isize,
    /// Whether to print the arguments a metavariable is applied to
    pub print_spines: bool,
}

impl Default for PrintCfg {
    fn default() -> Self {
        Self { width: crate::DEFAULT_WIDTH, de_bruijn: false, indent: 2, print_spines: true }
    }
}
