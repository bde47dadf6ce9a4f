use bough_lang_printer::{
    Alloc, Builder, DocAllocator, Print, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COLON, COLONEQ},
};

use crate::{CodeSpan, Lvl, MetaVar, Name, Term};

/// Diagnostics produced during elaboration, in the order they were found.
#[derive(Debug, Clone)]
pub enum Info {
    /// The expected type of a hole, together with the values of its context.
    Found { depth: Lvl, name: Name, goal: Term, ctx: Vec<Term> },
    /// A metavariable received a solution.
    Solved { depth: Lvl, meta: MetaVar, solution: Term },
    /// A type error. `expected` and `actual` are either terms or placeholder
    /// references naming what was expected, e.g. `function`.
    Error { depth: Lvl, span: Option<CodeSpan>, expected: Term, actual: Term, term: Term },
    Print { depth: Lvl, term: Term },
    Vague { message: String },
}

impl Info {
    pub fn is_error(&self) -> bool {
        matches!(self, Info::Error { .. })
    }
}

impl Print for Info {
    fn print<'a>(&self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Info::Found { depth, name, goal, ctx } => {
                let ctx = ctx.iter().map(|term| {
                    alloc.text("- ").append(term.print_in_ctx(cfg, depth, alloc))
                });
                alloc
                    .comment("GOAL")
                    .append(alloc.space())
                    .append(alloc.hole(format!("?{name}")))
                    .append(alloc.space())
                    .append(COLON)
                    .append(alloc.space())
                    .append(goal.print_in_ctx(cfg, depth, alloc))
                    .append(alloc.concat(ctx.map(|line| alloc.hardline().append(line))))
            }
            Info::Solved { depth, meta, solution } => alloc
                .comment("SOLVED")
                .append(alloc.space())
                .append(alloc.hole(meta.to_string()))
                .append(alloc.space())
                .append(COLONEQ)
                .append(alloc.space())
                .append(solution.print_in_ctx(cfg, depth, alloc)),
            Info::Error { depth, span, expected, actual, term } => {
                let location = match span {
                    Some(span) => alloc.space().append(alloc.text(span.to_string())),
                    None => alloc.nil(),
                };
                alloc
                    .error("ERROR")
                    .append(location)
                    .append(alloc.hardline())
                    .append(alloc.text("- expected: "))
                    .append(expected.print_in_ctx(cfg, depth, alloc))
                    .append(alloc.hardline())
                    .append(alloc.text("- detected: "))
                    .append(actual.print_in_ctx(cfg, depth, alloc))
                    .append(alloc.hardline())
                    .append(alloc.text("- origin:   "))
                    .append(term.print_in_ctx(cfg, depth, alloc))
            }
            Info::Print { depth, term } => alloc
                .comment("PRINT")
                .append(alloc.space())
                .append(term.print_in_ctx(cfg, depth, alloc)),
            Info::Vague { message } => alloc.text(message.clone()),
        }
    }
}
