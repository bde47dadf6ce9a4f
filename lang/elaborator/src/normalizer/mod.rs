//! Reduction to weak head normal form and to full normal form.

use bough_lang_ast::{Book, Fill, Lvl, Term};

use crate::result::EvalResult;

mod normal;
mod output;
mod reduce;

pub use output::*;
pub use reduce::Reducer;

/// When references to global definitions are unfolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// References stay folded.
    Never,
    /// References are unfolded.
    Redex,
    /// References are unfolded. Used for definitional equality and for the
    /// messages of the `log` primitive.
    Full,
}

impl Level {
    pub fn unfolds(self) -> bool {
        self != Level::Never
    }
}

/// Reduce `term` to weak head normal form, emitting log messages to stdout.
pub fn reduce(book: &Book, fill: &Fill, lv: Level, term: &Term) -> EvalResult<Term> {
    Reducer::new(book, fill, &Stdout).whnf(lv, term)
}

/// Reduce `term` to full normal form, emitting log messages to stdout.
pub fn normal(book: &Book, fill: &Fill, lv: Level, term: &Term, depth: Lvl) -> EvalResult<Term> {
    Reducer::new(book, fill, &Stdout).normal(lv, term, depth)
}
