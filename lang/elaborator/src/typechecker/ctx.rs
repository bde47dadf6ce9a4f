//! Elaboration state
//!
//! Threads the book, the metavariable solutions, the queue of suspended
//! checks and the diagnostic log through one elaboration.

use std::rc::Rc;

use derivative::Derivative;
use log::debug;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use crate::normalizer::{Level, Output, Reducer, Stdout};
use crate::result::{ElabError, TcResult};

/// Stands for the type of a suspended check. It is never solved.
pub const PLACEHOLDER: MetaVar = MetaVar { id: u64::MAX };

/// Whether nested checks run immediately or are deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Defer the checks of application arguments until the next successful
    /// comparison, so that metavariables get solved first.
    Suspend,
    /// Run every check immediately.
    Resolve,
}

/// A deferred `term ⇐ typ` judgement.
#[derive(Debug, Clone)]
pub struct Check {
    pub span: Option<CodeSpan>,
    pub term: Term,
    pub typ: Term,
    pub depth: Lvl,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Ctx {
    /// Global definitions
    pub book: Rc<Book>,
    /// Metavariable solutions found so far
    pub fill: Fill,
    /// Checks suspended in [Mode::Suspend]
    pub checks: Vec<Check>,
    /// Diagnostics, in the order they were found
    pub info: Vec<Info>,
    pub mode: Mode,
    /// Receives the messages of the `log` primitive
    #[derivative(Debug = "ignore")]
    output: Rc<dyn Output>,
}

impl Ctx {
    pub fn new(book: Rc<Book>) -> Self {
        Self {
            book,
            fill: Fill::new(),
            checks: Vec::new(),
            info: Vec::new(),
            mode: Mode::Resolve,
            output: Rc::new(Stdout),
        }
    }

    pub fn with_output(mut self, output: Rc<dyn Output>) -> Self {
        self.output = output;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn reducer(&self) -> Reducer<'_> {
        Reducer::new(&self.book, &self.fill, self.output.as_ref())
    }

    pub fn whnf(&self, lv: Level, term: &Term) -> TcResult<Term> {
        Ok(self.reducer().whnf(lv, term)?)
    }

    pub fn normal(&self, lv: Level, term: &Term, depth: Lvl) -> TcResult<Term> {
        Ok(self.reducer().normal(lv, term, depth)?)
    }

    pub fn log(&mut self, info: Info) {
        self.info.push(info);
    }

    pub fn suspend(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Remove all suspended checks.
    pub fn take_suspended(&mut self) -> Vec<Check> {
        std::mem::take(&mut self.checks)
    }

    /// Record the solution of a metavariable.
    pub fn solve(&mut self, meta: MetaVar, solution: Term, depth: Lvl) {
        debug!("Solved {meta} := {}", solution.print_trace());
        self.fill.insert(meta, solution.clone());
        self.log(Info::Solved { depth, meta, solution });
    }

    /// Log `info` and abort with `err`.
    pub fn fail<T>(&mut self, info: Info, err: impl Into<ElabError>) -> TcResult<T> {
        self.log(info);
        Err(err.into())
    }

    /// Log a type error and abort with `err`.
    pub fn error<T>(
        &mut self,
        span: &Option<CodeSpan>,
        expected: Term,
        actual: Term,
        term: &Term,
        depth: Lvl,
        err: impl Into<ElabError>,
    ) -> TcResult<T> {
        let info =
            Info::Error { depth, span: span.clone(), expected, actual, term: term.clone() };
        self.fail(info, err)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Info> {
        self.info.iter().filter(|info| info.is_error())
    }
}
