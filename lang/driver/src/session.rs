use std::rc::Rc;

use log::debug;

use bough_lang_ast::*;
use bough_lang_elaborator::{do_annotate, Ctx, Output, Stdout};

use crate::cache::Cache;
use crate::config::Config;
use crate::dependency_graph::DependencyGraph;
use crate::result::{DriverError, DriverResult};

/// An elaborated definition.
#[derive(Debug, Clone)]
pub struct Annotated {
    /// The definition with the types of its subterms attached
    pub term: Term,
    /// The metavariable solutions found while elaborating it
    pub fill: Fill,
}

impl Annotated {
    /// Metavariables of the elaborated term which have no solution, each
    /// listed once.
    pub fn unresolved_metas(&self) -> Vec<MetaVar> {
        let mut out: Vec<MetaVar> = Vec::new();
        for meta in metas(&self.term) {
            if !self.fill.contains(meta) && !out.contains(&meta) {
                out.push(meta);
            }
        }
        out
    }
}

/// The outcome of checking one definition.
#[derive(Debug, Clone)]
pub struct Report {
    pub name: Name,
    pub result: DriverResult<Annotated>,
    /// Goals, solutions and errors found while checking, in order
    pub info: Vec<Info>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A book of definitions which are checked on demand.
///
/// Every definition is elaborated on its own, with a fresh elaboration state.
/// A failing definition does not affect the others. Results are cached until
/// the definition or one of its dependencies is redefined.
pub struct Session {
    book: Rc<Book>,
    pub config: Config,
    output: Rc<dyn Output>,
    deps: DependencyGraph,
    reports: Cache<Report>,
}

impl Session {
    pub fn new(book: Book) -> Self {
        let deps = DependencyGraph::from_book(&book);
        Self {
            book: Rc::new(book),
            config: Config::default(),
            output: Rc::new(Stdout),
            deps,
            reports: Cache::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Send the messages of the `log` primitive to `output`.
    pub fn with_output(mut self, output: Rc<dyn Output>) -> Self {
        self.output = output;
        self
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Add or replace a definition.
    pub fn define(&mut self, name: impl Into<Name>, def: Term) {
        let name = name.into();
        self.deps.insert(name.clone(), get_deps(&def));
        for stale in self.deps.reverse_dependencies(&name) {
            debug!("Invalidating {stale}");
            self.reports.invalidate(stale);
        }
        Rc::make_mut(&mut self.book).insert(name, def);
    }

    /// Check the definition `name`.
    pub fn check(&mut self, name: &str) -> Report {
        match self.reports.get_unless_stale(name) {
            Some(report) => {
                debug!("Found report in cache: {name}");
                report.clone()
            }
            None => self.recompute_report(name),
        }
    }

    /// Check every definition, each after the definitions it depends on.
    pub fn check_book(&mut self) -> Vec<Report> {
        self.deps.topo_order().iter().map(|name| self.check(name)).collect()
    }

    /// Elaborate the definition `name`.
    pub fn annotate(&mut self, name: &str) -> DriverResult<Annotated> {
        self.check(name).result
    }

    fn recompute_report(&mut self, name: &str) -> Report {
        debug!("Recomputing report for: {name}");
        let mut ctx = Ctx::new(self.book.clone()).with_output(self.output.clone());
        let result = self.elaborate(&mut ctx, name);
        let report = Report { name: name.to_owned(), result, info: ctx.info };
        self.reports.insert(name.to_owned(), report.clone());
        report
    }

    fn elaborate(&self, ctx: &mut Ctx, name: &str) -> DriverResult<Annotated> {
        let Some(def) = self.book.get(name) else {
            return Err(DriverError::UndefinedDefinition { name: name.to_owned() });
        };
        let (term, fill) = do_annotate(ctx, &gen_metas(def))
            .map_err(|err| DriverError::Elaboration { name: name.to_owned(), err })?;
        let annotated = Annotated { term, fill };
        let unresolved = annotated.unresolved_metas();
        if self.config.report_unresolved && !unresolved.is_empty() {
            return Err(DriverError::UnresolvedMetas { name: name.to_owned(), metas: unresolved });
        }
        Ok(annotated)
    }
}
