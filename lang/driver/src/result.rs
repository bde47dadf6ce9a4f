use miette::Diagnostic;
use thiserror::Error;

use bough_lang_ast::{MetaVar, Name};
use bough_lang_elaborator::ElabError;

pub type DriverResult<T = ()> = Result<T, DriverError>;

#[derive(Error, Diagnostic, Debug, Clone)]
pub enum DriverError {
    #[error("The book contains no definition named {name}")]
    #[diagnostic(code("D-001"))]
    UndefinedDefinition { name: Name },
    #[error("Elaboration of {name} failed")]
    #[diagnostic(code("D-002"))]
    Elaboration {
        name: Name,
        #[source]
        #[diagnostic_source]
        err: ElabError,
    },
    #[error("{name} elaborated with {} unresolved metavariables", .metas.len())]
    #[diagnostic(code("D-003"), help("Annotate the arguments the metavariables stand for."))]
    UnresolvedMetas { name: Name, metas: Vec<MetaVar> },
}

impl DriverError {
    pub fn as_elab_error(&self) -> Option<&ElabError> {
        match self {
            DriverError::Elaboration { err, .. } => Some(err),
            _ => None,
        }
    }
}
