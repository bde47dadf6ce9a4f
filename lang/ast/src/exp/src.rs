use std::fmt;
use std::rc::Rc;

use super::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// A range in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeSpan {
    pub file: String,
    pub start: Location,
    pub end: Location,
}

impl fmt::Display for CodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CodeSpan { file, start, end } = self;
        write!(f, "{file}:{}:{}-{}:{}", start.line, start.column, end.line, end.column)
    }
}

/// Attaches the source location of the wrapped term. Reduction and equality
/// look through it.
#[derive(Debug, Clone)]
pub struct Src {
    pub span: CodeSpan,
    pub exp: Rc<Term>,
}

impl From<Src> for Term {
    fn from(val: Src) -> Self {
        Term::Src(val)
    }
}
