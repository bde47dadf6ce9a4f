use miette::Diagnostic;
use thiserror::Error;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

fn comma_separated<I: IntoIterator<Item = String>>(iter: I) -> String {
    separated(", ", iter)
}

fn separated<I: IntoIterator<Item = String>>(s: &str, iter: I) -> String {
    let vec: Vec<_> = iter.into_iter().collect();
    vec.join(s)
}

/// The result type of elaboration.
pub type TcResult<T = ()> = Result<T, ElabError>;

/// The result type of reduction.
pub type EvalResult<T = ()> = Result<T, Box<InternalError>>;

/// Errors raised while elaborating a term.
///
/// Type errors are caused by the program being elaborated. Internal errors are
/// violated invariants of the elaborator or of the built-in eliminators and
/// are kept apart so that hosts can report them differently.
#[derive(Error, Diagnostic, Debug, Clone)]
#[error(transparent)]
#[diagnostic(transparent)]
pub enum ElabError {
    Type(#[from] Box<TypeError>),
    Internal(#[from] Box<InternalError>),
}

impl ElabError {
    pub fn as_type_error(&self) -> Option<&TypeError> {
        match self {
            ElabError::Type(err) => Some(err),
            ElabError::Internal(_) => None,
        }
    }
}

impl From<TypeError> for ElabError {
    fn from(err: TypeError) -> Self {
        ElabError::Type(Box::new(err))
    }
}

impl From<InternalError> for ElabError {
    fn from(err: InternalError) -> Self {
        ElabError::Internal(Box::new(err))
    }
}

/// This enum contains all errors that the checker reports for ill-typed programs.
///
/// Every one of them is preceded by an [Info::Error] entry in the log of the
/// elaboration state.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Undefined reference {name}")]
    #[diagnostic(code("T-001"))]
    UndefinedReference { name: String, span: Option<CodeSpan> },
    #[error("Type annotation required for {what}: {term}")]
    #[diagnostic(code("T-002"))]
    CannotInfer { what: String, term: String, span: Option<CodeSpan> },
    #[error("The following terms are not equal:\n  1: {expected}\n  2: {detected}\n")]
    #[diagnostic(code("T-003"), help("While checking {term}"))]
    NotEq { expected: String, detected: String, term: String, span: Option<CodeSpan> },
    #[error("Expected a function type, got {got}")]
    #[diagnostic(code("T-004"))]
    ExpectedFunction { got: String, span: Option<CodeSpan> },
    #[error("Expected a self type, got {got}")]
    #[diagnostic(code("T-005"))]
    ExpectedSelf { got: String, span: Option<CodeSpan> },
    #[error("Expected a map type, got {got}")]
    #[diagnostic(code("T-006"))]
    ExpectedMap { got: String, span: Option<CodeSpan> },
    #[error("Constructor {name} is not part of type {typ}")]
    #[diagnostic(code("T-007"))]
    UnknownConstructor { name: String, typ: String, span: Option<CodeSpan> },
    #[error("Wrong number of fields provided to {name}: got {actual}, expected {expected}")]
    #[diagnostic(code("T-008"))]
    ArgLenMismatch { name: String, expected: usize, actual: usize, span: Option<CodeSpan> },
    #[error("Field {actual} was given where {expected} was expected")]
    #[diagnostic(code("T-009"))]
    FieldMismatch { expected: String, actual: String, span: Option<CodeSpan> },
    #[error("Invalid pattern match: {msg}")]
    #[diagnostic(code("T-010"))]
    InvalidMatch { msg: String, span: Option<CodeSpan> },
    #[error("Expected a numeric type, got {typ}")]
    #[diagnostic(code("T-011"))]
    InvalidOperand { typ: String, span: Option<CodeSpan> },
    #[error("Operator {op} cannot be applied to values of type {typ}")]
    #[diagnostic(code("T-012"), help("Bitwise operators are only defined on U64"))]
    InvalidOperator { op: Oper, typ: String, span: Option<CodeSpan> },
}

impl TypeError {
    pub fn span(&self) -> Option<&CodeSpan> {
        match self {
            TypeError::UndefinedReference { span, .. }
            | TypeError::CannotInfer { span, .. }
            | TypeError::NotEq { span, .. }
            | TypeError::ExpectedFunction { span, .. }
            | TypeError::ExpectedSelf { span, .. }
            | TypeError::ExpectedMap { span, .. }
            | TypeError::UnknownConstructor { span, .. }
            | TypeError::ArgLenMismatch { span, .. }
            | TypeError::FieldMismatch { span, .. }
            | TypeError::InvalidMatch { span, .. }
            | TypeError::InvalidOperand { span, .. }
            | TypeError::InvalidOperator { span, .. } => span.as_ref(),
        }
    }

    pub fn invalid_match(missing: &[Name], undeclared: &[Name], span: &Option<CodeSpan>) -> Self {
        let mut msgs = Vec::new();

        if !missing.is_empty() {
            msgs.push(format!("missing {}", comma_separated(missing.iter().cloned())));
        }
        if !undeclared.is_empty() {
            msgs.push(format!("undeclared {}", comma_separated(undeclared.iter().cloned())));
        }

        Self::InvalidMatch { msg: separated("; ", msgs), span: span.clone() }
    }

    pub fn not_eq(expected: &Term, detected: &Term, term: &Term, span: &Option<CodeSpan>) -> Self {
        Self::NotEq {
            expected: expected.print_to_string(None),
            detected: detected.print_to_string(None),
            term: term.print_to_string(None),
            span: span.clone(),
        }
    }

    pub fn cannot_infer(what: &str, term: &Term, span: &Option<CodeSpan>) -> Self {
        Self::CannotInfer {
            what: what.to_owned(),
            term: term.print_to_string(None),
            span: span.clone(),
        }
    }
}

/// Violations of internal invariants. These are never caused by the checker
/// rejecting a program, but reduction of an ill-typed term may raise them.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("A case for constructor {name} was missing during evaluation.")]
    #[diagnostic(code("E-001"))]
    MissingCase { name: String },
    #[error("Bitwise operator {op} was applied to floating point numbers during evaluation.")]
    #[diagnostic(code("E-002"))]
    FloatBitwise { op: Oper },
    #[error("An unexpected internal error occurred: {message}")]
    #[diagnostic(code("E-XXX"))]
    /// This error should not occur.
    /// Some internal invariant has been violated.
    Impossible { message: String },
}

impl InternalError {
    pub fn impossible(message: impl Into<String>) -> Box<Self> {
        Box::new(InternalError::Impossible { message: message.into() })
    }
}
