use bough_lang_ast::*;

use crate::conversion_checking::equal;
use crate::result::{InternalError, TcResult, TypeError};

use super::ctx::{Check, Ctx, Mode, PLACEHOLDER};
use super::exprs::CheckInfer;

/// `exp` annotated with its type, as produced by elaboration.
pub fn annotated(exp: impl Into<Term>, typ: Term) -> Term {
    Term::trusted(exp.into(), typ)
}

/// The variable bound at level `depth`, annotated with its type.
pub fn bound_var(name: &Name, depth: Lvl, typ: Term) -> Term {
    annotated(Term::var(name.clone(), depth), typ)
}

/// The type an elaborated term was annotated with.
pub fn type_of(term: &Term) -> TcResult<Term> {
    match term {
        Term::Anno(Anno { typ, .. }) => Ok((**typ).clone()),
        Term::Src(Src { exp, .. }) => type_of(exp),
        _ => Err(InternalError::impossible("elaborated term carries no type").into()),
    }
}

/// Compare the `expected` type of `term` with the `detected` one.
///
/// A successful comparison may have solved metavariables, so the suspended
/// checks are run again afterwards.
pub fn cmp(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    term: &Term,
    expected: &Term,
    detected: &Term,
    depth: Lvl,
) -> TcResult {
    if !equal(ctx, expected, detected, depth)? {
        let err = TypeError::not_eq(expected, detected, term, span);
        return ctx.error(span, expected.clone(), detected.clone(), term, depth, err);
    }
    for Check { span, term, typ, depth } in ctx.take_suspended() {
        term.check(ctx, &span, depth, &typ)?;
    }
    Ok(())
}

/// Check `term ⇐ typ` now, or defer it in [Mode::Suspend].
///
/// A deferred check stands for its result with the placeholder metavariable.
pub fn check_later(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    term: &Term,
    typ: &Term,
    depth: Lvl,
) -> TcResult<Term> {
    match ctx.mode {
        Mode::Resolve => term.check(ctx, span, depth, typ),
        Mode::Suspend => {
            ctx.suspend(Check { span: span.clone(), term: term.clone(), typ: typ.clone(), depth });
            Ok(Meta { id: PLACEHOLDER, spine: Vec::new() }.into())
        }
    }
}

/// Infer the type of `term` and compare it with `t`.
pub fn check_by_inference<T: CheckInfer>(
    term: &T,
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    depth: Lvl,
    t: &Term,
) -> TcResult<Term> {
    let inferred = term.infer(ctx, span, depth)?;
    cmp(ctx, span, &term.clone().into(), t, &type_of(&inferred)?, depth)?;
    Ok(inferred)
}

/// Abort because `term` needs an annotation. `what` names the kind of term.
pub fn cannot_infer<T>(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    what: &str,
    term: &Term,
    depth: Lvl,
) -> TcResult<T> {
    let err = TypeError::cannot_infer(what, term, span);
    ctx.error(span, Term::reference("annotation"), Term::reference(what), term, depth, err)
}

/// Abort because `name` is not defined in the book.
pub fn undefined<T>(ctx: &mut Ctx, span: &Option<CodeSpan>, name: &str, depth: Lvl) -> TcResult<T> {
    let err = TypeError::UndefinedReference { name: name.to_owned(), span: span.clone() };
    let actual = Term::reference("undefined");
    ctx.error(span, Term::reference("expression"), actual, &Term::reference(name), depth, err)
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    #[test]
    fn check_later_defers_in_suspend_mode() {
        let mut ctx = ctx();
        ctx.mode = Mode::Suspend;
        let res = check_later(&mut ctx, &None, &Term::Num(1), &Term::F64Type, 0).unwrap();
        assert!(matches!(res, Term::Meta(Meta { id, .. }) if id == PLACEHOLDER));
        assert_eq!(ctx.checks.len(), 1);
        assert!(ctx.info.is_empty());
    }

    #[test]
    fn check_later_checks_in_resolve_mode() {
        let mut ctx = ctx();
        assert!(check_later(&mut ctx, &None, &Term::Num(1), &Term::F64Type, 0).is_err());
        assert!(ctx.checks.is_empty());
        assert_eq!(ctx.errors().count(), 1);
    }

    #[test]
    fn cmp_runs_suspended_checks() {
        let mut ctx = ctx();
        ctx.mode = Mode::Suspend;
        check_later(&mut ctx, &None, &Term::Num(1), &Term::F64Type, 0).unwrap();
        let res = cmp(&mut ctx, &None, &Term::Num(2), &Term::U64Type, &Term::U64Type, 0);
        assert!(res.is_err());
        assert!(ctx.checks.is_empty());
    }

    #[test]
    fn failed_cmp_logs_error() {
        let mut ctx = ctx();
        let res = cmp(&mut ctx, &None, &Term::Num(2), &Term::F64Type, &Term::U64Type, 0);
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::NotEq { .. })
        ));
        assert!(matches!(
            ctx.info.last(),
            Some(Info::Error { expected: Term::F64Type, actual: Term::U64Type, .. })
        ));
    }
}
