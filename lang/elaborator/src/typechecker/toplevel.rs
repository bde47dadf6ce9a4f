//! Checking top-level terms.
//!
//! A definition is either an annotated term `{body: typ}`, whose type is
//! checked against `*` and whose body is checked against the type, or any
//! other term, whose type is inferred.

use log::debug;

use bough_lang_ast::*;

use super::ctx::{Ctx, Mode};
use super::exprs::CheckInfer;
use super::util::undefined;
use crate::result::TcResult;

/// Check `term` in the given mode, returning the elaborated term.
pub fn do_check_mode(ctx: &mut Ctx, mode: Mode, term: &Term) -> TcResult<Term> {
    ctx.mode = mode;
    check_toplevel(ctx, &None, term)
}

fn check_toplevel(ctx: &mut Ctx, span: &Option<CodeSpan>, term: &Term) -> TcResult<Term> {
    match term {
        Term::Anno(Anno { exp, typ, .. }) => {
            typ.check(ctx, span, 0, &Term::TypeUniv)?;
            exp.check(ctx, span, 0, typ)
        }
        Term::Src(Src { span, exp }) => check_toplevel(ctx, &Some(span.clone()), exp),
        Term::Ref(Ref { name }) => match ctx.book.get(name).cloned() {
            Some(def) => check_toplevel(ctx, span, &def),
            None => undefined(ctx, span, name, 0),
        },
        _ => term.infer(ctx, span, 0),
    }
}

/// Check `term`, running every nested check immediately.
pub fn do_check(ctx: &mut Ctx, term: &Term) -> TcResult<Term> {
    do_check_mode(ctx, Mode::Resolve, term)
}

/// Elaborate `term` in two passes.
///
/// The first pass defers the checks of arguments so that metavariables get
/// solved from the types they are used at. The second pass checks everything
/// with the solutions at hand. Returns the elaborated term, with names
/// resolved, and the solutions.
pub fn do_annotate(ctx: &mut Ctx, term: &Term) -> TcResult<(Term, Fill)> {
    do_check_mode(ctx, Mode::Suspend, term)?;
    let pending = ctx.take_suspended();
    if !pending.is_empty() {
        debug!("Discarding {} suspended checks", pending.len());
    }
    let checked = do_check_mode(ctx, Mode::Resolve, term)?;
    Ok((bind(&checked), ctx.fill.clone()))
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;
    use crate::result::TypeError;

    fn ctx(book: Book) -> Ctx {
        Ctx::new(Rc::new(book)).with_output(Rc::new(Captured::new()))
    }

    #[test]
    fn checks_annotated_definitions() {
        let term = Term::trusted(Term::lam("x", |x| x), Term::pi("x", Term::U64Type, |_| Term::U64Type));
        assert!(do_check(&mut ctx(Book::new()), &term).is_ok());
        let term = Term::trusted(Term::Num(1), Term::F64Type);
        assert!(do_check(&mut ctx(Book::new()), &term).is_err());
    }

    #[test]
    fn checks_referenced_definitions() {
        let book: Book = [("one", Term::trusted(Term::Num(1), Term::U64Type))].into_iter().collect();
        assert!(do_check(&mut ctx(book), &Term::reference("one")).is_ok());
        let res = do_check(&mut ctx(Book::new()), &Term::reference("one"));
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::UndefinedReference { .. })
        ));
    }

    #[test]
    fn infers_unannotated_definitions() {
        let out = do_check(&mut ctx(Book::new()), &Term::Num(3)).unwrap();
        assert!(matches!(out, Term::Anno(Anno { typ, .. }) if matches!(*typ, Term::U64Type)));
    }

    #[test]
    fn annotate_leaves_resolve_mode() {
        let mut ctx = ctx(Book::new());
        let (_, fill) = do_annotate(&mut ctx, &Term::Num(3)).unwrap();
        assert!(fill.is_empty());
        assert_eq!(ctx.mode, Mode::Resolve);
        assert!(ctx.checks.is_empty());
    }
}
