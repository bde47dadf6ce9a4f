//! Conversion checking
//!
//! Two terms are definitionally equal if they are syntactically identical, or
//! become identical after reduction to weak head normal form, or agree
//! component-wise after reduction. Comparing an unsolved metavariable with a
//! term tries to solve it by pattern unification, so conversion checking may
//! extend the fill.
//!
//! For instance, checking `(?m x y) = x` where `x` and `y` are distinct
//! variables solves `?m := λx λy x`.

use log::trace;

use bough_lang_ast::{Lvl, Term};
use bough_lang_printer::PrintToString;

use crate::normalizer::Level;
use crate::result::TcResult;
use crate::typechecker::ctx::Ctx;

mod compare;
mod incompatible;

pub use compare::identical;
pub use incompatible::incompatible;

/// Check whether `a` and `b` are definitionally equal.
pub fn equal(ctx: &mut Ctx, a: &Term, b: &Term, depth: Lvl) -> TcResult<bool> {
    trace!("{} =? {}", a.print_trace(), b.print_trace());
    if identical(ctx, a, b, depth)? {
        return Ok(true);
    }
    let a = ctx.whnf(Level::Full, a)?;
    let b = ctx.whnf(Level::Full, b)?;
    if identical(ctx, &a, &b, depth)? {
        return Ok(true);
    }
    compare::similar(ctx, &a, &b, depth)
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use bough_lang_ast::*;

    use super::*;
    use crate::normalizer::Captured;

    fn ctx(book: Book) -> Ctx {
        Ctx::new(Rc::new(book)).with_output(Rc::new(Captured::new()))
    }

    fn check_eq(a: Term, b: Term) {
        let mut ctx = ctx(Book::new());
        assert!(equal(&mut ctx, &a, &b, 0).unwrap());
        assert!(equal(&mut ctx, &b, &a, 0).unwrap());
    }

    fn check_neq(a: Term, b: Term) {
        let mut ctx = ctx(Book::new());
        assert!(!equal(&mut ctx, &a, &b, 0).unwrap());
        assert!(!equal(&mut ctx, &b, &a, 0).unwrap());
    }

    #[test]
    fn equal_is_reflexive() {
        let term = Term::pi("A", Term::TypeUniv, |a| Term::pi("x", a.clone(), move |_| a.clone()));
        check_eq(term.clone(), term);
    }

    #[test]
    fn equal_up_to_beta() {
        check_eq(Term::app(Term::lam("x", |x| x), Term::U64Type), Term::U64Type);
    }

    #[test]
    fn equal_up_to_alpha() {
        check_eq(Term::lam("x", |x| x), Term::lam("y", |y| y));
    }

    #[test]
    fn equal_unfolds_references() {
        let book: Book = [("Word", Term::U64Type)].into_iter().collect();
        let mut ctx = ctx(book);
        assert!(equal(&mut ctx, &Term::reference("Word"), &Term::U64Type, 0).unwrap());
    }

    #[test]
    fn equal_looks_through_spans_and_annotations() {
        let span = CodeSpan {
            file: "test".to_owned(),
            start: Location { line: 1, column: 1 },
            end: Location { line: 1, column: 2 },
        };
        check_eq(Term::src(span, Term::trusted(Term::Num(1), Term::U64Type)), Term::Num(1));
    }

    #[test]
    fn distinct_terms_are_not_equal() {
        check_neq(Term::U64Type, Term::F64Type);
        check_neq(Term::Num(1), Term::Num(2));
        check_neq(Term::var("x", 0), Term::var("y", 1));
        check_neq(Term::ctor("A", vec![]), Term::ctor("B", vec![]));
    }

    #[test]
    fn equal_compares_under_binders() {
        check_neq(Term::lam("x", |x| x), Term::lam("x", |_| Term::Num(0)));
    }

    #[test]
    fn holes_equal_everything() {
        check_eq(Term::hole("h"), Term::U64Type);
    }

    #[test]
    fn equal_solves_metas() {
        let mut ctx = ctx(Book::new());
        assert!(equal(&mut ctx, &Term::meta(0), &Term::U64Type, 0).unwrap());
        assert!(ctx.fill.contains(MetaVar { id: 0 }));
        assert!(equal(&mut ctx, &Term::meta(0), &Term::U64Type, 0).unwrap());
        assert!(!equal(&mut ctx, &Term::meta(0), &Term::F64Type, 0).unwrap());
    }

    #[test]
    fn similar_compares_components() {
        let book: Book = [("Word", Term::U64Type)].into_iter().collect();
        let mut ctx = ctx(book);
        let a = Term::pi("x", Term::reference("Word"), |_| Term::U64Type);
        let b = Term::pi("y", Term::U64Type, |_| Term::reference("Word"));
        assert!(equal(&mut ctx, &a, &b, 0).unwrap());
    }
}
