use log::trace;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use crate::normalizer::Level;
use crate::result::{InternalError, TcResult};
use crate::typechecker::ctx::{Ctx, PLACEHOLDER};

use super::occur;

/// Try to solve `?meta spine = target`.
///
/// Returns `true` if the metavariable was solved, or if `target` is the same
/// unsolved metavariable.
pub fn unify(
    ctx: &mut Ctx,
    meta: MetaVar,
    spine: &[Term],
    target: &Term,
    depth: Lvl,
) -> TcResult<bool> {
    trace!("{meta} {} := {}", spine.len(), target.print_trace());
    let solvable = meta != PLACEHOLDER && !ctx.fill.contains(meta) && valid(ctx, spine)?;
    if solvable && !occur(ctx, meta, target, depth)? {
        let solution = solve(ctx, spine, target)?;
        ctx.solve(meta, solution, depth);
        return Ok(true);
    }
    match target.strip_src() {
        Term::Meta(Meta { id, .. }) => Ok(*id == meta),
        _ => Ok(false),
    }
}

/// Check whether `spine` is a pattern: every argument reduces to a variable,
/// and no variable occurs twice.
pub fn valid(ctx: &Ctx, spine: &[Term]) -> TcResult<bool> {
    let mut seen = Vec::with_capacity(spine.len());
    for arg in spine {
        match ctx.whnf(Level::Never, arg)? {
            Term::Var(Var { lvl, .. }) if !seen.contains(&lvl) => seen.push(lvl),
            _ => return Ok(false),
        }
    }
    Ok(true)
}

/// The solution of `?m spine = target`: one lambda per spine argument, whose
/// bound variable replaces that argument in `target`.
///
/// `spine` must be [valid].
pub fn solve(ctx: &Ctx, spine: &[Term], target: &Term) -> TcResult<Term> {
    let Some((arg, rest)) = spine.split_first() else {
        return Ok(target.clone());
    };
    let Term::Var(Var { name, lvl }) = ctx.whnf(Level::Never, arg)? else {
        return Err(InternalError::impossible("solved a metavariable with an invalid spine").into());
    };
    let inner = solve(ctx, rest, target)?;
    Ok(Term::lam(name, move |x| subst(lvl, &x, &inner)))
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    fn x() -> Term {
        Term::var("x", 0)
    }

    fn y() -> Term {
        Term::var("y", 1)
    }

    #[test]
    fn solves_pattern_against_variable() {
        let mut ctx = ctx();
        let m = MetaVar { id: 0 };
        assert!(unify(&mut ctx, m, &[x(), y()], &x(), 2).unwrap());
        let solution = ctx.fill.get(m).unwrap().clone();
        let applied = ctx.whnf(Level::Never, &Term::apps(solution, [Term::Num(1), Term::Num(2)])).unwrap();
        assert!(matches!(applied, Term::Num(1)));
        assert!(matches!(ctx.info.last(), Some(Info::Solved { meta, .. }) if *meta == m));
    }

    #[test]
    fn solution_is_lambda_over_spine() {
        let mut ctx = ctx();
        let m = MetaVar { id: 0 };
        assert!(unify(&mut ctx, m, &[x(), y()], &x(), 2).unwrap());
        let expected = Term::lam("x", |x| Term::lam("y", move |_| x.clone()));
        assert!(same(ctx.fill.get(m).unwrap(), &expected, 0));
    }

    #[test]
    fn rejects_non_patterns() {
        let ctx = ctx();
        assert!(valid(&ctx, &[x(), y()]).unwrap());
        assert!(!valid(&ctx, &[x(), x()]).unwrap());
        assert!(!valid(&ctx, &[Term::Num(1)]).unwrap());
        assert!(valid(&ctx, &[]).unwrap());
    }

    #[test]
    fn non_pattern_is_not_solved() {
        let mut ctx = ctx();
        let m = MetaVar { id: 0 };
        assert!(!unify(&mut ctx, m, &[x(), x()], &x(), 2).unwrap());
        assert!(ctx.fill.is_empty());
    }

    #[test]
    fn occurs_check_prevents_solution() {
        let mut ctx = ctx();
        let m = MetaVar { id: 0 };
        let target = Term::app(Term::reference("f"), Term::meta(0));
        assert!(!unify(&mut ctx, m, &[], &target, 0).unwrap());
        assert!(ctx.fill.is_empty());
    }

    #[test]
    fn same_unsolved_meta_unifies() {
        let mut ctx = ctx();
        assert!(unify(&mut ctx, MetaVar { id: 1 }, &[], &Term::meta(1), 0).unwrap());
        assert!(ctx.fill.is_empty());
    }

    #[test]
    fn placeholder_is_never_solved() {
        let mut ctx = ctx();
        assert!(!unify(&mut ctx, PLACEHOLDER, &[], &Term::U64Type, 0).unwrap());
        assert!(ctx.fill.is_empty());
    }
}
