use bough_lang_ast::*;

use super::ctx::Ctx;
use super::util::annotated;
use crate::result::TcResult;

/// The goal reported for holes in branches that can never be taken.
pub const UNREACHABLE: &str = "unreachable";

/// Accept the body of a branch that can never be taken.
///
/// The body is not type checked, but goals of holes inside it are still
/// reported, under the binders the body opens.
pub fn check_unreachable(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    body: &Term,
    depth: Lvl,
) -> TcResult<Term> {
    report_holes(ctx, span, body, depth);
    Ok(annotated(body.clone(), Term::hole(UNREACHABLE)))
}

fn report_holes(ctx: &mut Ctx, span: &Option<CodeSpan>, body: &Term, depth: Lvl) {
    match body {
        Term::Lam(Lam { name, body }) => {
            report_holes(ctx, span, &body.apply(Term::var(name.clone(), depth)), depth + 1)
        }
        Term::Let(Let { name, body, .. }) | Term::Use(Use { name, body, .. }) => {
            report_holes(ctx, span, &body.apply(Term::var(name.clone(), depth)), depth + 1)
        }
        Term::Src(Src { span, exp }) => report_holes(ctx, &Some(span.clone()), exp, depth),
        Term::Hole(Hole { name, ctx: values }) => ctx.log(Info::Found {
            depth,
            name: name.clone(),
            goal: Term::hole(UNREACHABLE),
            ctx: values.clone(),
        }),
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;
    use crate::typechecker::util::type_of;

    #[test]
    fn reports_holes_under_binders() {
        let mut ctx = Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()));
        let body = Term::lam("x", |_| Term::lam("y", |_| Term::hole("goal")));
        let out = check_unreachable(&mut ctx, &None, &body, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::Hole(Hole { name, .. }) if name == UNREACHABLE));
        assert!(matches!(
            ctx.info.as_slice(),
            [Info::Found { depth: 2, name, .. }] if name == "goal"
        ));
    }

    #[test]
    fn other_bodies_are_accepted_silently() {
        let mut ctx = Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()));
        assert!(check_unreachable(&mut ctx, &None, &Term::Num(1), 0).is_ok());
        assert!(ctx.info.is_empty());
    }
}
