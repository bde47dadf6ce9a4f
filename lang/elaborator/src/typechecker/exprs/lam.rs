use std::rc::Rc;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::normalizer::Level;
use crate::result::{TcResult, TypeError};

// Lam
//
//

impl CheckInfer for Lam {
    /// The rule for checking a lambda abstraction is:
    /// ```text
    ///            B, Γ, x: A ⊢ e ⇐ T
    ///           ─────────────────────────
    ///            B, Γ ⊢ λx e ⇐ ∀(x: A) T
    /// ```
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::Pi(Pi { input, body: typ, .. }) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        let var = bound_var(&self.name, depth, (*input).clone());
        let body = self.body.apply(var.clone());
        let body_out = body.check(ctx, span, depth + 1, &typ.apply(var))?;
        Ok(annotated(Lam { name: self.name.clone(), body: close(depth, body_out) }, t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "lambda", &self.clone().into(), depth)
    }
}

// App
//
//

impl CheckInfer for App {
    /// An application whose head is a lambda or an eliminator is checked by
    /// synthesizing the motive from the expected type. With `x` fresh:
    /// ```text
    ///            B, Γ ⊢ a ⇒ A
    ///            B, Γ ⊢ f ⇐ ∀(x: A) T[a := x]
    ///           ────────────────────────────────
    ///            B, Γ ⊢ f a ⇐ T
    /// ```
    /// Every other application is inferred.
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let head = self.fun.strip_src();
        if !matches!(head, Term::Match(_) | Term::Switch(_) | Term::Lam(_)) {
            return check_by_inference(self, ctx, span, depth, t);
        }
        let arg_out = self.arg.infer(ctx, span, depth)?;
        let arg_typ = type_of(&arg_out)?;
        let motive = {
            let arg = (*self.arg).clone();
            let t = t.clone();
            Term::pi("x", arg_typ, move |x| replace(&arg, &x, &t, depth))
        };
        Term::app(Term::anno(head.clone(), motive), (*self.arg).clone()).infer(ctx, span, depth)
    }

    /// The rule for inferring the type of an application is:
    /// ```text
    ///            B, Γ ⊢ f ⇒ ∀(x: A) T
    ///            B, Γ ⊢ a ⇐ A
    ///           ──────────────────────
    ///            B, Γ ⊢ f a ⇒ T[x := a]
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let fun_out = self.fun.infer(ctx, span, depth)?;
        let fun_typ = type_of(&fun_out)?;
        let Term::Pi(Pi { input, body, .. }) = ctx.whnf(Level::Full, &fun_typ)? else {
            let err =
                TypeError::ExpectedFunction { got: fun_typ.print_to_string(None), span: span.clone() };
            let term = self.clone().into();
            return ctx.error(span, Term::reference("function"), fun_typ, &term, depth, err);
        };
        let arg_out = check_later(ctx, span, &self.arg, &input, depth)?;
        let app = App { fun: Rc::new(fun_out), arg: Rc::new(arg_out) };
        Ok(annotated(app, body.apply((*self.arg).clone())))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    fn id_u64() -> Term {
        Term::anno(Term::lam("x", |x| x), Term::pi("x", Term::U64Type, |_| Term::U64Type))
    }

    #[test]
    fn lambda_checks_against_function_type() {
        let typ = Term::pi("x", Term::U64Type, |_| Term::U64Type);
        let out = Term::lam("x", |x| x).check(&mut ctx(), &None, 0, &typ).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::Pi(_)));
    }

    #[test]
    fn lambda_cannot_be_inferred() {
        let mut ctx = ctx();
        let res = Term::lam("x", |x| x).infer(&mut ctx, &None, 0);
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::CannotInfer { .. })));
        assert!(matches!(
            ctx.info.last(),
            Some(Info::Error { expected: Term::Ref(Ref { name }), .. }) if name == "annotation"
        ));
    }

    #[test]
    fn application_substitutes_argument() {
        let out = Term::app(id_u64(), Term::Num(5)).infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::U64Type));
    }

    #[test]
    fn application_checks_argument() {
        let mut ctx = ctx();
        assert!(Term::app(id_u64(), Term::Flt(1.0)).infer(&mut ctx, &None, 0).is_err());
    }

    #[test]
    fn application_of_non_function() {
        let mut ctx = ctx();
        let res = Term::app(Term::Num(1), Term::Num(2)).infer(&mut ctx, &None, 0);
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::ExpectedFunction { .. })
        ));
    }

    #[test]
    fn lambda_head_synthesizes_motive() {
        let term = Term::app(Term::lam("x", |x| x), Term::Num(5));
        let out = term.check(&mut ctx(), &None, 0, &Term::U64Type).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::U64Type));
    }
}
