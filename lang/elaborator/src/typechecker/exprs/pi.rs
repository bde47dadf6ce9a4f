use std::rc::Rc;

use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::normalizer::Level;
use crate::result::{TcResult, TypeError};
use bough_lang_printer::PrintToString;

// Pi
//
//

impl CheckInfer for Pi {
    /// The rule for function types is:
    /// ```text
    ///            B, Γ ⊢ A ⇐ *
    ///            B, Γ, x: A ⊢ T ⇐ *
    ///           ──────────────────────
    ///            B, Γ ⊢ ∀(x: A) T ⇒ *
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Pi { name, input, body } = self;
        let input_out = check_later(ctx, span, input, &Term::TypeUniv, depth)?;
        let body = body.apply(bound_var(name, depth, (**input).clone()));
        let body_out = check_later(ctx, span, &body, &Term::TypeUniv, depth + 1)?;
        let pi = Pi { name: name.clone(), input: Rc::new(input_out), body: close(depth, body_out) };
        Ok(annotated(pi, Term::TypeUniv))
    }
}

// SelfType
//
//

impl CheckInfer for SelfType {
    /// The rule for self types is:
    /// ```text
    ///            B, Γ ⊢ A ⇐ *
    ///            B, Γ, x: A ⊢ T ⇐ *
    ///           ──────────────────────
    ///            B, Γ ⊢ $(x: A) T ⇒ *
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let SelfType { name, typ, body } = self;
        let typ_out = check_later(ctx, span, typ, &Term::TypeUniv, depth)?;
        let body = body.apply(bound_var(name, depth, (**typ).clone()));
        let body_out = check_later(ctx, span, &body, &Term::TypeUniv, depth + 1)?;
        let slf =
            SelfType { name: name.clone(), typ: Rc::new(typ_out), body: close(depth, body_out) };
        Ok(annotated(slf, Term::TypeUniv))
    }
}

// SelfInst
//
//

impl CheckInfer for SelfInst {
    /// The rule for checking a self instantiation against a self type is:
    /// ```text
    ///            B, Γ ⊢ e ⇐ T[x := ~e]
    ///           ─────────────────────────
    ///            B, Γ ⊢ ~e ⇐ $(x: A) T
    /// ```
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::SelfType(SelfType { body, .. }) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        let exp_out = self.exp.check(ctx, span, depth, &body.apply(self.clone().into()))?;
        Ok(annotated(SelfInst { exp: Rc::new(exp_out) }, t.clone()))
    }

    /// The rule for inferring the type of a self instantiation is:
    /// ```text
    ///            B, Γ ⊢ e ⇒ $(x: A) T
    ///           ───────────────────────
    ///            B, Γ ⊢ ~e ⇒ T[x := ~e]
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let exp_out = self.exp.infer(ctx, span, depth)?;
        let typ = type_of(&exp_out)?;
        match ctx.whnf(Level::Full, &typ)? {
            Term::SelfType(SelfType { body, .. }) => {
                let inst = SelfInst { exp: Rc::new(exp_out) };
                let typ = body.apply(Term::self_inst((*self.exp).clone()));
                Ok(annotated(inst, typ))
            }
            _ => {
                let err = TypeError::ExpectedSelf { got: typ.print_to_string(None), span: span.clone() };
                ctx.error(span, Term::reference("Self"), typ, &self.clone().into(), depth, err)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    #[test]
    fn pi_is_a_type() {
        let pi = Term::pi("A", Term::TypeUniv, |a| Term::pi("x", a.clone(), move |_| a.clone()));
        let out = pi.infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::TypeUniv));
    }

    #[test]
    fn pi_input_must_be_a_type() {
        let pi = Term::pi("x", Term::Num(1), |_| Term::U64Type);
        let mut ctx = ctx();
        assert!(pi.infer(&mut ctx, &None, 0).is_err());
        assert_eq!(ctx.errors().count(), 1);
    }

    #[test]
    fn self_instantiation_exposes_body() {
        let slf = Term::self_type("s", Term::U64Type, |_| Term::U64Type);
        let term = Term::self_inst(Term::trusted(Term::Num(3), slf));
        let out = term.infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::U64Type));
    }

    #[test]
    fn self_instantiation_of_non_self() {
        let mut ctx = ctx();
        let res = Term::self_inst(Term::Num(3)).infer(&mut ctx, &None, 0);
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::ExpectedSelf { .. })
        ));
    }
}
