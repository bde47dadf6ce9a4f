use std::rc::Rc;

use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::result::TcResult;

// Let
//
//

impl CheckInfer for Let {
    /// The bound value is inferred, the body is checked with the variable
    /// bound to the inferred type:
    /// ```text
    ///            B, Γ ⊢ v ⇒ A
    ///            B, Γ, x: A ⊢ e ⇐ T
    ///           ─────────────────────────
    ///            B, Γ ⊢ let x = v; e ⇐ T
    /// ```
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Let { name, val, body } = self;
        let val_out = val.infer(ctx, span, depth)?;
        let body = body.apply(bound_var(name, depth, type_of(&val_out)?));
        let body_out = body.check(ctx, span, depth + 1, t)?;
        let out = Let { name: name.clone(), val: Rc::new(val_out), body: close(depth, body_out) };
        Ok(annotated(out, t.clone()))
    }

    /// The type of the body may mention the bound variable, which is replaced
    /// by the bound value.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Let { name, val, body } = self;
        let val_out = val.infer(ctx, span, depth)?;
        let body = body.apply(bound_var(name, depth, type_of(&val_out)?));
        let body_out = body.infer(ctx, span, depth + 1)?;
        let typ = subst(depth, val, &type_of(&body_out)?);
        let out = Let { name: name.clone(), val: Rc::new(val_out), body: close(depth, body_out) };
        Ok(annotated(out, typ))
    }
}

// Use
//
//

impl CheckInfer for Use {
    /// `use` substitutes its value into the body before checking.
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        self.body.apply((*self.val).clone()).check(ctx, span, depth, t)
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        self.body.apply((*self.val).clone()).infer(ctx, span, depth)
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
    fn let_binds_inferred_type() {
        let term = Term::let_in("x", Term::Num(1), |x| Term::op2(Oper::Add, x, Term::Num(2)));
        let out = term.infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::U64Type));
        assert!(term.check(&mut ctx(), &None, 0, &Term::U64Type).is_ok());
        assert!(term.check(&mut ctx(), &None, 0, &Term::F64Type).is_err());
    }

    #[test]
    fn let_checks_unannotated_body() {
        let typ = Term::pi("y", Term::U64Type, |_| Term::U64Type);
        let term = Term::let_in("x", Term::Num(1), |x| Term::lam("y", move |_| x.clone()));
        assert!(term.check(&mut ctx(), &None, 0, &typ).is_ok());
    }

    #[test]
    fn use_substitutes_value() {
        let term = Term::use_in("x", Term::Flt(1.5), |x| x);
        let out = term.infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::F64Type));
    }
}
