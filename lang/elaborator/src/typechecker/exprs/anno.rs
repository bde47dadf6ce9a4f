use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::result::TcResult;

// Anno
//
//

impl CheckInfer for Anno {
    /// The annotated type has to agree with the expected one:
    /// ```text
    ///            B, Γ ⊢ T = τ
    ///            B, Γ ⊢ e ⇐ T
    ///           ──────────────────
    ///            B, Γ ⊢ {e: T} ⇐ τ
    /// ```
    /// The body is only checked for annotations which are not trusted.
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        cmp(ctx, span, &self.exp, &self.typ, t, depth)?;
        self.infer(ctx, span, depth)
    }

    /// The rule for inferring the type of an annotation is:
    /// ```text
    ///            B, Γ ⊢ e ⇐ T
    ///           ──────────────────
    ///            B, Γ ⊢ {e: T} ⇒ T
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Anno { check, exp, typ } = self;
        if *check {
            exp.check(ctx, span, depth, typ)
        } else {
            Ok(annotated((**exp).clone(), (**typ).clone()))
        }
    }
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
    fn checked_annotation_checks_body() {
        let mut ctx = ctx();
        assert!(Term::anno(Term::Num(1), Term::F64Type).infer(&mut ctx, &None, 0).is_err());
    }

    #[test]
    fn trusted_annotation_is_believed() {
        let out = Term::trusted(Term::Num(1), Term::F64Type).infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::F64Type));
    }

    #[test]
    fn annotation_must_agree_with_expected_type() {
        let mut ctx = ctx();
        let term = Term::trusted(Term::Num(1), Term::U64Type);
        assert!(term.check(&mut ctx, &None, 0, &Term::U64Type).is_ok());
        assert!(term.check(&mut ctx, &None, 0, &Term::F64Type).is_err());
    }
}
