use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use super::super::ctx::*;
use super::super::telescope::{check_constructor, check_tele};
use super::super::util::*;
use super::CheckInfer;
use crate::normalizer::Level;
use crate::result::{TcResult, TypeError};

// Adt
//
//

impl CheckInfer for Adt {
    /// A datatype is a type if the telescope of each of its constructors is
    /// well-formed and returns a type.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let mut ctrs = Vec::with_capacity(self.ctrs.len());
        for Ctr { name, tele } in &self.ctrs {
            let tele = check_tele(ctx, span, tele, &Term::TypeUniv, depth)?;
            ctrs.push(Ctr { name: name.clone(), tele });
        }
        let adt = Adt { indices: self.indices.clone(), ctrs, typ: self.typ.clone() };
        Ok(annotated(adt, Term::TypeUniv))
    }
}

// Ctor
//
//

impl CheckInfer for Ctor {
    /// A constructor is checked against the telescope its datatype declares
    /// for it:
    /// ```text
    ///            C: Δ → T' ∈ D
    ///            B, Γ ⊢ σ ⇐ Δ
    ///            B, Γ ⊢ T'[σ] = T
    ///           ──────────────────
    ///            B, Γ ⊢ #C σ ⇐ T
    /// ```
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::Adt(adt) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        let Some(ctr) = adt.ctr(&self.name) else {
            let err = TypeError::UnknownConstructor {
                name: self.name.clone(),
                typ: t.print_to_string(None),
                span: span.clone(),
            };
            let expected = Term::hole(format!("constructor_not_found:{}", self.name));
            let actual = Term::hole("unknown_type");
            return ctx.error(span, expected, actual, &self.clone().into(), depth, err);
        };
        let fields = check_constructor(ctx, span, self, &ctr.tele, t, depth)?;
        Ok(annotated(Ctor { name: self.name.clone(), fields }, t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "constructor", &self.clone().into(), depth)
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::normalizer::Captured;

    fn nat() -> Term {
        Adt {
            indices: vec![],
            ctrs: vec![
                Ctr { name: ZERO.to_owned(), tele: Telescope::ret(Term::reference("Nat")) },
                Ctr {
                    name: SUCC.to_owned(),
                    tele: Telescope::extend(PREV, Term::reference("Nat"), |_| {
                        Telescope::ret(Term::reference("Nat"))
                    }),
                },
            ],
            typ: Rc::new(Term::reference("Nat")),
        }
        .into()
    }

    fn ctx() -> Ctx {
        let book: Book = [("Nat", Term::trusted(nat(), Term::TypeUniv))].into_iter().collect();
        Ctx::new(Rc::new(book)).with_output(Rc::new(Captured::new()))
    }

    #[test]
    fn datatype_is_a_type() {
        let out = nat().infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::TypeUniv));
    }

    #[test]
    fn constructor_checks_against_datatype() {
        let mut ctx = ctx();
        let two = Term::Nat(2);
        assert!(two.check(&mut ctx, &None, 0, &Term::reference("Nat")).is_ok());
        let bad = Term::ctor(SUCC, vec![(PREV, Term::Num(1))]);
        assert!(bad.check(&mut ctx, &None, 0, &Term::reference("Nat")).is_err());
    }

    #[test]
    fn unknown_constructor() {
        let mut ctx = ctx();
        let res = Term::ctor("Two", vec![]).check(&mut ctx, &None, 0, &Term::reference("Nat"));
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::UnknownConstructor { .. })
        ));
    }

    #[test]
    fn constructor_cannot_be_inferred() {
        let mut ctx = ctx();
        assert!(Term::ctor(ZERO, vec![]).infer(&mut ctx, &None, 0).is_err());
    }
}
