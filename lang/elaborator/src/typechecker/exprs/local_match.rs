use std::rc::Rc;

use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::unreachable::check_unreachable;
use super::super::util::*;
use super::CheckInfer;
use crate::conversion_checking::incompatible;
use crate::normalizer::Level;
use crate::result::{TcResult, TypeError};

// Match
//
//

impl CheckInfer for Match {
    /// A match is checked against a function type whose domain is a datatype.
    /// Each case is checked against the motive instantiated with its
    /// constructor, as a function of the constructor's fields:
    /// ```text
    ///            ∀ C: Δ → D ι ∈ D ξ.   B, Γ ⊢ e_C ⇐ ∀Δ T[x := #C Δ][ξ := ι]
    ///           ─────────────────────────────────────────────────────────
    ///            B, Γ ⊢ λ{ #C: e_C } ⇐ ∀(x: D ξ) T
    /// ```
    /// Cases whose indices can never agree with the scrutinee are unreachable
    /// and not checked. A wildcard case is checked against the whole function
    /// type.
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::Pi(Pi { input, body: motive, .. }) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        let Term::Adt(adt) = ctx.whnf(Level::Full, &input)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        check_coverage(self, ctx, span, &adt, depth)?;

        let mut cases = Vec::with_capacity(self.cases.len());
        for Case { name, body } in &self.cases {
            let body = if name == WILDCARD {
                let covered = adt.ctrs.iter().all(|ctr| self.case(&ctr.name).is_some());
                if covered {
                    check_unreachable(ctx, span, body, depth)?
                } else {
                    body.check(ctx, span, depth, t)?
                }
            } else {
                let Some(ctr) = adt.ctr(name) else {
                    continue;
                };
                let (fields, ret) = ctr.tele.to_terms(depth);
                let ret_indices = match ctx.whnf(Level::Full, &ret)? {
                    Term::Adt(ret) => ret.indices,
                    _ => Vec::new(),
                };
                let reachable =
                    !adt.indices.iter().zip(&ret_indices).any(|(a, b)| incompatible(a, b));
                if reachable {
                    let scrutinee =
                        annotated(Ctor { name: name.clone(), fields }, (*input).clone());
                    let case_typ = adt
                        .indices
                        .iter()
                        .zip(&ret_indices)
                        .fold(ctr.tele.to_type(&motive.apply(scrutinee), depth), |typ, (a, b)| {
                            replace(a, b, &typ, depth)
                        });
                    body.check(ctx, span, depth, &case_typ)?
                } else {
                    check_unreachable(ctx, span, body, depth)?
                }
            };
            cases.push(Case { name: name.clone(), body });
        }
        Ok(annotated(Match { cases }, t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "match", &self.clone().into(), depth)
    }
}

/// Every constructor needs a case unless there is a wildcard, and every
/// case must name a constructor.
fn check_coverage(
    mat: &Match,
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    adt: &Adt,
    depth: Lvl,
) -> TcResult {
    let missing: Vec<Name> = match mat.wildcard() {
        Some(_) => Vec::new(),
        None => adt
            .ctrs
            .iter()
            .filter(|ctr| mat.case(&ctr.name).is_none())
            .map(|ctr| ctr.name.clone())
            .collect(),
    };
    let undeclared: Vec<Name> = mat
        .cases
        .iter()
        .filter(|case| case.name != WILDCARD && adt.ctr(&case.name).is_none())
        .map(|case| case.name.clone())
        .collect();

    let (expected, actual) = match (missing.first(), undeclared.first()) {
        (Some(name), _) => (format!("missing_case:{name}"), "incomplete_match"),
        (None, Some(name)) => (format!("constructor_not_found:{name}"), "unknown_type"),
        (None, None) => return Ok(()),
    };
    let err = TypeError::invalid_match(&missing, &undeclared, span);
    let term = mat.clone().into();
    ctx.error(span, Term::hole(expected), Term::hole(actual), &term, depth, err)
}

// Switch
//
//

impl CheckInfer for Switch {
    /// The rule for checking a switch on machine integers is:
    /// ```text
    ///            B, Γ ⊢ z ⇐ T[x := 0]
    ///            B, Γ ⊢ s ⇐ ∀(n: U64) T[x := 1 + n]
    ///           ─────────────────────────────────────
    ///            B, Γ ⊢ λ{0: z; _: s} ⇐ ∀(x: U64) T
    /// ```
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::Pi(Pi { input, body: motive, .. }) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        if !matches!(ctx.whnf(Level::Full, &input)?, Term::U64Type) {
            return check_by_inference(self, ctx, span, depth, t);
        }
        let zero_typ = motive.apply(annotated(Term::Num(0), Term::U64Type));
        let zero = self.zero.check(ctx, span, depth, &zero_typ)?;
        let succ_typ =
            Term::pi("n", Term::U64Type, move |n| motive.apply(Term::op2(Oper::Add, Term::Num(1), n)));
        let succ = self.succ.check(ctx, span, depth, &succ_typ)?;
        Ok(annotated(Switch { zero: Rc::new(zero), succ: Rc::new(succ) }, t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "switch", &self.clone().into(), depth)
    }
}
