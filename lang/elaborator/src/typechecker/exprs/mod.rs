mod adt;
mod anno;
mod hole;
mod lam;
mod literal;
mod local_let;
mod local_match;
mod log_msg;
mod map;
mod pi;
mod variable;

use log::trace;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use super::ctx::Ctx;
use super::util::{annotated, check_by_inference, type_of};
use crate::result::TcResult;

/// The CheckInfer trait for bidirectional type inference.
/// Terms which implement this trait provide both a `check` function to
/// elaborate the term against an expected type and an `infer` function to
/// infer the type of the given term.
///
/// Both return the elaborated term: the input with inferred types attached as
/// trusted annotations.
pub trait CheckInfer: Clone + Into<Term> {
    /// Checks whether the term has the given expected type. For checking we use
    /// the following syntax:
    /// ```text
    ///            B, Γ ⊢ e ⇐ τ
    /// ```
    /// - B: The book of global definitions.
    /// - Γ: The binders we are under, `depth` many of them.
    ///
    /// Unless a term knows better, it is checked by inferring its type and
    /// comparing that with the expected one.
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        check_by_inference(self, ctx, span, depth, t)
    }
    /// Tries to infer a type for the given term. For inference we use the
    /// following syntax:
    /// ```text
    ///            B, Γ ⊢ e ⇒ τ
    /// ```
    ///  - B: The book of global definitions.
    ///  - Γ: The binders we are under, `depth` many of them.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term>;
}

// Terms
//
//

impl CheckInfer for Term {
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        trace!("⊢ {} <= {}", self.print_trace(), t.print_trace());
        match self {
            Term::Pi(e) => e.check(ctx, span, depth, t),
            Term::Lam(e) => e.check(ctx, span, depth, t),
            Term::App(e) => e.check(ctx, span, depth, t),
            Term::Anno(e) => e.check(ctx, span, depth, t),
            Term::SelfType(e) => e.check(ctx, span, depth, t),
            Term::SelfInst(e) => e.check(ctx, span, depth, t),
            Term::Adt(e) => e.check(ctx, span, depth, t),
            Term::Ctor(e) => e.check(ctx, span, depth, t),
            Term::Match(e) => e.check(ctx, span, depth, t),
            Term::Ref(e) => e.check(ctx, span, depth, t),
            Term::Let(e) => e.check(ctx, span, depth, t),
            Term::Use(e) => e.check(ctx, span, depth, t),
            Term::Op2(e) => e.check(ctx, span, depth, t),
            Term::Switch(e) => e.check(ctx, span, depth, t),
            Term::MapType(e) => e.check(ctx, span, depth, t),
            Term::MapLit(e) => e.check(ctx, span, depth, t),
            Term::Get(e) => e.check(ctx, span, depth, t),
            Term::Put(e) => e.check(ctx, span, depth, t),
            Term::Hole(e) => e.check(ctx, span, depth, t),
            Term::Meta(e) => e.check(ctx, span, depth, t),
            Term::Log(e) => e.check(ctx, span, depth, t),
            Term::Var(e) => e.check(ctx, span, depth, t),
            Term::Src(Src { span, exp }) => exp.check(ctx, &Some(span.clone()), depth, t),
            Term::Sub(exp) => exp.check(ctx, span, depth, t),
            Term::Nat(_) | Term::Lst(_) | Term::Txt(_) => {
                literal::check_literal(self, ctx, span, depth, t)
            }
            Term::TypeUniv
            | Term::U64Type
            | Term::F64Type
            | Term::Num(_)
            | Term::Flt(_) => check_by_inference(self, ctx, span, depth, t),
        }
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let res = match self {
            Term::Pi(e) => e.infer(ctx, span, depth),
            Term::Lam(e) => e.infer(ctx, span, depth),
            Term::App(e) => e.infer(ctx, span, depth),
            Term::Anno(e) => e.infer(ctx, span, depth),
            Term::SelfType(e) => e.infer(ctx, span, depth),
            Term::SelfInst(e) => e.infer(ctx, span, depth),
            Term::Adt(e) => e.infer(ctx, span, depth),
            Term::Ctor(e) => e.infer(ctx, span, depth),
            Term::Match(e) => e.infer(ctx, span, depth),
            Term::Ref(e) => e.infer(ctx, span, depth),
            Term::Let(e) => e.infer(ctx, span, depth),
            Term::Use(e) => e.infer(ctx, span, depth),
            Term::Op2(e) => e.infer(ctx, span, depth),
            Term::Switch(e) => e.infer(ctx, span, depth),
            Term::MapType(e) => e.infer(ctx, span, depth),
            Term::MapLit(e) => e.infer(ctx, span, depth),
            Term::Get(e) => e.infer(ctx, span, depth),
            Term::Put(e) => e.infer(ctx, span, depth),
            Term::Hole(e) => e.infer(ctx, span, depth),
            Term::Meta(e) => e.infer(ctx, span, depth),
            Term::Log(e) => e.infer(ctx, span, depth),
            Term::Var(e) => e.infer(ctx, span, depth),
            Term::Src(Src { span, exp }) => exp.infer(ctx, &Some(span.clone()), depth),
            Term::Sub(exp) => exp.infer(ctx, span, depth),
            Term::TypeUniv | Term::U64Type | Term::F64Type => {
                Ok(annotated(self.clone(), Term::TypeUniv))
            }
            Term::Num(_) => Ok(annotated(self.clone(), Term::U64Type)),
            Term::Flt(_) => Ok(annotated(self.clone(), Term::F64Type)),
            Term::Txt(_) => Ok(annotated(self.clone(), Term::reference(literal::STRING))),
            Term::Nat(_) | Term::Lst(_) => literal::unfold(self)?.infer(ctx, span, depth),
        };
        if let Ok(res) = &res {
            if let Ok(typ) = type_of(res) {
                trace!("⊢ {} => {}", self.print_trace(), typ.print_trace());
            }
        }
        res
    }
}
