use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::result::TcResult;

// Hole
//
//

impl CheckInfer for Hole {
    /// A hole accepts every type. Its goal is reported together with the
    /// values of its context.
    fn check(&self, ctx: &mut Ctx, _span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Hole { name, ctx: values } = self;
        ctx.log(Info::Found { depth, name: name.clone(), goal: t.clone(), ctx: values.clone() });
        Ok(annotated(self.clone(), t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "hole", &self.clone().into(), depth)
    }
}

// Meta
//
//

impl CheckInfer for Meta {
    /// Metavariables are solved by conversion checking, not here.
    fn check(&self, _ctx: &mut Ctx, _span: &Option<CodeSpan>, _depth: Lvl, t: &Term) -> TcResult<Term> {
        Ok(annotated(self.clone(), t.clone()))
    }

    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "meta", &self.clone().into(), depth)
    }
}
