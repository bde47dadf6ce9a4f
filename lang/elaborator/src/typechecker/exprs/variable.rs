use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::result::TcResult;

// Var
//
//

impl CheckInfer for Var {
    /// Bound variables are annotated when their binder is opened, so a bare
    /// variable has no known type.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        cannot_infer(ctx, span, "variable", &self.clone().into(), depth)
    }
}

// Ref
//
//

impl CheckInfer for Ref {
    /// The type of a reference is the type of the definition it names.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Some(def) = ctx.book.get(&self.name).cloned() else {
            return undefined(ctx, span, &self.name, depth);
        };
        let def_out = def.infer(ctx, span, depth)?;
        Ok(annotated(self.clone(), type_of(&def_out)?))
    }
}
