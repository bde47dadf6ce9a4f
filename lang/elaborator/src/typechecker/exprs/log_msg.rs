use std::rc::Rc;

use bough_lang_ast::*;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::result::TcResult;

// Log
//
//

impl CheckInfer for Log {
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let msg = self.msg.infer(ctx, span, depth)?;
        let next = self.next.check(ctx, span, depth, t)?;
        Ok(annotated(Log { msg: Rc::new(msg), next: Rc::new(next) }, t.clone()))
    }

    /// A log has the type of its continuation. The message may have any type.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let msg = self.msg.infer(ctx, span, depth)?;
        let next = self.next.infer(ctx, span, depth)?;
        let typ = type_of(&next)?;
        Ok(annotated(Log { msg: Rc::new(msg), next: Rc::new(next) }, typ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    #[test]
    fn log_has_type_of_continuation() {
        let mut ctx = Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()));
        let term = Term::log(Term::txt("hi"), Term::Flt(1.0));
        let out = term.infer(&mut ctx, &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::F64Type));
        assert!(term.check(&mut ctx, &None, 0, &Term::U64Type).is_err());
    }
}
