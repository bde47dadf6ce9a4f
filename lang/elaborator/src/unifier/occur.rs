use bough_lang_ast::*;

use crate::normalizer::Level;
use crate::result::TcResult;
use crate::typechecker::ctx::Ctx;

/// Check whether `meta` occurs in `term`, looking through solved
/// metavariables. Hole contexts are not searched.
pub fn occur(ctx: &Ctx, meta: MetaVar, term: &Term, depth: Lvl) -> TcResult<bool> {
    match term {
        Term::Hole(_) => Ok(false),
        Term::Meta(_) => match ctx.whnf(Level::Full, term)? {
            Term::Meta(Meta { id, spine }) => {
                if id == meta {
                    return Ok(true);
                }
                for arg in &spine {
                    if occur(ctx, meta, arg, depth)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            reduced => occur(ctx, meta, &reduced, depth),
        },
        _ => {
            let mut res = Ok(false);
            map_opened(term, depth, &mut |sub, depth| {
                if matches!(res, Ok(false)) {
                    res = occur(ctx, meta, sub, depth);
                }
                sub.clone()
            });
            res
        }
    }
}
