use bough_lang_ast::{Lvl, Term, map_opened};

use crate::result::EvalResult;

use super::{Level, Reducer};

impl Reducer<'_> {
    /// Reduce `term` to full normal form.
    ///
    /// Binders are opened with variables starting at level `depth` and closed
    /// again, so the result is a proper term.
    pub fn normal(&self, lv: Level, term: &Term, depth: Lvl) -> EvalResult<Term> {
        let whnf = self.whnf(lv, term)?;
        let mut failed = None;
        let res = map_opened(&whnf, depth, &mut |sub, depth| {
            if failed.is_some() {
                return sub.clone();
            }
            self.normal(lv, sub, depth).unwrap_or_else(|err| {
                failed = Some(err);
                sub.clone()
            })
        });
        match failed {
            Some(err) => Err(err),
            None => Ok(res),
        }
    }
}

#[cfg(test)]
mod test {
    use bough_lang_ast::*;
    use bough_lang_printer::PrintToString;

    use super::super::Captured;
    use super::*;

    fn normal(term: &Term) -> Term {
        Reducer::new(&Book::new(), &Fill::new(), &Captured::new())
            .normal(Level::Redex, term, 0)
            .unwrap()
    }

    #[test]
    fn reduces_under_binders() {
        let term = Term::lam("x", |x| Term::app(Term::lam("y", |y| y), x));
        let nf = normal(&term);
        let Term::Lam(lam) = &nf else { panic!("expected a lambda") };
        let body = lam.body.apply(Term::var("z", 7));
        assert!(matches!(body, Term::Var(Var { lvl: 7, .. })));
    }

    #[test]
    fn unfolds_literals_completely() {
        let nf = normal(&Term::Nat(2));
        assert!(same(&nf, &normal(&Term::ctor(SUCC, vec![(PREV, Term::Nat(1))])), 0));
        assert_eq!(nf.print_to_string(None), "#Succ{pred: #Succ{pred: #Zero{}}}");
    }
}
