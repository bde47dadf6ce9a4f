use std::rc::Rc;

use super::same::same;
use super::subst::{Rewrite, map_subterms};
use crate::exp::*;

/// Replace every subterm of `term` that is [same] as `old` by `neo`.
pub fn replace(old: &Term, neo: &Term, term: &Term, depth: Lvl) -> Term {
    let old = old.clone();
    let neo = neo.clone();
    let f: Rewrite = Rc::new(move |t, depth| replace_go(&old, &neo, t, depth));
    f(term, depth)
}

fn replace_go(old: &Term, neo: &Term, term: &Term, depth: Lvl) -> Term {
    if let Term::Sub(exp) = term {
        return (**exp).clone();
    }
    if same(old, term, depth) {
        return neo.clone();
    }
    let old = old.clone();
    let neo = neo.clone();
    let f: Rewrite = Rc::new(move |t, depth| replace_go(&old, &neo, t, depth));
    map_subterms(term, depth, &f)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replaces_index_inside_pi() {
        let zero = Term::ctor("Zero", vec![]);
        let typ = Term::pi("x", Term::app(Term::reference("Vec"), Term::var("n", 0)), |_| {
            Term::U64Type
        });
        let out = replace(&Term::var("n", 0), &zero, &typ, 1);
        let Term::Pi(pi) = out else { panic!("expected a pi") };
        let Term::App(App { arg, .. }) = &*pi.input else { panic!("expected an application") };
        assert!(matches!(&**arg, Term::Ctor(Ctor { name, .. }) if name == "Zero"));
    }
}
