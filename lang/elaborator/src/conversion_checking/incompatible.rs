use bough_lang_ast::{Anno, Ctor, Src, Term};

/// Check whether `a` and `b` can never become equal: constructors with
/// different names, or constructors of the same name with an incompatible
/// pair of fields.
///
/// The comparison is structural. Literals count as the constructors they
/// stand for and annotations are looked through, but nothing is reduced, so
/// a reference, an application or a variable is compatible with everything.
pub fn incompatible(a: &Term, b: &Term) -> bool {
    let mut pending = vec![(a.clone(), b.clone())];
    while let Some((a, b)) = pending.pop() {
        let (a, b) = (strip(&a), strip(&b));
        if let (Term::Nat(n), Term::Nat(m)) = (&a, &b) {
            if n != m {
                return true;
            }
            continue;
        }
        let (Some(Ctor { name: n1, fields: f1 }), Some(Ctor { name: n2, fields: f2 })) =
            (as_ctor(a), as_ctor(b))
        else {
            continue;
        };
        if n1 != n2 {
            return true;
        }
        if f1.len() == f2.len() {
            pending.extend(f1.into_iter().zip(f2).map(|(x, y)| (x.exp, y.exp)));
        }
    }
    false
}

fn strip(term: &Term) -> Term {
    match term {
        Term::Anno(Anno { exp, .. }) | Term::Src(Src { exp, .. }) | Term::Sub(exp) => strip(exp),
        _ => term.clone(),
    }
}

fn as_ctor(term: Term) -> Option<Ctor> {
    match term {
        Term::Ctor(ctor) => Some(ctor),
        Term::Txt(_) | Term::Lst(_) | Term::Nat(_) => match term.unfold_literal() {
            Some(Term::Ctor(ctor)) => Some(ctor),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use bough_lang_ast::*;

    use super::*;

    #[test]
    fn different_constructors_are_incompatible() {
        assert!(incompatible(&Term::Nat(0), &Term::Nat(1)));
        assert!(incompatible(&Term::Nat(1), &Term::Nat(3)));
        assert!(incompatible(&Term::Nat(0), &Term::ctor(SUCC, vec![(PREV, Term::var("n", 0))])));
        assert!(incompatible(&Term::txt("ab"), &Term::txt("ac")));
    }

    #[test]
    fn equal_or_unknown_terms_are_compatible() {
        assert!(!incompatible(&Term::Nat(2), &Term::Nat(2)));
        assert!(!incompatible(&Term::Nat(1), &Term::ctor(SUCC, vec![(PREV, Term::var("n", 0))])));
        assert!(!incompatible(&Term::var("a", 0), &Term::Nat(0)));
        assert!(!incompatible(&Term::reference("zero"), &Term::Nat(1)));
    }

    #[test]
    fn annotations_are_looked_through() {
        let zero = Term::trusted(Term::Nat(0), Term::reference("Nat"));
        assert!(incompatible(&zero, &Term::Nat(1)));
    }

    #[test]
    fn nothing_is_reduced() {
        let logged = Term::log(Term::txt("index"), Term::Nat(0));
        assert!(!incompatible(&logged, &Term::Nat(1)));
        let redex = Term::app(Term::lam("x", |x| x), Term::Nat(0));
        assert!(!incompatible(&redex, &Term::Nat(1)));
    }

    #[test]
    fn deep_literals() {
        assert!(incompatible(&Term::Nat(100_000), &Term::Nat(99_999)));
        let long = Term::Lst(vec![Term::Num(1); 2_000]);
        assert!(incompatible(&long, &Term::Lst(vec![Term::Num(1); 1_999])));
        assert!(!incompatible(&long, &long));
    }
}
