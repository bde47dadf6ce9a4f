use super::opened::map_opened;
use crate::exp::*;

/// Give every metavariable in `term` a fresh id, numbering them from `0` in
/// left-to-right order.
pub fn gen_metas(term: &Term) -> Term {
    let mut next = 0;
    gen_metas_go(term, 0, &mut next)
}

fn gen_metas_go(term: &Term, depth: Lvl, next: &mut u64) -> Term {
    match term {
        Term::Meta(Meta { spine, .. }) => {
            let id = MetaVar { id: *next };
            *next += 1;
            let spine = spine.iter().map(|arg| gen_metas_go(arg, depth, next)).collect();
            Meta { id, spine }.into()
        }
        _ => map_opened(term, depth, &mut |t, depth| gen_metas_go(t, depth, next)),
    }
}

/// The number of metavariable occurrences in `term`.
pub fn count_metas(term: &Term) -> usize {
    metas(term).len()
}

/// The metavariables occurring in `term`, in left-to-right order.
pub fn metas(term: &Term) -> Vec<MetaVar> {
    let mut out = Vec::new();
    metas_go(term, 0, &mut out);
    out
}

fn metas_go(term: &Term, depth: Lvl, out: &mut Vec<MetaVar>) {
    if let Term::Meta(Meta { id, .. }) = term {
        out.push(*id);
    }
    map_opened(term, depth, &mut |t, depth| {
        metas_go(t, depth, out);
        t.clone()
    });
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gen_metas_numbers_in_order() {
        let term = Term::app(Term::meta(0), Term::lam("x", |_| Term::meta(0)));
        let numbered = gen_metas(&term);
        assert_eq!(metas(&numbered), vec![MetaVar { id: 0 }, MetaVar { id: 1 }]);
        assert_eq!(count_metas(&term), 2);
    }
}
