use super::opened::map_opened;
use crate::{Book, HashSet, exp::*};

/// The definitions `term` refers to, in order of first occurrence.
pub fn get_deps(term: &Term) -> Vec<Name> {
    let mut seen = HashSet::default();
    let mut out = Vec::new();
    deps_go(term, 0, &mut seen, &mut out);
    out
}

fn deps_go(term: &Term, depth: Lvl, seen: &mut HashSet<Name>, out: &mut Vec<Name>) {
    if let Term::Ref(Ref { name }) = term {
        if seen.insert(name.clone()) {
            out.push(name.clone());
        }
        return;
    }
    map_opened(term, depth, &mut |t, depth| {
        deps_go(t, depth, seen, out);
        t.clone()
    });
}

/// The definitions `name` depends on, directly or transitively. Names missing
/// from the book are included but not followed.
pub fn get_all_deps(book: &Book, name: &str) -> Vec<Name> {
    let mut seen = HashSet::default();
    let mut out = Vec::new();
    let mut todo = vec![name.to_owned()];
    while let Some(next) = todo.pop() {
        let Some(def) = book.get(&next) else { continue };
        for dep in get_deps(def) {
            if dep != name && seen.insert(dep.clone()) {
                out.push(dep.clone());
                todo.push(dep);
            }
        }
    }
    out
}
