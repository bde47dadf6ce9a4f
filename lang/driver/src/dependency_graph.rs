use bough_lang_ast::{get_deps, Book, HashMap, HashSet, Name};

/// The references between the definitions of a book.
#[derive(Default)]
pub struct DependencyGraph {
    graph: HashMap<Name, Vec<Name>>,
}

impl DependencyGraph {
    pub fn from_book(book: &Book) -> Self {
        let mut graph = DependencyGraph::default();
        for name in book.names() {
            if let Some(def) = book.get(name) {
                graph.insert(name.clone(), get_deps(def));
            }
        }
        graph
    }

    pub fn get(&self, name: &str) -> Option<&Vec<Name>> {
        self.graph.get(name)
    }

    pub fn insert(&mut self, name: Name, deps: Vec<Name>) {
        self.graph.insert(name, deps);
    }

    /// The definitions which depend on `name`, directly or transitively,
    /// including `name` itself.
    pub fn reverse_dependencies<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        let mut closure = Vec::new();
        let mut stack = vec![name];
        let mut visited = HashSet::default();
        while let Some(next) = stack.pop() {
            if visited.insert(next) {
                closure.push(next);
                let rev_deps = self
                    .graph
                    .iter()
                    .filter_map(|(rev_dep, deps)| {
                        if deps.iter().any(|dep| dep == next) { Some(rev_dep.as_str()) } else { None }
                    })
                    .collect::<Vec<_>>();
                stack.extend(rev_deps);
            }
        }
        closure
    }

    /// All definitions, each after the definitions it depends on.
    ///
    /// Definitions on a cycle are ordered by name. References to names which
    /// are not in the graph are ignored.
    pub fn topo_order(&self) -> Vec<Name> {
        let mut names: Vec<&Name> = self.graph.keys().collect();
        names.sort();
        let mut visited = HashSet::default();
        let mut order = Vec::with_capacity(names.len());
        for name in names {
            self.visit(name, &mut visited, &mut order);
        }
        order
    }

    fn visit<'a>(&'a self, name: &'a str, visited: &mut HashSet<&'a str>, order: &mut Vec<Name>) {
        if !visited.insert(name) {
            return;
        }
        let Some(deps) = self.graph.get(name) else {
            return;
        };
        for dep in deps {
            self.visit(dep, visited, order);
        }
        log::trace!("{name} after {} dependencies", deps.len());
        order.push(name.to_owned());
    }
}

/// The names of `book`, each after the definitions it depends on.
pub fn topo_sort_book(book: &Book) -> Vec<Name> {
    DependencyGraph::from_book(book).topo_order()
}

#[cfg(test)]
mod test {
    use bough_lang_ast::Term;

    use super::*;

    fn book() -> Book {
        [
            ("main", Term::app(Term::reference("double"), Term::reference("two"))),
            ("double", Term::lam("n", |n| Term::app(Term::reference("add"), n))),
            ("two", Term::Num(2)),
            ("add", Term::reference("add")),
        ]
        .into_iter()
        .collect()
    }

    fn position(order: &[Name], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn dependencies_come_first() {
        let order = topo_sort_book(&book());
        assert_eq!(order.len(), 4);
        assert!(position(&order, "add") < position(&order, "double"));
        assert!(position(&order, "double") < position(&order, "main"));
        assert!(position(&order, "two") < position(&order, "main"));
    }

    #[test]
    fn reverse_dependencies_are_transitive() {
        let graph = DependencyGraph::from_book(&book());
        let mut rev = graph.reverse_dependencies("add");
        rev.sort();
        assert_eq!(rev, vec!["add", "double", "main"]);
    }
}
