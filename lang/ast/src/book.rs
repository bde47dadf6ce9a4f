use crate::{HashMap, MetaVar, Name, Term};

/// The global definitions, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Book {
    defs: HashMap<Name, Term>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.defs.get(name)
    }

    pub fn insert(&mut self, name: impl Into<Name>, def: Term) {
        self.defs.insert(name.into(), def);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// All names in lexicographic order.
    pub fn names(&self) -> Vec<&Name> {
        let mut names: Vec<_> = self.defs.keys().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<N: Into<Name>> FromIterator<(N, Term)> for Book {
    fn from_iter<I: IntoIterator<Item = (N, Term)>>(iter: I) -> Self {
        Book { defs: iter.into_iter().map(|(name, def)| (name.into(), def)).collect() }
    }
}

/// Solutions of metavariables. Solutions are never retracted or replaced.
#[derive(Debug, Clone, Default)]
pub struct Fill {
    solutions: HashMap<MetaVar, Term>,
}

impl Fill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, meta: MetaVar) -> Option<&Term> {
        self.solutions.get(&meta)
    }

    pub fn contains(&self, meta: MetaVar) -> bool {
        self.solutions.contains_key(&meta)
    }

    /// Record `solution` unless `meta` is already solved.
    pub fn insert(&mut self, meta: MetaVar, solution: Term) {
        self.solutions.entry(meta).or_insert(solution);
    }

    /// All solutions ordered by metavariable.
    pub fn iter(&self) -> impl Iterator<Item = (MetaVar, &Term)> {
        let mut solutions: Vec<_> = self.solutions.iter().map(|(meta, sol)| (*meta, sol)).collect();
        solutions.sort_by_key(|(meta, _)| *meta);
        solutions.into_iter()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

impl FromIterator<(MetaVar, Term)> for Fill {
    fn from_iter<I: IntoIterator<Item = (MetaVar, Term)>>(iter: I) -> Self {
        Fill { solutions: iter.into_iter().collect() }
    }
}
