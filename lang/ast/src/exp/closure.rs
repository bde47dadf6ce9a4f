use std::rc::Rc;

use super::Term;

/// The body of a binder: a function from the value that is substituted for the
/// bound variable to the resulting subterm.
///
/// To inspect a body without a value at hand, apply it to a fresh [super::Var]
/// tagged with the current depth.
///
/// Closures have no `Debug` representation; nodes holding one derive `Debug`
/// through `derivative` and skip the body.
pub struct Closure<T = Term>(Rc<dyn Fn(Term) -> T>);

impl<T> Closure<T> {
    pub fn new(f: impl Fn(Term) -> T + 'static) -> Self {
        Closure(Rc::new(f))
    }

    pub fn apply(&self, arg: Term) -> T {
        (self.0)(arg)
    }
}

impl<T: Clone + 'static> Closure<T> {
    /// A body that ignores the bound variable.
    pub fn constant(value: T) -> Self {
        Closure::new(move |_| value.clone())
    }
}

impl<T> Clone for Closure<T> {
    fn clone(&self) -> Self {
        Closure(self.0.clone())
    }
}

/// A body binding two variables, used by map access.
#[derive(Clone)]
pub struct Closure2(Rc<dyn Fn(Term, Term) -> Term>);

impl Closure2 {
    pub fn new(f: impl Fn(Term, Term) -> Term + 'static) -> Self {
        Closure2(Rc::new(f))
    }

    pub fn apply(&self, fst: Term, snd: Term) -> Term {
        (self.0)(fst, snd)
    }

    pub fn constant(value: Term) -> Self {
        Closure2::new(move |_, _| value.clone())
    }
}
