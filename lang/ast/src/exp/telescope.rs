use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx, tokens::COLON,
};
use derivative::Derivative;

use super::{Closure, Field, Lvl, Name, Pi, Term};
use crate::traits::close;

/// The signature of a constructor: a sequence of dependent parameters ending
/// in the constructor's return type.
#[derive(Debug, Clone)]
pub enum Telescope {
    Return(Rc<Term>),
    Extend(Extend),
}

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Extend {
    pub name: Name,
    pub input: Rc<Term>,
    #[derivative(Debug = "ignore")]
    pub body: Closure<Telescope>,
}

impl Telescope {
    pub fn ret(typ: Term) -> Telescope {
        Telescope::Return(Rc::new(typ))
    }

    pub fn extend(
        name: impl Into<Name>,
        input: Term,
        body: impl Fn(Term) -> Telescope + 'static,
    ) -> Telescope {
        Telescope::Extend(Extend { name: name.into(), input: Rc::new(input), body: Closure::new(body) })
    }

    /// The number of parameters.
    pub fn arity(&self, depth: Lvl) -> usize {
        match self {
            Telescope::Return(_) => 0,
            Telescope::Extend(Extend { name, body, .. }) => {
                1 + body.apply(Term::var(name.clone(), depth)).arity(depth + 1)
            }
        }
    }

    /// The names of the parameters, in order.
    pub fn names(&self, depth: Lvl) -> Vec<Name> {
        let mut names = Vec::new();
        let mut tele = self.clone();
        let mut depth = depth;
        while let Telescope::Extend(Extend { name, body, .. }) = tele {
            tele = body.apply(Term::var(name.clone(), depth));
            names.push(name);
            depth += 1;
        }
        names
    }

    /// Fresh variables for every parameter, starting at level `depth`, and the
    /// return type mentioning them.
    pub fn to_terms(&self, depth: Lvl) -> (Vec<Field>, Term) {
        let mut fields = Vec::new();
        let mut tele = self.clone();
        let mut depth = depth;
        loop {
            match tele {
                Telescope::Return(ret) => return (fields, (*ret).clone()),
                Telescope::Extend(Extend { name, body, .. }) => {
                    let var = Term::var(name.clone(), depth);
                    tele = body.apply(var.clone());
                    fields.push(Field { name: Some(name), exp: var });
                    depth += 1;
                }
            }
        }
    }

    /// The function type taking every parameter and returning `ret`.
    ///
    /// `ret` may mention the parameters as the variables [Telescope::to_terms]
    /// creates for the same `depth`.
    pub fn to_type(&self, ret: &Term, depth: Lvl) -> Term {
        match self {
            Telescope::Return(_) => ret.clone(),
            Telescope::Extend(Extend { name, input, body }) => {
                let rest = body.apply(Term::var(name.clone(), depth)).to_type(ret, depth + 1);
                Pi { name: name.clone(), input: input.clone(), body: close(depth, rest) }.into()
            }
        }
    }
}

impl PrintInCtx for Telescope {
    type Ctx = Lvl;

    /// Prints `{x: A y: B} : R`
    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let mut params = Vec::new();
        let mut tele = self.clone();
        let mut depth = *depth;
        let ret = loop {
            match tele {
                Telescope::Return(ret) => break ret,
                Telescope::Extend(Extend { name, input, body }) => {
                    params.push(
                        alloc
                            .text(name.clone())
                            .append(COLON)
                            .append(alloc.space())
                            .append(input.print_in_ctx(cfg, &depth, alloc)),
                    );
                    tele = body.apply(Term::var(name, depth));
                    depth += 1;
                }
            }
        };
        alloc
            .intersperse(params, alloc.space())
            .enclose("{", "}")
            .append(alloc.space())
            .append(COLON)
            .append(alloc.space())
            .append(ret.print_in_ctx(cfg, &depth, alloc))
    }
}
