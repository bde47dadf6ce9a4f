//! Pattern unification of metavariables
//!
//! A metavariable applied to distinct variables, `?m x1 … xn`, can be solved
//! against a term `t` by abstracting the variables out of `t`, provided `?m`
//! does not occur in `t`. Other problems are left unsolved.

mod occur;
mod unify;

pub use occur::occur;
pub use unify::*;
