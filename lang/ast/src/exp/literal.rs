use std::fmt;
use std::rc::Rc;

use bough_lang_printer::{
    Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx,
    theme::ThemeExt,
    tokens::{COMMA, F64, HASH, TYPE, U64},
};

use super::{Lvl, Term};

/// Binary operators on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Oper {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
    Xor,
    Lsh,
    Rsh,
}

impl Oper {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Oper::Add | Oper::Sub | Oper::Mul | Oper::Div | Oper::Mod)
    }

    /// Comparisons return `1` for true and `0` for false.
    pub fn is_comparison(self) -> bool {
        matches!(self, Oper::Eq | Oper::Ne | Oper::Lt | Oper::Gt | Oper::Lte | Oper::Gte)
    }

    pub fn is_bitwise(self) -> bool {
        matches!(self, Oper::And | Oper::Or | Oper::Xor | Oper::Lsh | Oper::Rsh)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Oper::Add => "+",
            Oper::Sub => "-",
            Oper::Mul => "*",
            Oper::Div => "/",
            Oper::Mod => "%",
            Oper::Eq => "==",
            Oper::Ne => "!=",
            Oper::Lt => "<",
            Oper::Gt => ">",
            Oper::Lte => "<=",
            Oper::Gte => ">=",
            Oper::And => "&",
            Oper::Or => "|",
            Oper::Xor => "^",
            Oper::Lsh => "<<",
            Oper::Rsh => ">>",
        }
    }
}

impl fmt::Display for Oper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `(op lhs rhs)`
#[derive(Debug, Clone)]
pub struct Op2 {
    pub op: Oper,
    pub lhs: Rc<Term>,
    pub rhs: Rc<Term>,
}

impl From<Op2> for Term {
    fn from(val: Op2) -> Self {
        Term::Op2(val)
    }
}

impl PrintInCtx for Op2 {
    type Ctx = Lvl;

    fn print_in_ctx<'a>(&self, cfg: &PrintCfg, depth: &Lvl, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(self.op.symbol())
            .append(alloc.line())
            .append(self.lhs.print_in_ctx(cfg, depth, alloc))
            .append(alloc.line())
            .append(self.rhs.print_in_ctx(cfg, depth, alloc))
            .nest(cfg.indent)
            .parens()
            .group()
    }
}

pub const NIL: &str = "Nil";
pub const CONS: &str = "Cons";
pub const ZERO: &str = "Zero";
pub const SUCC: &str = "Succ";

pub const ITEM: &str = "item";
pub const REST: &str = "rest";
pub const PREV: &str = "prev";

impl Term {
    /// One layer of the constructor form of a text, list or natural literal.
    ///
    /// Texts are lists of character codes. The tail of the result is again a
    /// literal.
    pub fn unfold_literal(&self) -> Option<Term> {
        let unfolded = match self {
            Term::Txt(text) => {
                let mut chars = text.chars();
                match chars.next() {
                    None => Term::ctor(NIL, vec![]),
                    Some(c) => Term::ctor(
                        CONS,
                        vec![
                            (ITEM, Term::Num(u64::from(c))),
                            (REST, Term::Txt(chars.as_str().to_owned())),
                        ],
                    ),
                }
            }
            Term::Lst(items) => match items.split_first() {
                None => Term::ctor(NIL, vec![]),
                Some((head, tail)) => Term::ctor(
                    CONS,
                    vec![(ITEM, head.clone()), (REST, Term::Lst(tail.to_vec()))],
                ),
            },
            Term::Nat(0) => Term::ctor(ZERO, vec![]),
            Term::Nat(n) => Term::ctor(SUCC, vec![(PREV, Term::Nat(n - 1))]),
            _ => return None,
        };
        Some(unfolded)
    }
}

pub(super) fn print_type_univ<'a>(alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.typ(TYPE)
}

pub(super) fn print_u64_type<'a>(alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.typ(U64)
}

pub(super) fn print_f64_type<'a>(alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.typ(F64)
}

pub(super) fn print_num<'a>(n: u64, alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.text(n.to_string())
}

pub(super) fn print_flt<'a>(x: f64, alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.text(format!("{x:?}"))
}

pub(super) fn print_nat<'a>(n: u64, alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.text(format!("{HASH}{n}"))
}

pub(super) fn print_txt<'a>(text: &str, alloc: &'a Alloc<'a>) -> Builder<'a> {
    alloc.text(format!("\"{}\"", text.escape_debug()))
}

pub(super) fn print_lst<'a>(
    items: &[Term],
    cfg: &PrintCfg,
    depth: &Lvl,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let items = items.iter().map(|item| item.print_in_ctx(cfg, depth, alloc));
    alloc.intersperse(items, alloc.text(COMMA).append(alloc.line())).brackets().group()
}

#[cfg(test)]
mod test {
    use super::*;

    fn ctor_name(term: &Term) -> &str {
        match term {
            Term::Ctor(ctor) => &ctor.name,
            _ => panic!("expected a constructor"),
        }
    }

    #[test]
    fn unfold_nat() {
        assert_eq!(ctor_name(&Term::Nat(0).unfold_literal().unwrap()), ZERO);
        let Term::Ctor(succ) = Term::Nat(2).unfold_literal().unwrap() else { panic!() };
        assert_eq!(succ.name, SUCC);
        assert!(matches!(succ.fields[0].exp, Term::Nat(1)));
    }

    #[test]
    fn unfold_txt() {
        let Term::Ctor(cons) = Term::txt("hi").unfold_literal().unwrap() else { panic!() };
        assert_eq!(cons.name, CONS);
        assert!(matches!(cons.fields[0].exp, Term::Num(104)));
        assert!(matches!(&cons.fields[1].exp, Term::Txt(rest) if rest == "i"));
        assert_eq!(ctor_name(&Term::txt("").unfold_literal().unwrap()), NIL);
    }

    #[test]
    fn other_terms_do_not_unfold() {
        assert!(Term::Num(3).unfold_literal().is_none());
    }
}
