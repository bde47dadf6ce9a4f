use std::rc::Rc;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use super::super::ctx::*;
use super::super::telescope::check_constructor_spine;
use super::super::util::*;
use super::CheckInfer;
use crate::conversion_checking::equal;
use crate::normalizer::Level;
use crate::result::{InternalError, TcResult, TypeError};

/// The type of text literals.
pub const STRING: &str = "String";

// Op2
//
//

impl CheckInfer for Op2 {
    /// Both operands must have the same numeric type. Comparisons yield a
    /// `U64`, every other operator yields the type of its operands. Bitwise
    /// operators are only defined on `U64`.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Op2 { op, lhs, rhs } = self;
        let term: Term = self.clone().into();
        let lhs_out = lhs.infer(ctx, span, depth)?;
        let rhs_out = rhs.infer(ctx, span, depth)?;
        let lhs_typ = type_of(&lhs_out)?;
        let rhs_typ = type_of(&rhs_out)?;

        let sort = ctx.whnf(Level::Full, &lhs_typ)?;
        if !matches!(sort, Term::U64Type | Term::F64Type) {
            let err =
                TypeError::InvalidOperand { typ: lhs_typ.print_to_string(None), span: span.clone() };
            let expected = Term::reference("Valid numeric type");
            return ctx.error(span, expected, lhs_typ, &term, depth, err);
        }
        if !equal(ctx, &lhs_typ, &rhs_typ, depth)? {
            let err = TypeError::not_eq(&lhs_typ, &rhs_typ, &term, span);
            return ctx.error(span, lhs_typ, rhs_typ, &term, depth, err);
        }
        if matches!(sort, Term::F64Type) && op.is_bitwise() {
            let err =
                TypeError::InvalidOperator { op: *op, typ: sort.print_to_string(None), span: span.clone() };
            return ctx.error(span, Term::U64Type, lhs_typ, &term, depth, err);
        }

        let typ = if op.is_comparison() { Term::U64Type } else { sort };
        let out = Op2 { op: *op, lhs: Rc::new(lhs_out), rhs: Rc::new(rhs_out) };
        Ok(annotated(out, typ))
    }
}

/// One constructor layer of a natural number, list or text literal.
pub(super) fn unfold(literal: &Term) -> TcResult<Ctor> {
    match literal.unfold_literal() {
        Some(Term::Ctor(ctor)) => Ok(ctor),
        _ => Err(InternalError::impossible("literal did not unfold to a constructor").into()),
    }
}

/// Check a natural number, list or text literal as the constructors it
/// stands for.
///
/// The chain of constructors is walked in a loop: the fields of each layer
/// are checked, except for the last one, which is the rest of the literal and
/// becomes the next layer. A text checked against anything but a datatype
/// is checked by inference instead.
pub(super) fn check_literal(
    literal: &Term,
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    depth: Lvl,
    t: &Term,
) -> TcResult<Term> {
    if matches!(literal, Term::Txt(_)) && !matches!(ctx.whnf(Level::Full, t)?, Term::Adt(_)) {
        return check_by_inference(literal, ctx, span, depth, t);
    }

    let mut layer = unfold(literal)?;
    let mut typ = t.clone();
    let mut items = Vec::new();
    loop {
        let ctr = match ctx.whnf(Level::Full, &typ)? {
            Term::Adt(adt) if !layer.fields.is_empty() => adt.ctr(&layer.name).cloned(),
            _ => None,
        };
        let Some(ctr) = ctr else {
            // The last layer, or one that reports its own error.
            layer.check(ctx, span, depth, &typ)?;
            break;
        };
        let (mut fields, rest_typ) =
            check_constructor_spine(ctx, span, &layer, &ctr.tele, &typ, depth)?;
        let rest = fields.pop().map(|field| field.exp);
        if let (Term::Lst(_), Some(item)) = (literal, fields.into_iter().next()) {
            items.push(item.exp);
        }
        match rest {
            Some(rest) => layer = unfold(&rest)?,
            None => break,
        }
        typ = rest_typ;
    }

    let out = match literal {
        Term::Lst(_) => Term::Lst(items),
        _ => literal.clone(),
    };
    Ok(annotated(out, t.clone()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    fn nat() -> Term {
        Adt {
            indices: vec![],
            ctrs: vec![
                Ctr { name: ZERO.to_owned(), tele: Telescope::ret(Term::reference("Nat")) },
                Ctr {
                    name: SUCC.to_owned(),
                    tele: Telescope::extend(PREV, Term::reference("Nat"), |_| {
                        Telescope::ret(Term::reference("Nat"))
                    }),
                },
            ],
            typ: Rc::new(Term::reference("Nat")),
        }
        .into()
    }

    /// Lists of machine integers, with the given names for the fields of `Cons`.
    fn list(item: &str, rest: &str) -> Term {
        let rest = rest.to_owned();
        Adt {
            indices: vec![],
            ctrs: vec![
                Ctr { name: NIL.to_owned(), tele: Telescope::ret(Term::reference("List")) },
                Ctr {
                    name: CONS.to_owned(),
                    tele: Telescope::extend(item, Term::U64Type, move |_| {
                        Telescope::extend(rest.clone(), Term::reference("List"), |_| {
                            Telescope::ret(Term::reference("List"))
                        })
                    }),
                },
            ],
            typ: Rc::new(Term::reference("List")),
        }
        .into()
    }

    fn book_ctx(list: Term) -> Ctx {
        let book: Book = [
            ("Nat", Term::trusted(nat(), Term::TypeUniv)),
            ("List", Term::trusted(list, Term::TypeUniv)),
        ]
        .into_iter()
        .collect();
        Ctx::new(Rc::new(book)).with_output(Rc::new(Captured::new()))
    }

    fn check_list(term: Term) -> TcResult<Term> {
        term.check(&mut book_ctx(list(ITEM, REST)), &None, 0, &Term::reference("List"))
    }

    fn infer(term: Term) -> TcResult<Term> {
        term.infer(&mut ctx(), &None, 0).and_then(|out| type_of(&out))
    }

    #[test]
    fn literal_types() {
        assert!(matches!(infer(Term::Num(1)).unwrap(), Term::U64Type));
        assert!(matches!(infer(Term::Flt(1.0)).unwrap(), Term::F64Type));
        assert!(matches!(infer(Term::U64Type).unwrap(), Term::TypeUniv));
        assert!(matches!(infer(Term::TypeUniv).unwrap(), Term::TypeUniv));
        assert!(matches!(infer(Term::txt("hi")).unwrap(), Term::Ref(Ref { name }) if name == STRING));
    }

    #[test]
    fn arithmetic_keeps_operand_type() {
        let sum = Term::op2(Oper::Mul, Term::Flt(1.5), Term::Flt(2.0));
        assert!(matches!(infer(sum).unwrap(), Term::F64Type));
    }

    #[test]
    fn comparison_yields_u64() {
        let cmp = Term::op2(Oper::Lt, Term::Flt(1.5), Term::Flt(2.0));
        assert!(matches!(infer(cmp).unwrap(), Term::U64Type));
    }

    #[test]
    fn mixed_operands_are_rejected() {
        let mut ctx = ctx();
        let sum = Term::op2(Oper::Add, Term::Num(3), Term::Flt(1.5));
        let res = sum.infer(&mut ctx, &None, 0);
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::NotEq { .. })));
        assert!(matches!(
            ctx.info.last(),
            Some(Info::Error { expected: Term::U64Type, actual: Term::F64Type, .. })
        ));
    }

    #[test]
    fn non_numeric_operands_are_rejected() {
        let res = infer(Term::op2(Oper::Add, Term::U64Type, Term::U64Type));
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::InvalidOperand { .. })));
    }

    #[test]
    fn bitwise_on_floats_is_rejected() {
        let res = infer(Term::op2(Oper::Xor, Term::Flt(1.0), Term::Flt(2.0)));
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::InvalidOperator { .. })));
    }

    #[test]
    fn large_nat_literal() {
        let mut ctx = book_ctx(list(ITEM, REST));
        let out = Term::Nat(100_000).check(&mut ctx, &None, 0, &Term::reference("Nat")).unwrap();
        assert!(matches!(out, Term::Anno(Anno { exp, .. }) if matches!(*exp, Term::Nat(100_000))));
        assert!(Term::Nat(3).check(&mut ctx, &None, 0, &Term::U64Type).is_err());
    }

    #[test]
    fn list_literal_checks_items() {
        let out = check_list(Term::Lst(vec![Term::Num(1), Term::Num(2), Term::Num(3)])).unwrap();
        match out {
            Term::Anno(Anno { exp, .. }) => {
                assert!(matches!(&*exp, Term::Lst(items) if items.len() == 3));
            }
            other => panic!("expected an annotation, got {other:?}"),
        }
        assert!(check_list(Term::Lst(vec![])).is_ok());
        let res = check_list(Term::Lst(vec![Term::Num(1), Term::Flt(2.0)]));
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::NotEq { .. })));
    }

    #[test]
    fn long_list_and_text_literals() {
        assert!(check_list(Term::Lst(vec![Term::Num(7); 5_000])).is_ok());
        assert!(check_list(Term::txt(&"x".repeat(5_000))).is_ok());
    }

    #[test]
    fn text_against_list() {
        let out = check_list(Term::txt("hi")).unwrap();
        assert!(matches!(out, Term::Anno(Anno { exp, .. }) if matches!(&*exp, Term::Txt(text) if text == "hi")));
    }

    #[test]
    fn literal_fields_have_fixed_names() {
        let mut ctx = book_ctx(list("head", "tail"));
        let res = Term::Lst(vec![Term::Num(1)]).check(&mut ctx, &None, 0, &Term::reference("List"));
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::FieldMismatch { .. })));
    }
}
