//! Checking telescopes and the fields of constructors against them.

use std::rc::Rc;

use bough_lang_ast::*;

use super::ctx::Ctx;
use super::exprs::CheckInfer;
use super::util::{bound_var, cmp};
use crate::result::{InternalError, TcResult, TypeError};

/// Check every parameter type of `tele` against `*` and its return type
/// against `typ`.
pub fn check_tele(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    tele: &Telescope,
    typ: &Term,
    depth: Lvl,
) -> TcResult<Telescope> {
    match tele {
        Telescope::Return(ret) => {
            Ok(Telescope::Return(Rc::new(ret.check(ctx, span, depth, typ)?)))
        }
        Telescope::Extend(Extend { name, input, body }) => {
            let input_out = input.check(ctx, span, depth, &Term::TypeUniv)?;
            let rest = body.apply(bound_var(name, depth, (**input).clone()));
            let rest_out = check_tele(ctx, span, &rest, typ, depth + 1)?;
            Ok(Telescope::Extend(Extend {
                name: name.clone(),
                input: Rc::new(input_out),
                body: Closure::new(move |x| subst_tele(depth, &x, &rest_out)),
            }))
        }
    }
}

/// Check the fields of the constructor `term` against the parameters of
/// `tele`, and the return type of `tele` against `expected`.
///
/// Named fields must name the parameter they are checked against.
pub fn check_constructor(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    term: &Ctor,
    tele: &Telescope,
    expected: &Term,
    depth: Lvl,
) -> TcResult<Vec<Field>> {
    let (fields, _) = check_fields(ctx, span, term, tele, expected, depth, false)?;
    Ok(fields)
}

/// Like [check_constructor], but the last field is left unchecked. Returns
/// the type the last field has to be checked against.
pub fn check_constructor_spine(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    term: &Ctor,
    tele: &Telescope,
    expected: &Term,
    depth: Lvl,
) -> TcResult<(Vec<Field>, Term)> {
    match check_fields(ctx, span, term, tele, expected, depth, true)? {
        (fields, Some(last)) => Ok((fields, last)),
        (_, None) => Err(InternalError::impossible("constructor without fields").into()),
    }
}

fn check_fields(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    term: &Ctor,
    tele: &Telescope,
    expected: &Term,
    depth: Lvl,
    skip_last: bool,
) -> TcResult<(Vec<Field>, Option<Term>)> {
    let arity = tele.arity(depth);
    if arity != term.fields.len() {
        let err = TypeError::ArgLenMismatch {
            name: term.name.clone(),
            expected: arity,
            actual: term.fields.len(),
            span: span.clone(),
        };
        let actual = Term::hole("unknown_type");
        return ctx.error(span, Term::hole("arity_mismatch"), actual, &Term::hole("constructor"), depth, err);
    }

    let mut fields = Vec::with_capacity(term.fields.len());
    let mut last = None;
    let mut tele = tele.clone();
    for (i, field) in term.fields.iter().enumerate() {
        let Telescope::Extend(Extend { name, input, body }) = tele else {
            return Err(InternalError::impossible("telescope shorter than its arity").into());
        };
        if let Some(detected) = &field.name {
            if *detected != name {
                let err = TypeError::FieldMismatch {
                    expected: name.clone(),
                    actual: detected.clone(),
                    span: span.clone(),
                };
                let expected = Term::hole(format!("expected:{name}"));
                let actual = Term::hole(format!("detected:{detected}"));
                return ctx.error(span, expected, actual, &Term::hole("field_mismatch"), depth, err);
            }
        }
        if skip_last && i + 1 == term.fields.len() {
            fields.push(field.clone());
            last = Some((*input).clone());
        } else {
            let exp = field.exp.check(ctx, span, depth, &input)?;
            fields.push(Field { name: field.name.clone(), exp });
        }
        tele = body.apply(field.exp.clone());
    }

    if let Telescope::Return(ret) = &tele {
        cmp(ctx, span, &term.clone().into(), ret, expected, depth)?;
    }
    Ok((fields, last))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    fn pair() -> Telescope {
        Telescope::extend("fst", Term::U64Type, |_| {
            Telescope::extend("snd", Term::F64Type, |_| Telescope::ret(Term::reference("Pair")))
        })
    }

    fn ctor(fields: Vec<(Option<&str>, Term)>) -> Ctor {
        let fields = fields
            .into_iter()
            .map(|(name, exp)| Field { name: name.map(str::to_owned), exp })
            .collect();
        Ctor { name: "MkPair".to_owned(), fields }
    }

    #[test]
    fn telescope_parameters_are_types() {
        let mut ctx = ctx();
        assert!(check_tele(&mut ctx, &None, &pair(), &Term::TypeUniv, 0).is_err());
        let tele = Telescope::extend("n", Term::U64Type, |_| Telescope::ret(Term::U64Type));
        assert!(check_tele(&mut ctx, &None, &tele, &Term::TypeUniv, 0).is_ok());
    }

    #[test]
    fn spine_leaves_last_field_unchecked() {
        let mut ctx = ctx();
        let expected = Term::reference("Pair");
        let term = ctor(vec![(Some("fst"), Term::Num(1)), (Some("snd"), Term::TypeUniv)]);
        let (fields, last) =
            check_constructor_spine(&mut ctx, &None, &term, &pair(), &expected, 0).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[1].exp, Term::TypeUniv));
        assert!(matches!(last, Term::F64Type));
        let unit = Ctor { name: "Unit".to_owned(), fields: vec![] };
        let tele = Telescope::ret(expected.clone());
        assert!(check_constructor_spine(&mut ctx, &None, &unit, &tele, &expected, 0).is_err());
    }

    #[test]
    fn constructor_fields_are_checked() {
        let mut ctx = ctx();
        let expected = Term::reference("Pair");
        let good = ctor(vec![(Some("fst"), Term::Num(1)), (None, Term::Flt(2.0))]);
        assert!(check_constructor(&mut ctx, &None, &good, &pair(), &expected, 0).is_ok());
        let bad = ctor(vec![(None, Term::Flt(1.0)), (None, Term::Flt(2.0))]);
        assert!(check_constructor(&mut ctx, &None, &bad, &pair(), &expected, 0).is_err());
    }

    #[test]
    fn constructor_arity_mismatch() {
        let mut ctx = ctx();
        let term = ctor(vec![(None, Term::Num(1))]);
        let res = check_constructor(&mut ctx, &None, &term, &pair(), &Term::reference("Pair"), 0);
        assert!(matches!(
            res.unwrap_err().as_type_error(),
            Some(TypeError::ArgLenMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn constructor_field_mismatch() {
        let mut ctx = ctx();
        let term = ctor(vec![(Some("snd"), Term::Num(1)), (None, Term::Flt(2.0))]);
        let res = check_constructor(&mut ctx, &None, &term, &pair(), &Term::reference("Pair"), 0);
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::FieldMismatch { .. })));
        assert!(matches!(
            ctx.info.last(),
            Some(Info::Error { expected: Term::Hole(Hole { name, .. }), .. }) if name == "expected:fst"
        ));
    }
}
